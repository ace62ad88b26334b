use crate::game::GameResult;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

/// One entry of the season schedule.
///
/// Created once by the generator; its result is attached exactly once by
/// the simulation driver and the entry is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub game_number: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub date: NaiveDate,
    pub series_id: u32,
    pub series_game: u8,
    pub is_all_star_game: bool,
    pub result: Option<GameResult>,
}

impl ScheduledGame {
    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

/// The full ordered game list for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSchedule {
    pub games: Vec<ScheduledGame>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub all_star_date: Option<NaiveDate>,
    /// Realized games per team after integer-division rounding; may drift
    /// slightly from the requested figure.
    pub games_per_team: f32,
}

impl SeasonSchedule {
    pub fn next_unplayed(&self) -> Option<&ScheduledGame> {
        self.games.iter().find(|g| !g.is_played())
    }

    pub fn unplayed(&self) -> impl Iterator<Item = &ScheduledGame> {
        self.games.iter().filter(|g| !g.is_played())
    }

    /// Completed games, excluding the All-Star exhibition.
    pub fn completed_games(&self) -> impl Iterator<Item = &ScheduledGame> {
        self.games
            .iter()
            .filter(|g| g.is_played() && !g.is_all_star_game)
    }

    /// Attaches a result to a game. A second write to the same entry is
    /// rejected and logged; the schedule is append-once by contract.
    pub fn attach_result(&mut self, game_number: u32, result: GameResult) -> bool {
        let Some(game) = self.games.iter_mut().find(|g| g.game_number == game_number) else {
            warn!("no scheduled game with number {}", game_number);
            return false;
        };

        if game.result.is_some() {
            warn!("game {} already has a result attached", game_number);
            return false;
        }

        game.result = Some(result);
        true
    }

    /// Number of non-exhibition games scheduled for a team.
    pub fn team_game_count(&self, team_id: u32) -> u32 {
        self.games
            .iter()
            .filter(|g| !g.is_all_star_game && g.involves(team_id))
            .count() as u32
    }

    pub fn team_home_game_count(&self, team_id: u32) -> u32 {
        self.games
            .iter()
            .filter(|g| !g.is_all_star_game && g.home_team_id == team_id)
            .count() as u32
    }
}
