use crate::error::ConfigurationError;
use crate::game::{GameSimulator, SimulatedGame};
use crate::schedule::{ScheduleGenerator, ScheduleSettings, SeasonSchedule};
use crate::standings::{StandingsCalculator, TeamStanding};
use crate::stats::StatsAccumulator;
use crate::team::Team;
use log::{debug, info};
use rand::Rng;

/// A full simulated season: the fixed set of teams, their schedule, and
/// the stats accumulated from every game played so far.
///
/// The season owns the only mutable state in the core; everything else
/// is recomputed from it on demand.
pub struct Season {
    pub teams: Vec<Team>,
    pub schedule: SeasonSchedule,
    pub stats: StatsAccumulator,
}

impl Season {
    pub fn new(teams: Vec<Team>, settings: &ScheduleSettings) -> Result<Self, ConfigurationError> {
        Season::new_with(teams, settings, &mut rand::rng())
    }

    pub fn new_with(
        teams: Vec<Team>,
        settings: &ScheduleSettings,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigurationError> {
        let schedule = ScheduleGenerator::generate_with(&teams, settings, rng)?;

        info!(
            "season initialized: {} teams, {} scheduled games",
            teams.len(),
            schedule.games.len()
        );

        Ok(Season {
            teams,
            schedule,
            stats: StatsAccumulator::new(),
        })
    }

    pub fn team(&self, team_id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Plays the next unplayed game on the schedule. Returns `None` once
    /// the season is complete.
    pub fn simulate_next(&mut self) -> Option<SimulatedGame> {
        self.simulate_next_with(&mut rand::rng())
    }

    pub fn simulate_next_with(&mut self, rng: &mut impl Rng) -> Option<SimulatedGame> {
        let next = self.schedule.next_unplayed()?;
        let game_number = next.game_number;
        let home_id = next.home_team_id;
        let away_id = next.away_team_id;
        let exhibition = next.is_all_star_game;

        let home = self
            .team(home_id)
            .expect("scheduled game references a team outside the season");
        let away = self
            .team(away_id)
            .expect("scheduled game references a team outside the season");

        let game = GameSimulator::play_with(home, away, rng);

        // The All-Star exhibition is played for its result only; nothing
        // from it reaches season stats or standings.
        if !exhibition {
            self.stats.apply_game(&game.result, &game.box_score);
        }

        self.schedule.attach_result(game_number, game.result.clone());

        debug!(
            "game {}: {} @ {} -> {}-{}",
            game_number, away_id, home_id, game.result.away_score, game.result.home_score
        );

        Some(game)
    }

    pub fn simulate_games(&mut self, count: usize) -> Vec<SimulatedGame> {
        self.simulate_games_with(count, &mut rand::rng())
    }

    pub fn simulate_games_with(&mut self, count: usize, rng: &mut impl Rng) -> Vec<SimulatedGame> {
        let mut played = Vec::with_capacity(count);
        for _ in 0..count {
            match self.simulate_next_with(rng) {
                Some(game) => played.push(game),
                None => break,
            }
        }
        played
    }

    pub fn simulate_all(&mut self) {
        self.simulate_all_with(&mut rand::rng());
    }

    pub fn simulate_all_with(&mut self, rng: &mut impl Rng) {
        let mut played = 0u32;
        while self.simulate_next_with(rng).is_some() {
            played += 1;
        }
        info!("simulated {} games to close out the season", played);
    }

    pub fn standings(&self) -> Vec<TeamStanding> {
        StandingsCalculator::compute(&self.teams, &self.schedule.games)
    }

    pub fn remaining_games(&self) -> usize {
        self.schedule.unplayed().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{BattingLine, Handedness, PitchingLine, PlayerSeasonStats, Position};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roster_player(id: u32, position: Position) -> PlayerSeasonStats {
        let pitching = position.is_pitcher().then(|| PitchingLine {
            outs_recorded: 450,
            earned_runs: 70,
            strikeouts: 140,
            walks: 50,
            hits_allowed: 150,
        });
        PlayerSeasonStats {
            id,
            name: format!("Player {}", id),
            position,
            bats: Handedness::Right,
            throws: Handedness::Right,
            batting: BattingLine {
                at_bats: 500,
                hits: 130,
                doubles: 25,
                triples: 2,
                home_runs: 15,
                walks: 50,
                strikeouts: 110,
            },
            pitching,
        }
    }

    fn small_league(games_per_team: u32) -> (Vec<Team>, ScheduleSettings) {
        let mut teams = Vec::new();
        for (index, name) in ["Harbor Cats", "River Hogs", "Canyon Owls", "Mesa Kings"]
            .iter()
            .enumerate()
        {
            let id = index as u32 + 1;
            let mut team = Team::new(id, name.to_string(), None, None);
            for slot in 0..9 {
                team.roster
                    .push(roster_player(id * 100 + slot, Position::CenterField));
            }
            team.roster
                .push(roster_player(id * 100 + 50, Position::StartingPitcher));
            teams.push(team);
        }

        let settings = ScheduleSettings {
            games_per_team,
            ..ScheduleSettings::default()
        };

        (teams, settings)
    }

    #[test]
    fn season_plays_out_to_the_last_game() {
        let (teams, settings) = small_league(12);
        let mut rng = StdRng::seed_from_u64(11);

        let mut season = Season::new_with(teams, &settings, &mut rng).unwrap();
        let scheduled = season.schedule.games.len();

        season.simulate_all_with(&mut rng);

        assert_eq!(season.remaining_games(), 0);
        assert_eq!(
            season.schedule.games.iter().filter(|g| g.is_played()).count(),
            scheduled
        );
        assert!(!season.stats.is_empty());

        // Every competitive game produced a decision for both sides.
        let standings = season.standings();
        let total_wins: u32 = standings.iter().map(|s| s.wins).sum();
        let total_losses: u32 = standings.iter().map(|s| s.losses).sum();
        assert_eq!(total_wins, total_losses);
        assert_eq!(
            total_wins as usize,
            season.schedule.completed_games().count()
        );
    }

    #[test]
    fn partial_simulation_advances_in_schedule_order() {
        let (teams, settings) = small_league(12);
        let mut rng = StdRng::seed_from_u64(12);

        let mut season = Season::new_with(teams, &settings, &mut rng).unwrap();
        let total = season.schedule.games.len();

        let played = season.simulate_games_with(5, &mut rng);
        assert_eq!(played.len(), 5);
        assert_eq!(season.remaining_games(), total - 5);

        let first_unplayed = season.schedule.next_unplayed().unwrap().game_number;
        let played_numbers: Vec<u32> = season
            .schedule
            .games
            .iter()
            .filter(|g| g.is_played())
            .map(|g| g.game_number)
            .collect();
        assert!(played_numbers.iter().all(|&n| n != first_unplayed));
        assert_eq!(played_numbers.len(), 5);
    }

    #[test]
    fn exhibition_results_never_reach_stats_or_standings() {
        let (teams, settings) = small_league(12);
        let mut rng = StdRng::seed_from_u64(13);

        let mut season = Season::new_with(teams, &settings, &mut rng).unwrap();
        season.simulate_all_with(&mut rng);

        let all_star = season
            .schedule
            .games
            .iter()
            .find(|g| g.is_all_star_game)
            .expect("schedule carries an exhibition");
        assert!(all_star.is_played());

        let standings = season.standings();
        let decisions: u32 = standings.iter().map(|s| s.wins + s.losses).sum();
        assert_eq!(
            decisions as usize,
            2 * season.schedule.completed_games().count()
        );
    }
}
