use crate::schedule::ScheduledGame;
use crate::team::Team;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One team's row in the standings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: u32,
    pub team_name: String,
    pub league: Option<String>,
    pub division: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub home_wins: u32,
    pub home_losses: u32,
    pub away_wins: u32,
    pub away_losses: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    /// Distance behind the division leader; 0.0 for leaders and for
    /// teams outside any division.
    pub games_back: f32,
}

impl TeamStanding {
    fn new(team: &Team) -> Self {
        TeamStanding {
            team_id: team.id,
            team_name: team.name.clone(),
            league: team.league.clone(),
            division: team.division.clone(),
            wins: 0,
            losses: 0,
            home_wins: 0,
            home_losses: 0,
            away_wins: 0,
            away_losses: 0,
            runs_scored: 0,
            runs_allowed: 0,
            games_back: 0.0,
        }
    }

    pub fn win_pct(&self) -> f32 {
        let played = self.wins + self.losses;
        if played == 0 {
            return 0.0;
        }
        self.wins as f32 / played as f32
    }

    pub fn run_differential(&self) -> i32 {
        self.runs_scored as i32 - self.runs_allowed as i32
    }
}

/// Recomputes the full table from the schedule's recorded results.
///
/// Always a fresh pass over the played games rather than an incremental
/// update, so standings can never disagree with the schedule.
pub struct StandingsCalculator;

impl StandingsCalculator {
    pub fn compute(teams: &[Team], games: &[ScheduledGame]) -> Vec<TeamStanding> {
        let mut standings: Vec<TeamStanding> = teams.iter().map(TeamStanding::new).collect();

        for game in games {
            if game.is_all_star_game {
                continue;
            }
            let Some(result) = &game.result else {
                continue;
            };

            let home_won = result.home_won();

            if let Some(home) = standings.iter_mut().find(|s| s.team_id == game.home_team_id) {
                home.runs_scored += result.home_score as u32;
                home.runs_allowed += result.away_score as u32;
                if home_won {
                    home.wins += 1;
                    home.home_wins += 1;
                } else {
                    home.losses += 1;
                    home.home_losses += 1;
                }
            }

            if let Some(away) = standings.iter_mut().find(|s| s.team_id == game.away_team_id) {
                away.runs_scored += result.away_score as u32;
                away.runs_allowed += result.home_score as u32;
                if home_won {
                    away.losses += 1;
                    away.away_losses += 1;
                } else {
                    away.wins += 1;
                    away.away_wins += 1;
                }
            }
        }

        StandingsCalculator::fill_games_back(&mut standings);

        standings.sort_by(|a, b| {
            (&a.league, &a.division)
                .cmp(&(&b.league, &b.division))
                .then_with(|| b.win_pct().partial_cmp(&a.win_pct()).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| b.wins.cmp(&a.wins))
        });

        standings
    }

    fn fill_games_back(standings: &mut [TeamStanding]) {
        // Leader per (league, division); teams outside a division stay at 0.
        let mut leaders: BTreeMap<(String, String), (u32, u32)> = BTreeMap::new();

        for standing in standings.iter() {
            let (Some(league), Some(division)) = (&standing.league, &standing.division) else {
                continue;
            };
            let key = (league.clone(), division.clone());
            let entry = leaders.entry(key).or_insert((standing.wins, standing.losses));
            if standing.wins > entry.0 || (standing.wins == entry.0 && standing.losses < entry.1)
            {
                *entry = (standing.wins, standing.losses);
            }
        }

        for standing in standings.iter_mut() {
            let (Some(league), Some(division)) = (&standing.league, &standing.division) else {
                continue;
            };
            if let Some(&(leader_wins, leader_losses)) =
                leaders.get(&(league.clone(), division.clone()))
            {
                let behind = (leader_wins as f32 - standing.wins as f32)
                    + (standing.losses as f32 - leader_losses as f32);
                standing.games_back = behind / 2.0;
            }
        }
    }
}
