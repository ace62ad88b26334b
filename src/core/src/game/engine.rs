use crate::game::atbat::{AtBatOutcome, AtBatResolver};
use crate::game::bases::BasesState;
use crate::game::result::{BoxScore, GameResult, SimulatedGame, TeamBoxScore};
use crate::player::{Handedness, PlayerSeasonStats};
use crate::team::{LineupSelector, Team};
use log::{debug, warn};
use rand::{Rng, RngExt};

pub const REGULATION_INNINGS: u8 = 9;
pub const MAX_INNINGS: u8 = 15;

/// Plays one game between two teams, at-bat by at-bat, producing the
/// final line and the full box score.
pub struct GameSimulator;

struct SideState<'t> {
    batters: Vec<&'t PlayerSeasonStats>,
    pitcher: Option<&'t PlayerSeasonStats>,
    batting_index: usize,
    runs: u16,
}

impl GameSimulator {
    pub fn play(home: &Team, away: &Team) -> SimulatedGame {
        GameSimulator::play_with(home, away, &mut rand::rng())
    }

    pub fn play_with(home: &Team, away: &Team, rng: &mut impl Rng) -> SimulatedGame {
        let home_pitcher = LineupSelector::starting_pitcher(home);
        let away_pitcher = LineupSelector::starting_pitcher(away);

        let mut home_side = SideState {
            batters: LineupSelector::active_lineup(home, throws_of(away_pitcher)),
            pitcher: home_pitcher,
            batting_index: 0,
            runs: 0,
        };
        let mut away_side = SideState {
            batters: LineupSelector::active_lineup(away, throws_of(home_pitcher)),
            pitcher: away_pitcher,
            batting_index: 0,
            runs: 0,
        };

        let mut home_box = TeamBoxScore::new(home.id);
        let mut away_box = TeamBoxScore::new(away.id);

        // Starters get a line even if they never face a recorded event.
        if let Some(pitcher) = home_pitcher {
            home_box.pitching_line_mut(pitcher.id);
        }
        if let Some(pitcher) = away_pitcher {
            away_box.pitching_line_mut(pitcher.id);
        }

        let mut inning: u8 = 1;
        let mut forced_tiebreak = false;

        loop {
            let runs = GameSimulator::play_half(
                &mut away_side,
                home_side.pitcher,
                &mut away_box,
                &mut home_box,
                None,
                rng,
            );
            away_box.line_score.push(runs);

            // The home team does not bat with the game already won.
            if inning >= REGULATION_INNINGS && home_side.runs > away_side.runs {
                break;
            }

            let walkoff_target = if inning >= REGULATION_INNINGS {
                Some(away_side.runs)
            } else {
                None
            };

            let runs = GameSimulator::play_half(
                &mut home_side,
                away_side.pitcher,
                &mut home_box,
                &mut away_box,
                walkoff_target,
                rng,
            );
            home_box.line_score.push(runs);

            if inning >= REGULATION_INNINGS && home_side.runs != away_side.runs {
                break;
            }

            if inning >= MAX_INNINGS {
                // Still tied at the cap: draw a winner rather than play on.
                warn!(
                    "game {} vs {} still tied after {} innings, forcing a result",
                    home.name, away.name, MAX_INNINGS
                );
                forced_tiebreak = true;
                let (side, box_score) = if rng.random_bool(0.5) {
                    (&mut home_side, &mut home_box)
                } else {
                    (&mut away_side, &mut away_box)
                };
                side.runs += 1;
                if let Some(last) = box_score.line_score.last_mut() {
                    *last += 1;
                }
                break;
            }

            inning += 1;
        }

        debug!(
            "final: {} {} - {} {} ({} innings)",
            away.name, away_side.runs, home.name, home_side.runs, inning
        );

        let home_won = home_side.runs > away_side.runs;
        let (winner, loser) = if home_won {
            (&home_side, &away_side)
        } else {
            (&away_side, &home_side)
        };

        SimulatedGame {
            result: GameResult {
                home_score: home_side.runs,
                away_score: away_side.runs,
                innings: inning,
                winning_pitcher: winner.pitcher.map(|p| p.id),
                losing_pitcher: loser.pitcher.map(|p| p.id),
                forced_tiebreak,
            },
            box_score: BoxScore {
                home: home_box,
                away: away_box,
            },
        }
    }

    /// One half-inning. Returns the runs scored; `walkoff_target` ends the
    /// half as soon as the offense pulls ahead of it.
    fn play_half(
        offense: &mut SideState,
        pitcher: Option<&PlayerSeasonStats>,
        offense_box: &mut TeamBoxScore,
        defense_box: &mut TeamBoxScore,
        walkoff_target: Option<u16>,
        rng: &mut impl Rng,
    ) -> u16 {
        if offense.batters.is_empty() {
            warn!("team {} has nobody to bat", offense_box.team_id);
            return 0;
        }

        let mut bases = BasesState::new();
        let mut outs = 0;
        let mut runs: u16 = 0;

        while outs < 3 {
            let batter = offense.batters[offense.batting_index % offense.batters.len()];
            offense.batting_index += 1;

            let outcome = AtBatResolver::resolve(batter, pitcher, rng);
            let scored = bases.apply(outcome, batter.id, rng);

            GameSimulator::record_at_bat(
                outcome,
                batter.id,
                &scored,
                pitcher.map(|p| p.id),
                offense_box,
                defense_box,
            );

            runs += scored.len() as u16;
            if outcome.is_out() {
                outs += 1;
            }

            if let Some(target) = walkoff_target {
                if offense.runs + runs > target {
                    break;
                }
            }
        }

        offense.runs += runs;
        runs
    }

    fn record_at_bat(
        outcome: AtBatOutcome,
        batter_id: u32,
        scored: &[u32],
        pitcher_id: Option<u32>,
        offense_box: &mut TeamBoxScore,
        defense_box: &mut TeamBoxScore,
    ) {
        {
            let scored_count = scored.len() as u16;
            let line = offense_box.batting_line_mut(batter_id);
            match outcome {
                AtBatOutcome::Walk => line.walks += 1,
                AtBatOutcome::Strikeout => {
                    line.at_bats += 1;
                    line.strikeouts += 1;
                }
                AtBatOutcome::Single => {
                    line.at_bats += 1;
                    line.hits += 1;
                }
                AtBatOutcome::Double => {
                    line.at_bats += 1;
                    line.hits += 1;
                    line.doubles += 1;
                }
                AtBatOutcome::Triple => {
                    line.at_bats += 1;
                    line.hits += 1;
                    line.triples += 1;
                }
                AtBatOutcome::HomeRun => {
                    line.at_bats += 1;
                    line.hits += 1;
                    line.home_runs += 1;
                }
                AtBatOutcome::Out => line.at_bats += 1,
            }
            line.rbi += scored_count;
        }

        for &runner in scored {
            offense_box.batting_line_mut(runner).runs += 1;
        }

        if let Some(pitcher_id) = pitcher_id {
            let arm = defense_box.pitching_line_mut(pitcher_id);
            match outcome {
                AtBatOutcome::Walk => arm.walks += 1,
                AtBatOutcome::Strikeout => {
                    arm.strikeouts += 1;
                    arm.outs_recorded += 1;
                }
                AtBatOutcome::Out => arm.outs_recorded += 1,
                _ => arm.hits_allowed += 1,
            }
            arm.earned_runs += scored.len() as u16;
        }
    }
}

fn throws_of(pitcher: Option<&PlayerSeasonStats>) -> Handedness {
    pitcher.map(|p| p.throws).unwrap_or(Handedness::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{BattingLine, PitchingLine, Position};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn league_average_batter(id: u32) -> PlayerSeasonStats {
        PlayerSeasonStats {
            id,
            name: format!("Batter {}", id),
            position: Position::CenterField,
            bats: Handedness::Right,
            throws: Handedness::Right,
            batting: BattingLine {
                at_bats: 550,
                hits: 145,
                doubles: 28,
                triples: 3,
                home_runs: 18,
                walks: 55,
                strikeouts: 120,
            },
            pitching: None,
        }
    }

    fn league_average_starter(id: u32) -> PlayerSeasonStats {
        PlayerSeasonStats {
            id,
            name: format!("Starter {}", id),
            position: Position::StartingPitcher,
            bats: Handedness::Right,
            throws: Handedness::Right,
            batting: BattingLine::default(),
            pitching: Some(PitchingLine {
                outs_recorded: 540,
                earned_runs: 84,
                strikeouts: 164,
                walks: 55,
                hits_allowed: 170,
            }),
        }
    }

    fn playable_team(id: u32, name: &str) -> Team {
        let mut team = Team::new(id, name.to_string(), None, None);
        for slot in 0..9 {
            team.roster.push(league_average_batter(id * 100 + slot));
        }
        team.roster.push(league_average_starter(id * 100 + 50));
        team
    }

    fn punchless_team(id: u32, name: &str) -> Team {
        let mut team = Team::new(id, name.to_string(), None, None);
        for slot in 0..9 {
            let mut batter = league_average_batter(id * 100 + slot);
            batter.batting = BattingLine::default();
            team.roster.push(batter);
        }
        team.roster.push(league_average_starter(id * 100 + 50));
        team
    }

    #[test]
    fn game_produces_a_winner_and_consistent_box_score() {
        let home = playable_team(1, "Harbor Cats");
        let away = playable_team(2, "River Hogs");
        let mut rng = StdRng::seed_from_u64(42);

        let game = GameSimulator::play_with(&home, &away, &mut rng);

        assert!(game.result.innings >= REGULATION_INNINGS);
        assert!(game.result.innings <= MAX_INNINGS);
        assert_ne!(game.result.home_score, game.result.away_score);

        assert_eq!(game.box_score.home.runs(), game.result.home_score);
        assert_eq!(game.box_score.away.runs(), game.result.away_score);

        // Pitcher decisions go to the starters.
        let winner_starter = if game.result.home_won() { 150 } else { 250 };
        let loser_starter = if game.result.home_won() { 250 } else { 150 };
        assert_eq!(game.result.winning_pitcher, Some(winner_starter));
        assert_eq!(game.result.losing_pitcher, Some(loser_starter));
    }

    #[test]
    fn home_team_skips_the_ninth_when_ahead() {
        let home = playable_team(1, "Harbor Cats");
        let away = playable_team(2, "River Hogs");

        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let game = GameSimulator::play_with(&home, &away, &mut rng);

            if game.result.innings == REGULATION_INNINGS && game.result.home_won() {
                assert!(
                    game.box_score.home.line_score.len() < game.box_score.away.line_score.len()
                        || game.result.forced_tiebreak
                        || game.box_score.home.line_score.last().copied().unwrap_or(0) > 0
                );
            }

            // Line scores always reconcile with the final regardless of path.
            assert_eq!(game.box_score.home.runs(), game.result.home_score);
            assert_eq!(game.box_score.away.runs(), game.result.away_score);
        }
    }

    #[test]
    fn scoreless_game_is_forced_to_a_result_at_the_cap() {
        let home = punchless_team(1, "Zeros");
        let away = punchless_team(2, "Nils");
        let mut rng = StdRng::seed_from_u64(7);

        let game = GameSimulator::play_with(&home, &away, &mut rng);

        assert!(game.result.forced_tiebreak);
        assert_eq!(game.result.innings, MAX_INNINGS);
        let diff =
            (game.result.home_score as i32 - game.result.away_score as i32).unsigned_abs();
        assert_eq!(diff, 1);
        assert_eq!(game.box_score.home.runs(), game.result.home_score);
        assert_eq!(game.box_score.away.runs(), game.result.away_score);
    }

    #[test]
    fn runaway_offense_is_counted_without_truncation() {
        // A lineup that almost never makes an out keeps every half-inning
        // alive for hundreds of plate appearances; the run counters have
        // to carry totals far past a single byte.
        let mut home = playable_team(1, "Sluggers");
        let mut away = playable_team(2, "Mashers");
        for team in [&mut home, &mut away] {
            for batter in team.roster.iter_mut().filter(|p| !p.is_pitcher()) {
                batter.batting = BattingLine {
                    at_bats: 500,
                    hits: 500,
                    ..BattingLine::default()
                };
            }
        }
        let mut rng = StdRng::seed_from_u64(3);

        let game = GameSimulator::play_with(&home, &away, &mut rng);

        let total = game.result.home_score as u32 + game.result.away_score as u32;
        assert!(total > 255, "expected a runaway score, got {}", total);
        assert_eq!(game.box_score.home.runs(), game.result.home_score);
        assert_eq!(game.box_score.away.runs(), game.result.away_score);
        assert!(game.result.innings >= REGULATION_INNINGS);
    }

    #[test]
    fn walks_are_not_at_bats_and_runs_batted_in_are_credited() {
        let mut offense_box = TeamBoxScore::new(1);
        let mut defense_box = TeamBoxScore::new(2);

        GameSimulator::record_at_bat(
            AtBatOutcome::Walk,
            10,
            &[3],
            Some(50),
            &mut offense_box,
            &mut defense_box,
        );

        let batter = &offense_box.batting[0];
        assert_eq!(batter.player_id, 10);
        assert_eq!(batter.at_bats, 0);
        assert_eq!(batter.walks, 1);
        assert_eq!(batter.rbi, 1);

        let runner = &offense_box.batting[1];
        assert_eq!(runner.player_id, 3);
        assert_eq!(runner.runs, 1);

        let arm = &defense_box.pitching[0];
        assert_eq!(arm.walks, 1);
        assert_eq!(arm.earned_runs, 1);
        assert_eq!(arm.outs_recorded, 0);
    }
}
