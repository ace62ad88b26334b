use crate::game::{BoxScore, GameResult, TeamBoxScore};
use crate::player::{BattingLine, PitchingLine};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything a player has produced across the simulated games so far.
///
/// Counting stats only; rates come from the shared [`BattingLine`] and
/// [`PitchingLine`] accessors so they can never drift from the counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSimulationStats {
    pub player_id: u32,
    pub games: u32,
    pub batting: BattingLine,
    pub runs: u32,
    pub rbi: u32,
    pub pitching: PitchingLine,
    pub wins: u32,
    pub losses: u32,
}

/// Folds per-game box scores into season totals per player.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    players: HashMap<u32, PlayerSimulationStats>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        StatsAccumulator::default()
    }

    pub fn apply_game(&mut self, result: &GameResult, box_score: &BoxScore) {
        self.apply_team(&box_score.home);
        self.apply_team(&box_score.away);

        if let Some(winner) = result.winning_pitcher {
            self.entry(winner).wins += 1;
        }
        if let Some(loser) = result.losing_pitcher {
            self.entry(loser).losses += 1;
        }
    }

    fn apply_team(&mut self, team: &TeamBoxScore) {
        // A player can hold both a batting and a pitching line in the same
        // game; the appearance is still a single game played.
        let mut appeared: Vec<u32> = Vec::new();

        for line in &team.batting {
            let player = self.entry(line.player_id);
            player.batting.at_bats += line.at_bats as u32;
            player.batting.hits += line.hits as u32;
            player.batting.doubles += line.doubles as u32;
            player.batting.triples += line.triples as u32;
            player.batting.home_runs += line.home_runs as u32;
            player.batting.walks += line.walks as u32;
            player.batting.strikeouts += line.strikeouts as u32;
            player.runs += line.runs as u32;
            player.rbi += line.rbi as u32;
            appeared.push(line.player_id);
        }

        for line in &team.pitching {
            let player = self.entry(line.player_id);
            player.pitching.outs_recorded += line.outs_recorded as u32;
            player.pitching.hits_allowed += line.hits_allowed as u32;
            player.pitching.earned_runs += line.earned_runs as u32;
            player.pitching.walks += line.walks as u32;
            player.pitching.strikeouts += line.strikeouts as u32;
            if !appeared.contains(&line.player_id) {
                appeared.push(line.player_id);
            }
        }

        for player_id in appeared {
            self.entry(player_id).games += 1;
        }
    }

    fn entry(&mut self, player_id: u32) -> &mut PlayerSimulationStats {
        self.players
            .entry(player_id)
            .or_insert_with(|| PlayerSimulationStats {
                player_id,
                ..PlayerSimulationStats::default()
            })
    }

    pub fn get(&self, player_id: u32) -> Option<&PlayerSimulationStats> {
        self.players.get(&player_id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerSimulationStats> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BattingGameLine, PitchingGameLine};

    fn sample_game(swap: bool) -> (GameResult, BoxScore) {
        let mut home = TeamBoxScore::new(1);
        home.line_score = vec![0, 2, 1];
        home.batting.push(BattingGameLine {
            player_id: 10,
            at_bats: 4,
            runs: 1,
            hits: 2,
            doubles: 1,
            rbi: 2,
            ..BattingGameLine::default()
        });
        home.pitching.push(PitchingGameLine {
            player_id: 50,
            outs_recorded: 27,
            hits_allowed: 5,
            earned_runs: 1,
            walks: 2,
            strikeouts: 8,
        });

        let mut away = TeamBoxScore::new(2);
        away.line_score = vec![1, 0, 0];
        away.batting.push(BattingGameLine {
            player_id: 20,
            at_bats: 3,
            hits: 1,
            walks: 1,
            strikeouts: if swap { 2 } else { 1 },
            ..BattingGameLine::default()
        });
        away.pitching.push(PitchingGameLine {
            player_id: 60,
            outs_recorded: 24,
            hits_allowed: 7,
            earned_runs: 3,
            walks: 1,
            strikeouts: 5,
        });

        let result = GameResult {
            home_score: 3,
            away_score: 1,
            innings: 9,
            winning_pitcher: Some(50),
            losing_pitcher: Some(60),
            forced_tiebreak: false,
        };

        (result, BoxScore { home, away })
    }

    #[test]
    fn game_lines_fold_into_season_totals() {
        let mut stats = StatsAccumulator::new();
        let (result, box_score) = sample_game(false);

        stats.apply_game(&result, &box_score);
        stats.apply_game(&result, &box_score);

        let batter = stats.get(10).unwrap();
        assert_eq!(batter.games, 2);
        assert_eq!(batter.batting.at_bats, 8);
        assert_eq!(batter.batting.hits, 4);
        assert_eq!(batter.rbi, 4);
        assert!((batter.batting.avg() - 0.5).abs() < f32::EPSILON);

        let winner = stats.get(50).unwrap();
        assert_eq!(winner.wins, 2);
        assert_eq!(winner.losses, 0);
        assert_eq!(winner.pitching.outs_recorded, 54);
        assert!((winner.pitching.era() - 1.0).abs() < 0.001);

        let loser = stats.get(60).unwrap();
        assert_eq!(loser.losses, 2);
    }

    #[test]
    fn accumulation_order_does_not_matter() {
        let (result_a, box_a) = sample_game(false);
        let (result_b, box_b) = sample_game(true);

        let mut forward = StatsAccumulator::new();
        forward.apply_game(&result_a, &box_a);
        forward.apply_game(&result_b, &box_b);

        let mut reverse = StatsAccumulator::new();
        reverse.apply_game(&result_b, &box_b);
        reverse.apply_game(&result_a, &box_a);

        assert_eq!(forward.len(), reverse.len());
        for player in forward.players() {
            assert_eq!(Some(player), reverse.get(player.player_id));
        }
    }

    #[test]
    fn two_way_player_counts_one_game() {
        let mut home = TeamBoxScore::new(1);
        home.batting.push(BattingGameLine {
            player_id: 10,
            at_bats: 4,
            hits: 1,
            ..BattingGameLine::default()
        });
        home.pitching.push(PitchingGameLine {
            player_id: 10,
            outs_recorded: 18,
            ..PitchingGameLine::default()
        });
        let away = TeamBoxScore::new(2);

        let result = GameResult {
            home_score: 1,
            away_score: 0,
            innings: 9,
            winning_pitcher: None,
            losing_pitcher: None,
            forced_tiebreak: false,
        };

        let mut stats = StatsAccumulator::new();
        stats.apply_game(&result, &BoxScore { home, away });

        assert_eq!(stats.get(10).unwrap().games, 1);
    }
}
