use serde::{Deserialize, Serialize};

/// Final line of a single game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub home_score: u16,
    pub away_score: u16,
    pub innings: u8,
    pub winning_pitcher: Option<u32>,
    pub losing_pitcher: Option<u32>,
    /// Set when the game hit the inning cap still tied and a winner
    /// had to be drawn at random.
    pub forced_tiebreak: bool,
}

impl GameResult {
    pub fn home_won(&self) -> bool {
        self.home_score > self.away_score
    }

    pub fn winner_id(&self, home_team_id: u32, away_team_id: u32) -> u32 {
        if self.home_won() {
            home_team_id
        } else {
            away_team_id
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattingGameLine {
    pub player_id: u32,
    pub at_bats: u16,
    pub runs: u16,
    pub hits: u16,
    pub doubles: u16,
    pub triples: u16,
    pub home_runs: u16,
    pub rbi: u16,
    pub walks: u16,
    pub strikeouts: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PitchingGameLine {
    pub player_id: u32,
    pub outs_recorded: u16,
    pub hits_allowed: u16,
    pub earned_runs: u16,
    pub walks: u16,
    pub strikeouts: u16,
}

/// One team's half of the box score. Lines are created lazily in the
/// order players first appear and keep that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBoxScore {
    pub team_id: u32,
    pub line_score: Vec<u16>,
    pub batting: Vec<BattingGameLine>,
    pub pitching: Vec<PitchingGameLine>,
}

impl TeamBoxScore {
    pub fn new(team_id: u32) -> Self {
        TeamBoxScore {
            team_id,
            line_score: Vec::new(),
            batting: Vec::new(),
            pitching: Vec::new(),
        }
    }

    pub fn batting_line_mut(&mut self, player_id: u32) -> &mut BattingGameLine {
        if let Some(pos) = self.batting.iter().position(|l| l.player_id == player_id) {
            return &mut self.batting[pos];
        }

        self.batting.push(BattingGameLine {
            player_id,
            ..BattingGameLine::default()
        });

        self.batting.last_mut().expect("batting line just pushed")
    }

    pub fn pitching_line_mut(&mut self, player_id: u32) -> &mut PitchingGameLine {
        if let Some(pos) = self.pitching.iter().position(|l| l.player_id == player_id) {
            return &mut self.pitching[pos];
        }

        self.pitching.push(PitchingGameLine {
            player_id,
            ..PitchingGameLine::default()
        });

        self.pitching.last_mut().expect("pitching line just pushed")
    }

    pub fn runs(&self) -> u16 {
        self.line_score.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxScore {
    pub home: TeamBoxScore,
    pub away: TeamBoxScore,
}

/// A finished simulation: the result plus the full box score behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedGame {
    pub result: GameResult,
    pub box_score: BoxScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batting_lines_keep_first_appearance_order() {
        let mut box_score = TeamBoxScore::new(1);

        box_score.batting_line_mut(30).hits += 1;
        box_score.batting_line_mut(10).at_bats += 1;
        box_score.batting_line_mut(30).at_bats += 1;

        let ids: Vec<u32> = box_score.batting.iter().map(|l| l.player_id).collect();
        assert_eq!(ids, vec![30, 10]);
        assert_eq!(box_score.batting[0].hits, 1);
        assert_eq!(box_score.batting[0].at_bats, 1);
    }

    #[test]
    fn home_won_compares_final_scores() {
        let result = GameResult {
            home_score: 3,
            away_score: 5,
            innings: 9,
            winning_pitcher: Some(7),
            losing_pitcher: Some(8),
            forced_tiebreak: false,
        };

        assert!(!result.home_won());
        assert_eq!(result.winner_id(1, 2), 2);
    }
}
