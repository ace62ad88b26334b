use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
    DesignatedHitter,
    StartingPitcher,
    ReliefPitcher,
}

impl Position {
    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::StartingPitcher | Position::ReliefPitcher)
    }

    pub fn get_short_name(&self) -> &'static str {
        match self {
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::DesignatedHitter => "DH",
            Position::StartingPitcher => "SP",
            Position::ReliefPitcher => "RP",
        }
    }
}

/// A single historical season's batting counting stats.
///
/// Rate stats are always derived from the counts; every division by zero
/// defaults to 0.0 rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

impl BattingLine {
    pub fn singles(&self) -> u32 {
        self.hits
            .saturating_sub(self.doubles + self.triples + self.home_runs)
    }

    pub fn plate_appearances(&self) -> u32 {
        self.at_bats + self.walks
    }

    pub fn avg(&self) -> f32 {
        ratio(self.hits, self.at_bats)
    }

    pub fn obp(&self) -> f32 {
        ratio(self.hits + self.walks, self.plate_appearances())
    }

    pub fn slg(&self) -> f32 {
        let total_bases =
            self.singles() + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs;
        ratio(total_bases, self.at_bats)
    }

    pub fn strikeout_rate(&self) -> f32 {
        ratio(self.strikeouts, self.plate_appearances())
    }
}

/// A single historical season's pitching counting stats.
/// Innings are carried as recorded outs to avoid the x.1/x.2 notation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingLine {
    pub outs_recorded: u32,
    pub earned_runs: u32,
    pub strikeouts: u32,
    pub walks: u32,
    pub hits_allowed: u32,
}

impl PitchingLine {
    pub fn innings_pitched(&self) -> f32 {
        self.outs_recorded as f32 / 3.0
    }

    pub fn era(&self) -> f32 {
        if self.outs_recorded == 0 {
            return 0.0;
        }
        self.earned_runs as f32 * 9.0 / self.innings_pitched()
    }

    pub fn whip(&self) -> f32 {
        if self.outs_recorded == 0 {
            return 0.0;
        }
        (self.walks + self.hits_allowed) as f32 / self.innings_pitched()
    }

    pub fn strikeouts_per_nine(&self) -> f32 {
        if self.outs_recorded == 0 {
            return 0.0;
        }
        self.strikeouts as f32 * 9.0 / self.innings_pitched()
    }
}

/// An immutable snapshot of one drafted player-season.
///
/// Produced upstream by draft/roster management; the simulation core only
/// ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSeasonStats {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub bats: Handedness,
    pub throws: Handedness,
    pub batting: BattingLine,
    pub pitching: Option<PitchingLine>,
}

impl PlayerSeasonStats {
    pub fn is_pitcher(&self) -> bool {
        self.position.is_pitcher()
    }
}

fn ratio(numerator: u32, denominator: u32) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}
