use crate::player::{Handedness, PlayerSeasonStats, Position};
use serde::{Deserialize, Serialize};

pub const LINEUP_SIZE: usize = 9;
pub const ROTATION_SIZE: usize = 5;

/// One batting-order slot: the defensive position being filled and the
/// player assigned to it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupSlot {
    pub position: Position,
    pub player_id: Option<u32>,
}

/// An ordered 9-slot batting lineup for one platoon context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    pub slots: Vec<LineupSlot>,
}

impl Lineup {
    pub fn empty() -> Self {
        let positions = [
            Position::Catcher,
            Position::FirstBase,
            Position::SecondBase,
            Position::ThirdBase,
            Position::Shortstop,
            Position::LeftField,
            Position::CenterField,
            Position::RightField,
            Position::DesignatedHitter,
        ];

        Lineup {
            slots: positions
                .into_iter()
                .map(|position| LineupSlot {
                    position,
                    player_id: None,
                })
                .collect(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.slots.iter().any(|slot| slot.player_id.is_some())
    }
}

impl Default for Lineup {
    fn default() -> Self {
        Lineup::empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bullpen {
    pub closer: Option<u32>,
    pub setup: Vec<u32>,
}

/// A drafted team. Owned and mutated by draft/roster management;
/// the simulation core treats it as read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub league: Option<String>,
    pub division: Option<String>,
    pub roster: Vec<PlayerSeasonStats>,
    pub lineup_vs_right: Lineup,
    pub lineup_vs_left: Lineup,
    pub rotation: [Option<u32>; ROTATION_SIZE],
    pub bullpen: Bullpen,
}

impl Team {
    pub fn new(id: u32, name: String, league: Option<String>, division: Option<String>) -> Self {
        Team {
            id,
            name,
            league,
            division,
            roster: Vec::new(),
            lineup_vs_right: Lineup::empty(),
            lineup_vs_left: Lineup::empty(),
            rotation: [None; ROTATION_SIZE],
            bullpen: Bullpen::default(),
        }
    }

    pub fn player(&self, id: u32) -> Option<&PlayerSeasonStats> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Lineup used against a starter of the given throwing hand.
    pub fn lineup_for(&self, opposing_throws: Handedness) -> &Lineup {
        match opposing_throws {
            Handedness::Left => &self.lineup_vs_left,
            _ => &self.lineup_vs_right,
        }
    }

    pub fn is_division_rival(&self, other: &Team) -> bool {
        match (&self.league, &self.division, &other.league, &other.division) {
            (Some(l1), Some(d1), Some(l2), Some(d2)) => l1 == l2 && d1 == d2,
            _ => false,
        }
    }
}
