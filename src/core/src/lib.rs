pub mod error;
pub mod game;
pub mod player;
pub mod schedule;
pub mod season;
pub mod standings;
pub mod stats;
pub mod team;

pub use error::ConfigurationError;
pub use game::{
    AtBatOutcome, AtBatResolver, BasesState, BattingGameLine, BoxScore, GameResult, GameSimulator,
    PitchingGameLine, SimulatedGame, TeamBoxScore,
};
pub use player::{BattingLine, Handedness, PitchingLine, PlayerSeasonStats, Position};
pub use schedule::{
    ScheduleGenerator, ScheduleSettings, ScheduledGame, SeasonSchedule,
};
pub use season::Season;
pub use standings::{StandingsCalculator, TeamStanding};
pub use stats::{PlayerSimulationStats, StatsAccumulator};
pub use team::{Bullpen, Lineup, LineupSelector, LineupSlot, Team};
