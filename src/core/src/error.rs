use thiserror::Error;

/// Fatal configuration problems detected before any output is produced.
///
/// Degraded inputs (missing lineups, empty rotation slots) are not errors:
/// they are recovered locally via roster-derived fallbacks and logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least two teams are required to build a schedule, got {0}")]
    NotEnoughTeams(usize),
}
