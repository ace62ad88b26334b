use crate::player::{Handedness, PlayerSeasonStats, Position};
use crate::team::{LINEUP_SIZE, Team};
use log::{debug, warn};

/// Resolves a team's depth chart into the nine batters and one starting
/// pitcher a game is played with.
///
/// Missing or unresolvable configuration is never fatal: every gap falls
/// back to roster order so that a bare roster still produces a usable
/// lineup and starter.
pub struct LineupSelector;

impl LineupSelector {
    /// The active batting order against a starter of the given hand.
    ///
    /// Configured slots are resolved in order; empty or dangling slots are
    /// filled from the roster's non-pitchers, preserving roster order.
    pub fn active_lineup(team: &Team, opposing_throws: Handedness) -> Vec<&PlayerSeasonStats> {
        let lineup = team.lineup_for(opposing_throws);

        let mut batters: Vec<&PlayerSeasonStats> = Vec::with_capacity(LINEUP_SIZE);

        if lineup.is_configured() {
            for slot in &lineup.slots {
                let Some(player_id) = slot.player_id else {
                    continue;
                };

                match team.player(player_id) {
                    Some(player) => batters.push(player),
                    None => warn!(
                        "team {}: lineup slot {} references unknown player {}",
                        team.name,
                        slot.position.get_short_name(),
                        player_id
                    ),
                }
            }
        } else {
            warn!(
                "team {}: no lineup configured vs {:?}, using roster order",
                team.name, opposing_throws
            );
        }

        // Fill whatever is missing from the roster, position players first.
        if batters.len() < LINEUP_SIZE {
            for player in team.roster.iter().filter(|p| !p.is_pitcher()) {
                if batters.len() == LINEUP_SIZE {
                    break;
                }
                if batters.iter().all(|b| b.id != player.id) {
                    batters.push(player);
                }
            }
        }

        // Degenerate rosters: bat whoever is left, pitchers included.
        if batters.len() < LINEUP_SIZE {
            for player in &team.roster {
                if batters.len() == LINEUP_SIZE {
                    break;
                }
                if batters.iter().all(|b| b.id != player.id) {
                    batters.push(player);
                }
            }
        }

        debug!("team {}: {} batters selected", team.name, batters.len());

        batters
    }

    /// The pitcher of record for a game: the first non-empty rotation slot,
    /// falling back to the first roster-listed starter.
    pub fn starting_pitcher(team: &Team) -> Option<&PlayerSeasonStats> {
        for slot in team.rotation.iter().flatten() {
            match team.player(*slot) {
                Some(player) => return Some(player),
                None => warn!(
                    "team {}: rotation references unknown player {}",
                    team.name, slot
                ),
            }
        }

        let fallback = team
            .roster
            .iter()
            .find(|p| p.position == Position::StartingPitcher)
            .or_else(|| team.roster.iter().find(|p| p.is_pitcher()));

        match fallback {
            Some(player) => {
                warn!(
                    "team {}: no usable rotation, falling back to {}",
                    team.name, player.name
                );
                Some(player)
            }
            None => {
                warn!("team {}: no pitcher on roster", team.name);
                None
            }
        }
    }
}
