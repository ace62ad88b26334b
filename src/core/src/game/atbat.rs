use crate::player::{PitchingLine, PlayerSeasonStats};
use rand::{Rng, RngExt};

pub const LEAGUE_AVG_ERA: f32 = 4.20;
pub const LEAGUE_AVG_K_PER_NINE: f32 = 8.2;

/// Bound on how far the opposing pitcher can move the batter's own
/// probabilities. Pitcher influence stays subordinate to batter quality.
const PITCHER_INFLUENCE_CAP: f32 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtBatOutcome {
    Walk,
    Strikeout,
    Single,
    Double,
    Triple,
    HomeRun,
    Out,
}

impl AtBatOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AtBatOutcome::Single | AtBatOutcome::Double | AtBatOutcome::Triple | AtBatOutcome::HomeRun
        )
    }

    pub fn is_out(&self) -> bool {
        matches!(self, AtBatOutcome::Strikeout | AtBatOutcome::Out)
    }
}

/// Resolves one plate appearance from the batter's own recorded rates,
/// with a bounded multiplicative adjustment for the opposing pitcher.
pub struct AtBatResolver;

impl AtBatResolver {
    pub fn resolve(
        batter: &PlayerSeasonStats,
        pitcher: Option<&PlayerSeasonStats>,
        rng: &mut impl Rng,
    ) -> AtBatOutcome {
        let line = &batter.batting;

        let walk_probability = (line.obp() - line.avg()).max(0.0);
        let mut hit_probability = line.avg();
        let mut strikeout_probability = line.strikeout_rate();

        if let Some(arm) = pitcher.and_then(|p| p.pitching.as_ref()) {
            hit_probability *= Self::hit_factor(arm);
            strikeout_probability *= Self::strikeout_factor(arm);
        }

        // Pathological stat lines could push the mass over 1.0; rescale so a
        // generic out always remains possible.
        let total = walk_probability + hit_probability + strikeout_probability;
        let scale = if total > 0.99 { 0.99 / total } else { 1.0 };

        let roll: f32 = rng.random();

        if roll < walk_probability * scale {
            AtBatOutcome::Walk
        } else if roll < (walk_probability + hit_probability) * scale {
            Self::hit_type(batter, rng)
        } else if roll < total * scale {
            AtBatOutcome::Strikeout
        } else {
            AtBatOutcome::Out
        }
    }

    /// ERA deviation from the league reference, clamped to ±30%.
    /// A sub-league ERA suppresses hits, a bloated one inflates them.
    fn hit_factor(arm: &PitchingLine) -> f32 {
        if arm.outs_recorded == 0 {
            return 1.0;
        }
        let deviation = (arm.era() - LEAGUE_AVG_ERA) / LEAGUE_AVG_ERA;
        1.0 + deviation.clamp(-PITCHER_INFLUENCE_CAP, PITCHER_INFLUENCE_CAP)
    }

    /// K/9 deviation from the league reference, clamped the same way.
    fn strikeout_factor(arm: &PitchingLine) -> f32 {
        if arm.outs_recorded == 0 {
            return 1.0;
        }
        let deviation =
            (arm.strikeouts_per_nine() - LEAGUE_AVG_K_PER_NINE) / LEAGUE_AVG_K_PER_NINE;
        1.0 + deviation.clamp(-PITCHER_INFLUENCE_CAP, PITCHER_INFLUENCE_CAP)
    }

    /// Hit type drawn from the batter's own historical hit mix, never a
    /// league-wide template.
    fn hit_type(batter: &PlayerSeasonStats, rng: &mut impl Rng) -> AtBatOutcome {
        let line = &batter.batting;
        let weights = [
            (AtBatOutcome::Single, line.singles()),
            (AtBatOutcome::Double, line.doubles),
            (AtBatOutcome::Triple, line.triples),
            (AtBatOutcome::HomeRun, line.home_runs),
        ];

        let total: u32 = weights.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return AtBatOutcome::Single;
        }

        let mut roll = rng.random_range(0..total);
        for (outcome, weight) in weights {
            if roll < weight {
                return outcome;
            }
            roll -= weight;
        }

        AtBatOutcome::Single
    }
}
