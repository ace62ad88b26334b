use crate::game::atbat::AtBatOutcome;
use rand::{Rng, RngExt};

/// Chance a runner on second comes home on a single; otherwise they stop
/// at third. Every other advancement is deterministic.
const SCORE_FROM_SECOND_ON_SINGLE: f64 = 0.70;

/// The three base slots of one half-inning, first base at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasesState {
    pub bases: [Option<u32>; 3],
}

impl BasesState {
    pub fn new() -> Self {
        BasesState::default()
    }

    pub fn runners(&self) -> usize {
        self.bases.iter().flatten().count()
    }

    /// Applies one at-bat outcome and returns the runners who scored,
    /// batter included where they come all the way around.
    pub fn apply(
        &mut self,
        outcome: AtBatOutcome,
        batter_id: u32,
        rng: &mut impl Rng,
    ) -> Vec<u32> {
        let mut scored = Vec::new();

        match outcome {
            AtBatOutcome::Walk => {
                // force only contiguously occupied bases starting from first
                if self.bases[0].is_some() && self.bases[1].is_some() {
                    if let Some(runner) = self.bases[2] {
                        scored.push(runner);
                    }
                    self.bases[2] = self.bases[1].take();
                }
                if self.bases[0].is_some() && self.bases[1].is_none() {
                    self.bases[1] = self.bases[0].take();
                }
                self.bases[0] = Some(batter_id);
            }
            AtBatOutcome::Single => {
                if let Some(runner) = self.bases[2].take() {
                    scored.push(runner);
                }
                if let Some(runner) = self.bases[1].take() {
                    if rng.random_bool(SCORE_FROM_SECOND_ON_SINGLE) {
                        scored.push(runner);
                    } else {
                        self.bases[2] = Some(runner);
                    }
                }
                if let Some(runner) = self.bases[0].take() {
                    self.bases[1] = Some(runner);
                }
                self.bases[0] = Some(batter_id);
            }
            AtBatOutcome::Double => {
                if let Some(runner) = self.bases[2].take() {
                    scored.push(runner);
                }
                if let Some(runner) = self.bases[1].take() {
                    scored.push(runner);
                }
                if let Some(runner) = self.bases[0].take() {
                    self.bases[2] = Some(runner);
                }
                self.bases[1] = Some(batter_id);
            }
            AtBatOutcome::Triple => {
                for slot in self.bases.iter_mut().rev() {
                    if let Some(runner) = slot.take() {
                        scored.push(runner);
                    }
                }
                self.bases[2] = Some(batter_id);
            }
            AtBatOutcome::HomeRun => {
                for slot in self.bases.iter_mut().rev() {
                    if let Some(runner) = slot.take() {
                        scored.push(runner);
                    }
                }
                scored.push(batter_id);
            }
            AtBatOutcome::Strikeout | AtBatOutcome::Out => {}
        }

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn walk_with_bases_empty_moves_nobody() {
        let mut state = BasesState::new();
        let mut rng = StdRng::seed_from_u64(1);

        let scored = state.apply(AtBatOutcome::Walk, 10, &mut rng);

        assert!(scored.is_empty());
        assert_eq!(state.bases, [Some(10), None, None]);
    }

    #[test]
    fn walk_forces_only_contiguous_runners() {
        // runners on first and third: third is not forced
        let mut state = BasesState {
            bases: [Some(1), None, Some(3)],
        };
        let mut rng = StdRng::seed_from_u64(2);

        let scored = state.apply(AtBatOutcome::Walk, 10, &mut rng);

        assert!(scored.is_empty());
        assert_eq!(state.bases, [Some(10), Some(1), Some(3)]);
    }

    #[test]
    fn bases_loaded_walk_forces_exactly_one_run() {
        let mut state = BasesState {
            bases: [Some(1), Some(2), Some(3)],
        };
        let mut rng = StdRng::seed_from_u64(3);

        let scored = state.apply(AtBatOutcome::Walk, 10, &mut rng);

        assert_eq!(scored, vec![3]);
        assert_eq!(state.bases, [Some(10), Some(1), Some(2)]);
    }

    #[test]
    fn four_walks_from_empty_score_one() {
        let mut state = BasesState::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut runs = 0;

        for batter in 1..=4 {
            runs += state.apply(AtBatOutcome::Walk, batter, &mut rng).len();
        }

        assert_eq!(runs, 1);
        assert_eq!(state.bases, [Some(4), Some(3), Some(2)]);
    }

    #[test]
    fn solo_home_run_scores_the_batter_only() {
        let mut state = BasesState::new();
        let mut rng = StdRng::seed_from_u64(5);

        let scored = state.apply(AtBatOutcome::HomeRun, 10, &mut rng);

        assert_eq!(scored, vec![10]);
        assert_eq!(state.runners(), 0);
    }

    #[test]
    fn home_run_with_second_and_third_scores_three() {
        let mut state = BasesState {
            bases: [None, Some(2), Some(3)],
        };
        let mut rng = StdRng::seed_from_u64(6);

        let scored = state.apply(AtBatOutcome::HomeRun, 10, &mut rng);

        assert_eq!(scored, vec![3, 2, 10]);
        assert_eq!(state.runners(), 0);
    }

    #[test]
    fn single_always_scores_the_runner_from_third() {
        let mut state = BasesState {
            bases: [Some(1), None, Some(3)],
        };
        let mut rng = StdRng::seed_from_u64(7);

        let scored = state.apply(AtBatOutcome::Single, 10, &mut rng);

        assert_eq!(scored, vec![3]);
        assert_eq!(state.bases, [Some(10), Some(1), None]);
    }

    #[test]
    fn single_sends_the_runner_from_second_home_or_to_third() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut scored_count = 0;
        let mut held_count = 0;

        for _ in 0..500 {
            let mut state = BasesState {
                bases: [None, Some(2), None],
            };
            let scored = state.apply(AtBatOutcome::Single, 10, &mut rng);
            if scored.contains(&2) {
                scored_count += 1;
                assert_eq!(state.bases[2], None);
            } else {
                held_count += 1;
                assert_eq!(state.bases[2], Some(2));
            }
        }

        // ~70/30 split with plenty of slack
        assert!(scored_count > 280);
        assert!(held_count > 80);
    }

    #[test]
    fn double_clears_second_and_third() {
        let mut state = BasesState {
            bases: [Some(1), Some(2), Some(3)],
        };
        let mut rng = StdRng::seed_from_u64(9);

        let scored = state.apply(AtBatOutcome::Double, 10, &mut rng);

        assert_eq!(scored, vec![3, 2]);
        assert_eq!(state.bases, [None, Some(10), Some(1)]);
    }

    #[test]
    fn triple_scores_everyone_and_outs_move_nobody() {
        let mut state = BasesState {
            bases: [Some(1), Some(2), Some(3)],
        };
        let mut rng = StdRng::seed_from_u64(10);

        let scored = state.apply(AtBatOutcome::Triple, 10, &mut rng);
        assert_eq!(scored, vec![3, 2, 1]);
        assert_eq!(state.bases, [None, None, Some(10)]);

        let scored = state.apply(AtBatOutcome::Strikeout, 11, &mut rng);
        assert!(scored.is_empty());
        assert_eq!(state.bases, [None, None, Some(10)]);
    }
}
