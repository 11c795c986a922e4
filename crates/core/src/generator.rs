//! Target selection for a round.
//!
//! The generator enumerates every non-empty subset of the pool whose sum stays
//! within a ceiling and draws one of those subsets' sums at random. A sum that
//! several subsets produce is drawn proportionally more often.

use crate::{DigitSet, GameError, RngState};

/// Upper bound on enumerated subsets: `2^9` for a full pool.
pub const MAX_SUBSETS: usize = 1 << 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetSum {
    pub digits: DigitSet,
    pub sum: u32,
}

/// Every non-empty subset of `pool` whose sum is at most `ceiling`.
///
/// Subsets are grown one pool digit at a time: each accepted subset is extended
/// by the next digit and kept only if the extended sum still fits. Extending
/// an over-ceiling subset can never bring it back under, so pruning is exact.
pub fn feasible_subsets(pool: DigitSet, ceiling: u32) -> Vec<SubsetSum> {
    let mut accepted = Vec::with_capacity(1usize << pool.len());
    accepted.push(SubsetSum {
        digits: DigitSet::empty(),
        sum: 0,
    });
    for digit in pool.iter() {
        let value = u32::from(digit.value());
        let grown = accepted.len();
        for idx in 0..grown {
            let base = accepted[idx];
            let sum = base.sum + value;
            if sum <= ceiling {
                accepted.push(SubsetSum {
                    digits: base.digits.with(digit),
                    sum,
                });
            }
        }
    }
    accepted.remove(0);
    accepted
}

/// Draws the next target for `pool`.
pub fn pick_target(pool: DigitSet, ceiling: u32, rng: &mut RngState) -> Result<u32, GameError> {
    let subsets = feasible_subsets(pool, ceiling);
    if subsets.is_empty() {
        return Err(GameError::NoFeasibleTarget { ceiling });
    }
    let pick = subsets[rng.index(subsets.len())];
    tracing::debug!(
        pool = %pool,
        ceiling,
        candidates = subsets.len(),
        target = pick.sum,
        "picked target"
    );
    Ok(pick.sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Digit;
    use std::collections::BTreeSet;

    fn set(values: &[u8]) -> DigitSet {
        values
            .iter()
            .map(|value| Digit::new(*value).expect("digit"))
            .collect()
    }

    #[test]
    fn one_two_three_under_nine() {
        let sums: Vec<u32> = feasible_subsets(set(&[1, 2, 3]), 9)
            .iter()
            .map(|entry| entry.sum)
            .collect();
        assert_eq!(sums, vec![1, 2, 3, 3, 4, 5, 6]);

        let mut rng = RngState::from_seed(7);
        for _ in 0..200 {
            let target = pick_target(set(&[1, 2, 3]), 9, &mut rng).expect("target");
            assert!((1..=6).contains(&target));
        }
    }

    #[test]
    fn ceiling_prunes_large_subsets() {
        let subsets = feasible_subsets(set(&[5, 6, 7]), 9);
        let sums: BTreeSet<u32> = subsets.iter().map(|entry| entry.sum).collect();
        assert_eq!(sums, BTreeSet::from([5, 6, 7]));
    }

    #[test]
    fn full_pool_stays_within_bound() {
        let subsets = feasible_subsets(DigitSet::full(), 45);
        assert_eq!(subsets.len(), MAX_SUBSETS - 1);
        let capped = feasible_subsets(DigitSet::full(), 9);
        assert!(capped.iter().all(|entry| entry.sum <= 9));
        assert!(capped.iter().all(|entry| entry.digits.sum() == entry.sum));
    }

    #[test]
    fn empty_pool_or_low_ceiling_is_infeasible() {
        let mut rng = RngState::from_seed(1);
        assert_eq!(
            pick_target(DigitSet::empty(), 9, &mut rng),
            Err(GameError::NoFeasibleTarget { ceiling: 9 })
        );
        assert_eq!(
            pick_target(set(&[8, 9]), 7, &mut rng),
            Err(GameError::NoFeasibleTarget { ceiling: 7 })
        );
    }

    #[test]
    fn every_pick_is_a_subset_sum() {
        let mut rng = RngState::from_seed(99);
        for mask in 1u16..512 {
            let pool: DigitSet = Digit::all()
                .filter(|digit| mask & (1 << (digit.value() - 1)) != 0)
                .collect();
            let target = pick_target(pool, 9, &mut rng).expect("target");
            let reachable = feasible_subsets(pool, 9)
                .iter()
                .any(|entry| entry.sum == target);
            assert!(reachable, "target {target} not reachable from {pool}");
        }
    }

    #[test]
    fn sums_reachable_more_ways_are_weighted() {
        // {1,2,3}: sum 3 comes from {3} and {1,2}, so it is drawn twice as often as 1.
        let mut rng = RngState::from_seed(2024);
        let mut threes = 0u32;
        let mut ones = 0u32;
        for _ in 0..7000 {
            match pick_target(set(&[1, 2, 3]), 9, &mut rng).expect("target") {
                1 => ones += 1,
                3 => threes += 1,
                _ => {}
            }
        }
        assert!(threes > ones + ones / 2, "threes={threes} ones={ones}");
    }
}
