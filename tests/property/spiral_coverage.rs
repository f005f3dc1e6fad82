//! Property tests for the square-spiral enumeration.

use std::collections::HashSet;

use proptest::prelude::*;

use vanity_rs::vanity::{delta_pair, spiral_max};

fn chebyshev(pair: (i64, i64)) -> u64 {
    pair.0.unsigned_abs().max(pair.1.unsigned_abs())
}

proptest! {
    /// Indices `1..=spiral_max(r)` hit every non-origin pair inside the
    /// radius-`r` square exactly once.
    #[test]
    fn bijection_over_the_square(radius in 1u32..=12) {
        let max = spiral_max(radius);
        let mut seen = HashSet::with_capacity(max as usize);
        for n in 1..=max {
            let pair = delta_pair(n);
            prop_assert!(chebyshev(pair) <= u64::from(radius));
            prop_assert!(seen.insert(pair), "duplicate {pair:?} at n={n}");
        }
        prop_assert_eq!(seen.len() as u64, max);
        prop_assert!(!seen.contains(&(0, 0)));
    }

    /// Every index in ring `r`'s index range lands at Chebyshev distance
    /// exactly `r`. The range bounds come from `spiral_max`, not from the
    /// enumerator's internals.
    #[test]
    fn ring_ranges_have_constant_distance(radius in 1u32..=500, offset in 0u64..64) {
        let lo = spiral_max(radius - 1) + 1;
        let hi = spiral_max(radius);
        let n = lo + offset % (hi - lo + 1);
        prop_assert_eq!(chebyshev(delta_pair(n)), u64::from(radius));
    }

    /// Visiting order is non-decreasing in Chebyshev distance.
    #[test]
    fn distance_is_monotone(n in 1u64..5_000_000) {
        prop_assert!(chebyshev(delta_pair(n)) <= chebyshev(delta_pair(n + 1)));
    }
}
