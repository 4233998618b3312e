//! Edit distance is a metric, and suggestions respect the threshold.

use adminctl::matcher::{distance, rank_candidates, threshold, MAX_SUGGESTIONS};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z]{0,12}"
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(a in word()) {
        prop_assert_eq!(distance(&a, &a), 0);
    }

    #[test]
    fn distance_is_symmetric(a in word(), b in word()) {
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn distance_obeys_triangle_inequality(a in word(), b in word(), c in word()) {
        prop_assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));
    }

    #[test]
    fn distance_is_bounded_by_longer_input(a in word(), b in word()) {
        let bound = a.chars().count().max(b.chars().count());
        prop_assert!(distance(&a, &b) <= bound);
    }

    #[test]
    fn ranking_never_exceeds_threshold_or_cap(
        input in "[a-z]{1,10}",
        candidates in prop::collection::vec("[a-z]{1,10}", 0..12),
    ) {
        let ranked = rank_candidates(&input, &candidates, MAX_SUGGESTIONS);
        prop_assert!(ranked.len() <= MAX_SUGGESTIONS);
        for name in &ranked {
            prop_assert!(distance(&input, name) <= threshold(&input));
        }
        for pair in ranked.windows(2) {
            prop_assert!(distance(&input, &pair[0]) <= distance(&input, &pair[1]));
        }
    }
}
