//! Property-based tests for the workload shuffle.
//!
//! The shuffle feeds every task in the harness, so its two contracts are
//! load-bearing: the output is always a permutation, and the same seed
//! always reproduces the same order.

use lockgrain::shuffled_indices;
use proptest::prelude::*;

/// Every index in `[0, len)` appears exactly once.
fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }

    let mut seen = vec![false; len];
    for &index in order {
        if index >= len || seen[index] {
            return false;
        }
        seen[index] = true;
    }

    seen.iter().all(|&s| s)
}

proptest! {
    #[test]
    fn always_a_permutation(len in 0usize..256, seed in any::<u64>()) {
        let order = shuffled_indices(len, seed);
        prop_assert!(is_permutation(&order, len));
    }

    #[test]
    fn same_seed_same_order(len in 0usize..256, seed in any::<u64>()) {
        prop_assert_eq!(shuffled_indices(len, seed), shuffled_indices(len, seed));
    }

    #[test]
    fn sorting_recovers_the_identity(len in 1usize..256, seed in any::<u64>()) {
        let mut order = shuffled_indices(len, seed);
        order.sort_unstable();

        let identity: Vec<usize> = (0..len).collect();
        prop_assert_eq!(order, identity);
    }

    #[test]
    fn tiny_inputs_are_identity(seed in any::<u64>()) {
        prop_assert!(shuffled_indices(0, seed).is_empty());
        prop_assert_eq!(shuffled_indices(1, seed), vec![0]);
    }
}
