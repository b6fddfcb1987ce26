//! Permutation crossover and mutation operators.
//!
//! # Crossover Operators
//!
//! - [`OrderedCrossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation Operators
//!
//! - [`ReverseMutation`]: Reverse a random segment (2-opt), O(n)
//! - [`SwapMutation`]: Exchange two random positions, O(1)
//!
//! Unlike the annealing moves, GA operators draw positions from the whole
//! tour `[0, n-1]`; no city is anchored.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::types::{CrossoverOperator, MutationOperator};
use crate::random::EngineRng;
use crate::tour::Tour;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX) for permutations.
///
/// Two cut points are drawn uniformly from `[0, n-1]` and handed to
/// [`ordered_crossover`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedCrossover;

impl CrossoverOperator for OrderedCrossover {
    fn crossover(&self, parent1: &[usize], parent2: &[usize], rng: &mut EngineRng) -> Tour {
        let n = parent1.len();
        if n == 0 {
            return Vec::new();
        }
        let start = rng.random_range(0..n);
        let end = rng.random_range(0..n);
        ordered_crossover(parent1, parent2, start, end)
    }
}

/// Builds one OX child from explicit cut points.
///
/// # Algorithm
///
/// 1. Order the cuts so that `start <= end`
/// 2. Copy `parent1[start..=end]` to the child at the same positions
/// 3. Walk `parent2` left to right and place every city not yet in the
///    child into the next free slot, scanning free slots from index 0
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths or a cut is out of range.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::ga::ordered_crossover;
///
/// let child = ordered_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], 1, 2);
/// assert_eq!(child, vec![4, 1, 2, 3, 0]);
/// ```
pub fn ordered_crossover(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Tour {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n == 0 {
        return Vec::new();
    }
    assert!(start < n && end < n, "cut point out of range");
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    let mut child = vec![usize::MAX; n];
    let mut taken = vec![false; n];
    for i in start..=end {
        child[i] = parent1[i];
        taken[parent1[i]] = true;
    }

    let mut slot = 0;
    for &city in parent2 {
        if taken[city] {
            continue;
        }
        while child[slot] != usize::MAX {
            slot += 1;
        }
        child[slot] = city;
        taken[city] = true;
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Reverse mutation: reverse a random chain of the tour.
///
/// Two positions are drawn from `[0, n-1]`, sorted into `(lo, hi)`, and
/// `tour[lo..hi]` is reversed. Equal positions leave the tour unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseMutation;

impl MutationOperator for ReverseMutation {
    fn mutate(&self, tour: &mut [usize], rng: &mut EngineRng) {
        let n = tour.len();
        if n < 2 {
            return;
        }
        let (lo, hi) = random_segment(n, rng);
        tour[lo..hi].reverse();
    }
}

/// Swap mutation: exchange two random positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation;

impl MutationOperator for SwapMutation {
    fn mutate(&self, tour: &mut [usize], rng: &mut EngineRng) {
        let n = tour.len();
        if n < 2 {
            return;
        }
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        tour.swap(i, j);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick two positions within `0..n` and return them sorted.
fn random_segment(n: usize, rng: &mut EngineRng) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{create_rng, random_permutation};
    use crate::tour::is_permutation;
    use proptest::prelude::*;

    // ---- OX Crossover ----

    #[test]
    fn test_ox_copies_segment_and_fills_in_order() {
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];
        let child = ordered_crossover(&p1, &p2, 2, 4);
        assert_eq!(child, vec![7, 6, 2, 3, 4, 5, 1, 0]);
    }

    #[test]
    fn test_ox_cut_order_is_normalized() {
        let p1 = vec![3, 0, 4, 1, 2];
        let p2 = vec![2, 4, 0, 3, 1];
        assert_eq!(
            ordered_crossover(&p1, &p2, 3, 1),
            ordered_crossover(&p1, &p2, 1, 3)
        );
    }

    #[test]
    fn test_ox_full_segment_clones_parent1() {
        let p1 = vec![2, 0, 3, 1];
        let p2 = vec![0, 1, 2, 3];
        assert_eq!(ordered_crossover(&p1, &p2, 0, 3), p1);
    }

    #[test]
    fn test_ox_identical_parents() {
        let p = vec![4, 2, 0, 1, 3];
        for start in 0..5 {
            for end in 0..5 {
                assert_eq!(ordered_crossover(&p, &p, start, end), p);
            }
        }
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(Some(42));
        assert_eq!(OrderedCrossover.crossover(&[0], &[0], &mut rng), vec![0]);
    }

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(Some(42));
        let p1: Vec<usize> = (0..8).collect();
        let p2: Vec<usize> = (0..8).rev().collect();

        for _ in 0..100 {
            let child = OrderedCrossover.crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&child, 8), "OX child not valid: {child:?}");
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_ox_length_mismatch_panics() {
        ordered_crossover(&[0, 1, 2], &[0, 1], 0, 1);
    }

    // ---- Reverse Mutation ----

    #[test]
    fn test_reverse_preserves_permutation() {
        let mut rng = create_rng(Some(42));
        for _ in 0..100 {
            let mut tour: Vec<usize> = (0..10).collect();
            ReverseMutation.mutate(&mut tour, &mut rng);
            assert!(is_permutation(&tour, 10));
        }
    }

    #[test]
    fn test_reverse_can_move_city_zero() {
        let mut rng = create_rng(Some(11));
        let mut moved = false;
        for _ in 0..200 {
            let mut tour: Vec<usize> = (0..6).collect();
            ReverseMutation.mutate(&mut tour, &mut rng);
            if tour[0] != 0 {
                moved = true;
                break;
            }
        }
        assert!(moved, "position 0 should be eligible for mutation");
    }

    #[test]
    fn test_reverse_flips_exactly_the_sampled_chain() {
        let mut changed = 0;
        for seed in 0..200 {
            let mut rng = create_rng(Some(seed));
            let mut tour: Vec<usize> = (0..8).collect();
            ReverseMutation.mutate(&mut tour, &mut rng);

            let (lo, hi) = random_segment(8, &mut create_rng(Some(seed)));
            let mut expected: Vec<usize> = (0..lo).collect();
            expected.extend((lo..hi).rev());
            expected.extend(hi..8);
            assert_eq!(tour, expected, "seed {seed}: reverse of [{lo}, {hi})");
            if hi - lo >= 2 {
                changed += 1;
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_swap_exchanges_the_sampled_positions() {
        for seed in 0..100 {
            let mut rng = create_rng(Some(seed));
            let mut tour: Vec<usize> = (0..8).collect();
            SwapMutation.mutate(&mut tour, &mut rng);

            let mut twin = create_rng(Some(seed));
            let (i, j) = (twin.random_range(0..8), twin.random_range(0..8));
            let mut expected: Vec<usize> = (0..8).collect();
            expected.swap(i, j);
            assert_eq!(tour, expected, "seed {seed}");
        }
    }

    #[test]
    fn test_reverse_single_element() {
        let mut rng = create_rng(Some(42));
        let mut tour = vec![0];
        ReverseMutation.mutate(&mut tour, &mut rng);
        assert_eq!(tour, vec![0]);
    }

    // ---- Swap Mutation ----

    #[test]
    fn test_swap_changes_at_most_two_positions() {
        let mut rng = create_rng(Some(42));
        for _ in 0..100 {
            let before: Vec<usize> = (0..10).collect();
            let mut after = before.clone();
            SwapMutation.mutate(&mut after, &mut rng);
            assert!(is_permutation(&after, 10));
            let diffs = before.iter().zip(&after).filter(|(a, b)| a != b).count();
            assert!(diffs == 0 || diffs == 2);
        }
    }

    // ---- Random segment helper ----

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(Some(42));
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }

    proptest! {
        #[test]
        fn prop_ox_valid_for_every_cut_order(
            n in 1usize..30,
            seed in any::<u64>(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let mut rng = create_rng(Some(seed));
            let p1 = random_permutation(n, &mut rng);
            let p2 = random_permutation(n, &mut rng);
            let (start, end) = (a.index(n), b.index(n));

            let child = ordered_crossover(&p1, &p2, start, end);
            prop_assert!(is_permutation(&child, n));

            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            prop_assert_eq!(&child[lo..=hi], &p1[lo..=hi]);
        }

        #[test]
        fn prop_mutations_preserve_permutation(n in 1usize..40, seed in any::<u64>()) {
            let mut rng = create_rng(Some(seed));
            let mut tour = random_permutation(n, &mut rng);
            for _ in 0..20 {
                ReverseMutation.mutate(&mut tour, &mut rng);
                SwapMutation.mutate(&mut tour, &mut rng);
                prop_assert!(is_permutation(&tour, n));
            }
        }
    }
}
