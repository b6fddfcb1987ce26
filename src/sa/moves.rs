//! Neighborhood moves for simulated annealing.
//!
//! A [`Move`] perturbs a tour in place using positions drawn from a
//! [`MoveService`]. The service is created by the engine for a single run and
//! handed to every `propose` call, so move objects carry no per-run state and
//! can be shared between runs.
//!
//! Positions are sampled from `[1, n-1]`: position 0 never takes part in a
//! move, which keeps city 0 anchored at the head of annealing tours.

use crate::random::EngineRng;
use rand::Rng;

/// Samples tour positions for one run.
pub struct MoveService<'r> {
    rng: &'r mut EngineRng,
    city_count: usize,
}

impl<'r> MoveService<'r> {
    pub fn new(rng: &'r mut EngineRng, city_count: usize) -> Self {
        Self { rng, city_count }
    }

    /// A position drawn uniformly from `[1, n-1]`.
    ///
    /// Tours with fewer than two cities have no such position; 0 is returned
    /// so that every move degenerates to a no-op.
    pub fn sample(&mut self) -> usize {
        if self.city_count < 2 {
            0
        } else {
            self.rng.random_range(1..self.city_count)
        }
    }

    /// Two sampled positions, sorted ascending.
    pub fn sample_pair(&mut self) -> (usize, usize) {
        let a = self.sample();
        let b = self.sample();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// The run generator backing the service.
    pub fn rng(&mut self) -> &mut EngineRng {
        &mut *self.rng
    }
}

/// A neighborhood move.
pub trait Move {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Mutates `tour` into a random neighbor.
    fn propose(&self, tour: &mut [usize], service: &mut MoveService<'_>);
}

/// Exchanges the cities at two sampled positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMove;

impl Move for SwapMove {
    fn name(&self) -> &str {
        "swap"
    }

    fn propose(&self, tour: &mut [usize], service: &mut MoveService<'_>) {
        let i = service.sample();
        let j = service.sample();
        tour.swap(i, j);
    }
}

/// Reverses the chain between two sampled positions (2-opt style).
///
/// The positions are sorted into `(lo, hi)` and `tour[lo..hi]` is reversed;
/// `hi` itself stays in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseMove;

impl Move for ReverseMove {
    fn name(&self) -> &str {
        "reverse"
    }

    fn propose(&self, tour: &mut [usize], service: &mut MoveService<'_>) {
        let (lo, hi) = service.sample_pair();
        tour[lo..hi].reverse();
    }
}

/// Rotates a window of the tour.
///
/// Three positions are sampled and sorted into `(a, b, c)`; the window
/// `tour[a..c]` is rotated left so that the element previously at `b` comes
/// first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateMove;

impl Move for RotateMove {
    fn name(&self) -> &str {
        "rotate"
    }

    fn propose(&self, tour: &mut [usize], service: &mut MoveService<'_>) {
        let mut c = [service.sample(), service.sample(), service.sample()];
        c.sort_unstable();
        let [a, b, end] = c;
        tour[a..end].rotate_left(b - a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tour::is_permutation;
    use proptest::prelude::*;

    fn moves() -> Vec<Box<dyn Move>> {
        vec![Box::new(SwapMove), Box::new(ReverseMove), Box::new(RotateMove)]
    }

    #[test]
    fn test_sample_range_excludes_zero() {
        let mut rng = create_rng(Some(42));
        let mut service = MoveService::new(&mut rng, 6);
        let mut seen = [false; 6];
        for _ in 0..2000 {
            let s = service.sample();
            assert!((1..6).contains(&s), "sample {s} out of [1, 5]");
            seen[s] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s), "every position should be drawn");
    }

    #[test]
    fn test_sample_pair_sorted() {
        let mut rng = create_rng(Some(5));
        let mut service = MoveService::new(&mut rng, 10);
        for _ in 0..500 {
            let (lo, hi) = service.sample_pair();
            assert!(lo <= hi);
        }
    }

    #[test]
    fn test_tiny_tours_are_untouched() {
        let mut rng = create_rng(Some(1));
        let mut service = MoveService::new(&mut rng, 1);
        for m in moves() {
            let mut tour = vec![0];
            m.propose(&mut tour, &mut service);
            assert_eq!(tour, vec![0]);
        }
    }

    #[test]
    fn test_two_city_tour_is_fixed() {
        // Only position 1 can be sampled, so nothing moves.
        let mut rng = create_rng(Some(9));
        let mut service = MoveService::new(&mut rng, 2);
        for m in moves() {
            for _ in 0..20 {
                let mut tour = vec![0, 1];
                m.propose(&mut tour, &mut service);
                assert_eq!(tour, vec![0, 1], "{} changed a 2-city tour", m.name());
            }
        }
    }

    #[test]
    fn test_moves_keep_city_zero_anchored() {
        let mut rng = create_rng(Some(77));
        let mut service = MoveService::new(&mut rng, 9);
        for m in moves() {
            let mut tour: Vec<usize> = (0..9).collect();
            for _ in 0..200 {
                m.propose(&mut tour, &mut service);
                assert_eq!(tour[0], 0, "{} moved the anchor", m.name());
            }
        }
    }

    #[test]
    fn test_swap_changes_at_most_two_positions() {
        let mut rng = create_rng(Some(3));
        let mut service = MoveService::new(&mut rng, 8);
        for _ in 0..100 {
            let before: Vec<usize> = (0..8).collect();
            let mut after = before.clone();
            SwapMove.propose(&mut after, &mut service);
            let diffs = before.iter().zip(&after).filter(|(a, b)| a != b).count();
            assert!(diffs == 0 || diffs == 2);
        }
    }

    /// Runs `m` on a fresh identity tour and returns it together with a twin
    /// service that has not drawn anything yet, so the test can replay the
    /// positions the move sampled.
    fn apply_with_replay(m: &dyn Move, n: usize, seed: u64) -> (Vec<usize>, EngineRng) {
        let mut rng = create_rng(Some(seed));
        let mut tour: Vec<usize> = (0..n).collect();
        m.propose(&mut tour, &mut MoveService::new(&mut rng, n));
        (tour, create_rng(Some(seed)))
    }

    #[test]
    fn test_swap_exchanges_sampled_positions() {
        for seed in 0..200 {
            let (tour, mut twin) = apply_with_replay(&SwapMove, 9, seed);
            let mut replay = MoveService::new(&mut twin, 9);
            let (i, j) = (replay.sample(), replay.sample());

            let mut expected: Vec<usize> = (0..9).collect();
            expected[i] = j;
            expected[j] = i;
            assert_eq!(tour, expected, "seed {seed}: swap of {i} and {j}");
        }
    }

    #[test]
    fn test_reverse_flips_half_open_chain() {
        let mut changed = 0;
        for seed in 0..200 {
            let (tour, mut twin) = apply_with_replay(&ReverseMove, 9, seed);
            let (lo, hi) = MoveService::new(&mut twin, 9).sample_pair();

            let mut expected: Vec<usize> = (0..lo).collect();
            expected.extend((lo..hi).rev());
            expected.extend(hi..9);
            assert_eq!(tour, expected, "seed {seed}: reverse of [{lo}, {hi})");
            if hi - lo >= 2 {
                changed += 1;
            }
        }
        assert!(changed > 0, "no seed produced a real reversal");
    }

    #[test]
    fn test_rotate_brings_middle_sample_to_front() {
        let mut changed = 0;
        for seed in 0..200 {
            let (tour, mut twin) = apply_with_replay(&RotateMove, 9, seed);
            let mut replay = MoveService::new(&mut twin, 9);
            let mut c = [replay.sample(), replay.sample(), replay.sample()];
            c.sort_unstable();
            let [a, b, end] = c;

            // [..a] ++ [b..end] ++ [a..b] ++ [end..]
            let mut expected: Vec<usize> = (0..a).collect();
            expected.extend(b..end);
            expected.extend(a..b);
            expected.extend(end..9);
            assert_eq!(tour, expected, "seed {seed}: rotate ({a}, {b}, {end})");
            if a < b && b < end {
                changed += 1;
            }
        }
        assert!(changed > 0, "no seed produced a real rotation");
    }

    proptest! {
        #[test]
        fn prop_moves_preserve_permutation(
            n in 2usize..40,
            seed in any::<u64>(),
            steps in 1usize..50,
        ) {
            let mut rng = create_rng(Some(seed));
            let mut service = MoveService::new(&mut rng, n);
            for m in moves() {
                let mut tour: Vec<usize> = (0..n).collect();
                for _ in 0..steps {
                    m.propose(&mut tour, &mut service);
                    prop_assert!(is_permutation(&tour, n));
                }
            }
        }
    }
}
