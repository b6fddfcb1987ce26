//! Random number generation for solver runs.
//!
//! Every run owns exactly one [`EngineRng`], created once by [`create_rng`]
//! and threaded through all random draws of that run (initial shuffles, move
//! sampling, acceptance tests, tournaments, crossover cuts, mutations).
//! Passing a seed makes a run reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The generator type owned by a single solver run.
pub type EngineRng = StdRng;

/// Creates the run generator, seeded when `seed` is given and from the
/// operating system otherwise.
pub fn create_rng(seed: Option<u64>) -> EngineRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Identity permutation of `0..n`.
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// A uniformly random permutation of `0..n`.
pub fn random_permutation(n: usize, rng: &mut EngineRng) -> Vec<usize> {
    let mut tour = identity(n);
    tour.shuffle(rng);
    tour
}

/// A random permutation of `0..n` with city 0 fixed at position 0.
pub fn anchored_permutation(n: usize, rng: &mut EngineRng) -> Vec<usize> {
    let mut tour = identity(n);
    if n > 1 {
        tour[1..].shuffle(rng);
    }
    tour
}
