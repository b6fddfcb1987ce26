//! Selection strategies for the GA.
//!
//! All strategies assume **minimization** (lower energy = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::SelectionOperator;
use crate::random::EngineRng;
use rand::Rng;
use std::cell::RefCell;

/// Tournament selection: draw `k` members uniformly with replacement and
/// keep the one with the lowest energy.
///
/// Higher `k` = stronger selection pressure.
/// - k=2: light pressure (good for diversity)
/// - k=3-5: moderate pressure (typical default)
/// - k>5: strong pressure (risk of premature convergence)
///
/// Ties go to the member drawn first. A size of 0 is treated as 1.
///
/// # Complexity
/// O(k) per selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    size: usize,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SelectionOperator for TournamentSelection {
    /// # Panics
    /// Panics if `energies` is empty.
    fn select(&self, energies: &[f64], rng: &mut EngineRng) -> usize {
        assert!(!energies.is_empty(), "cannot select from empty population");
        let n = energies.len();

        let mut best_idx = rng.random_range(0..n);
        for _ in 1..self.size {
            let idx = rng.random_range(0..n);
            if energies[idx] < energies[best_idx] {
                best_idx = idx;
            }
        }
        best_idx
    }
}

/// Rank-based selection.
///
/// Members are sorted by energy and picked with probability proportional to
/// their rank position (best rank gets weight n, worst gets 1), not to raw
/// energy. This avoids the scaling problems of fitness-proportionate schemes.
///
/// The rank order is cached and rebuilt only when the energies change, so
/// the sort runs once per generation rather than once per parent.
///
/// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
/// Algorithms"
///
/// # Complexity
/// O(n log n) for the first selection of a generation, O(n) afterwards
#[derive(Debug, Clone, Default)]
pub struct RankSelection {
    cache: RefCell<RankOrder>,
}

/// Population energies and member indices sorted best first.
#[derive(Debug, Clone, Default)]
struct RankOrder {
    energies: Vec<f64>,
    order: Vec<usize>,
}

impl RankOrder {
    fn refresh(&mut self, energies: &[f64]) {
        if self.energies.as_slice() == energies {
            return;
        }
        self.energies.clear();
        self.energies.extend_from_slice(energies);
        self.order.clear();
        self.order.extend(0..energies.len());
        self.order.sort_by(|&a, &b| {
            energies[a]
                .partial_cmp(&energies[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

impl RankSelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionOperator for RankSelection {
    /// # Panics
    /// Panics if `energies` is empty.
    fn select(&self, energies: &[f64], rng: &mut EngineRng) -> usize {
        assert!(!energies.is_empty(), "cannot select from empty population");
        let n = energies.len();
        if n == 1 {
            return 0;
        }

        let mut cache = self.cache.borrow_mut();
        cache.refresh(energies);

        let total = (n * (n + 1)) as f64 / 2.0;
        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for (rank, &idx) in cache.order.iter().enumerate() {
            cumulative += (n - rank) as f64;
            if cumulative > threshold {
                return idx;
            }
        }

        cache.order[n - 1] // floating-point fallback
    }
}
