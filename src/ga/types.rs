//! Operator traits for the GA.
//!
//! [`SelectionOperator`], [`CrossoverOperator`] and [`MutationOperator`]
//! sit between the generational loop and its strategies. Each receives the
//! run's generator explicitly; operators hold configuration only.

use crate::random::EngineRng;
use crate::tour::Tour;

/// Chooses a parent from the current population.
pub trait SelectionOperator {
    /// Returns the index of the chosen member.
    ///
    /// `energies[i]` is the energy of population member `i`; lower is
    /// better.
    fn select(&self, energies: &[f64], rng: &mut EngineRng) -> usize;
}

/// Recombines two parent tours into one child tour.
///
/// Implementations must return a permutation whenever both parents are
/// permutations of the same length.
pub trait CrossoverOperator {
    fn crossover(&self, parent1: &[usize], parent2: &[usize], rng: &mut EngineRng) -> Tour;
}

/// Perturbs a tour in place.
///
/// The engine decides whether to mutate; an implementation always applies
/// exactly one perturbation when called.
pub trait MutationOperator {
    fn mutate(&self, tour: &mut [usize], rng: &mut EngineRng);
}
