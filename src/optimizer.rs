//! The contract shared by every solver.

use crate::error::Result;
use crate::instance::TourProblem;
use crate::tour::Tour;

/// A tour together with its energy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub tour: Tour,
    pub energy: f64,
}

/// A solver that turns a problem instance into a tour.
///
/// Implemented by [`SimulatedAnnealing`](crate::sa::SimulatedAnnealing),
/// [`GeneticAlgorithm`](crate::ga::GeneticAlgorithm) and
/// [`Exhaustive`](crate::exhaustive::Exhaustive) so callers can pick an
/// algorithm at runtime.
pub trait Optimizer<P: TourProblem + ?Sized> {
    /// Short algorithm name for logs.
    fn name(&self) -> &'static str;

    /// Runs the solver to completion and returns the best tour found.
    fn optimize(&mut self, problem: &P) -> Result<Solution>;
}

/// The lowest-energy tour observed so far in a run.
///
/// Energy only ever decreases: [`offer`](Self::offer) replaces the record on
/// strict improvement and ignores everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct BestRecord {
    tour: Tour,
    energy: f64,
}

impl BestRecord {
    pub fn new(tour: Tour, energy: f64) -> Self {
        Self { tour, energy }
    }

    /// Copies `tour` into the record if `energy` beats it. Returns whether
    /// the record changed.
    pub fn offer(&mut self, tour: &[usize], energy: f64) -> bool {
        if energy < self.energy {
            self.tour.clear();
            self.tour.extend_from_slice(tour);
            self.energy = energy;
            true
        } else {
            false
        }
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn into_solution(self) -> Solution {
        Solution {
            tour: self.tour,
            energy: self.energy,
        }
    }
}
