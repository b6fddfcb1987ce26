//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima.
//!
//! The engine runs an outer loop over temperatures and, at each temperature,
//! an inner Markov chain of proposals produced by randomly chosen [`Move`]s.
//! Moves and the [`CoolingSchedule`] are strategy objects, so new
//! neighborhoods or schedules plug in without touching the loop.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod cooling;
mod moves;
mod runner;

pub use config::SaConfig;
pub use cooling::{CoolingSchedule, GeometricCooling, LinearCooling, LundyMeesCooling};
pub use moves::{Move, MoveService, ReverseMove, RotateMove, SwapMove};
pub use runner::{SaResult, SimulatedAnnealing};
