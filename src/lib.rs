//! Metaheuristic solvers for the Traveling Salesman Problem.
//!
//! Provides two heuristic engines and an exact baseline over a shared
//! problem and reporting contract:
//!
//! - **Simulated Annealing (SA)**: a single tour evolved by randomly chosen
//!   neighborhood moves under a pluggable cooling schedule.
//! - **Genetic Algorithm (GA)**: a population of tours bred through pluggable
//!   selection, crossover, and mutation operators.
//! - **Exhaustive**: brute-force enumeration for small instances.
//!
//! # Architecture
//!
//! The engines only know the [`TourProblem`](instance::TourProblem) trait
//! (a city count and a tour scorer). Strategies are trait objects registered
//! on the engine before a run. Each run owns one random generator
//! ([`random::create_rng`]) that every random draw goes through, so a seeded
//! run is reproducible. Progress is pushed synchronously to registered
//! [`Observer`](observer::Observer)s, which may ask the run to stop.
//!
//! # Example
//!
//! ```
//! use tsp_metaheur::instance::TspInstance;
//! use tsp_metaheur::optimizer::Optimizer;
//! use tsp_metaheur::sa::{GeometricCooling, ReverseMove, SaConfig, SimulatedAnnealing};
//!
//! let instance = TspInstance::circle(8).unwrap();
//! let config = SaConfig::default().with_outer_loops(50).with_inner_loops(100).with_seed(7);
//! let schedule = GeometricCooling::new(100.0, 1e-2, 0.9).unwrap();
//!
//! let mut sa = SimulatedAnnealing::new(config, schedule).unwrap().with_move(ReverseMove);
//! let solution = sa.optimize(&instance).unwrap();
//! assert_eq!(solution.tour.len(), 8);
//! ```

pub mod error;
pub mod exhaustive;
pub mod ga;
pub mod instance;
pub mod observer;
pub mod optimizer;
pub mod random;
pub mod sa;
pub mod tour;
