//! Genetic Algorithm (GA).
//!
//! A generational GA over a population of tours. Each generation is bred
//! from the previous one through pluggable operators and replaces it
//! wholesale; the best tour ever seen is tracked separately.
//!
//! # Core Traits
//!
//! - [`SelectionOperator`]: picks a parent index from population energies
//! - [`CrossoverOperator`]: recombines two parents into one child
//! - [`MutationOperator`]: perturbs a child in place
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, generations, rates)
//! - [`GeneticAlgorithm`]: Executes the generational loop
//! - [`GaResult`]: Final optimization result with per-generation statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use operators::{ordered_crossover, OrderedCrossover, ReverseMutation, SwapMutation};
pub use runner::{GaResult, GeneticAlgorithm};
pub use selection::{RankSelection, TournamentSelection};
pub use types::{CrossoverOperator, MutationOperator, SelectionOperator};
