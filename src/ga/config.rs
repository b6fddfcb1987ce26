//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{Result, TspError};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.num_generations, 300);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_percentage(30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in the population.
    ///
    /// The whole population is replaced every generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub num_generations: usize,

    /// Members drawn per tournament when the default selection is used.
    pub tournament_size: usize,

    /// Chance, in percent (0–100), that a child is mutated.
    pub mutation_percentage: u32,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            num_generations: 300,
            tournament_size: 10,
            mutation_percentage: 100,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation percentage, clamped to 100.
    pub fn with_mutation_percentage(mut self, percentage: u32) -> Self {
        self.mutation_percentage = percentage.min(100);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::Configuration(
                "population_size must be at least 1".into(),
            ));
        }
        if self.num_generations == 0 {
            return Err(TspError::Configuration(
                "num_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TspError::Configuration(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.mutation_percentage > 100 {
            return Err(TspError::Configuration(format!(
                "mutation_percentage must be in 0..=100, got {}",
                self.mutation_percentage
            )));
        }
        Ok(())
    }
}
