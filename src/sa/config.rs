//! SA configuration.

use crate::error::{Result, TspError};

/// Loop bounds and reporting cadence for simulated annealing.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_outer_loops(300)
///     .with_inner_loops(100)
///     .with_notification_cycle(100)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Number of temperature steps.
    pub outer_loops: usize,

    /// Markov chain length at each temperature.
    pub inner_loops: usize,

    /// Observers are notified every this many inner iterations, counted
    /// across the whole run.
    pub notification_cycle: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            outer_loops: 100,
            inner_loops: 1000,
            notification_cycle: 250,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_outer_loops(mut self, n: usize) -> Self {
        self.outer_loops = n;
        self
    }

    pub fn with_inner_loops(mut self, n: usize) -> Self {
        self.inner_loops = n;
        self
    }

    pub fn with_notification_cycle(mut self, n: usize) -> Self {
        self.notification_cycle = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total number of proposals a full run evaluates.
    pub fn total_iterations(&self) -> usize {
        self.outer_loops.saturating_mul(self.inner_loops)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.outer_loops == 0 {
            return Err(TspError::Configuration(
                "outer_loops must be at least 1".into(),
            ));
        }
        if self.inner_loops == 0 {
            return Err(TspError::Configuration(
                "inner_loops must be at least 1".into(),
            ));
        }
        if self.notification_cycle == 0 {
            return Err(TspError::Configuration(
                "notification_cycle must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.outer_loops, 100);
        assert_eq!(config.inner_loops, 1000);
        assert_eq!(config.notification_cycle, 250);
        assert!(config.seed.is_none());
        assert_eq!(config.total_iterations(), 100_000);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_loops() {
        assert!(SaConfig::default().with_outer_loops(0).validate().is_err());
        assert!(SaConfig::default().with_inner_loops(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_cycle() {
        let config = SaConfig::default().with_notification_cycle(0);
        assert!(matches!(config.validate(), Err(TspError::Configuration(_))));
    }
}
