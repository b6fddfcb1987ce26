//! Cooling schedules.
//!
//! A schedule supplies the starting temperature and maps each temperature to
//! the next one. Every schedule here is monotonically non-increasing and
//! clamped at a strictly positive floor, because the acceptance test divides
//! by the temperature.
//!
//! # References
//!
//! - Geometric: standard textbook approach
//! - Linear: fixed-duration cooling
//! - LundyMees: Lundy & Mees (1986), with convergence proof

use crate::error::{Result, TspError};

/// Maps a temperature to the next one.
///
/// Implementations must satisfy `floor <= next_temperature(t) <= t` for every
/// reachable `t`, with a floor strictly above zero.
pub trait CoolingSchedule {
    /// Temperature at the start of a run.
    fn initial_temperature(&self) -> f64;

    /// Temperature of the next outer loop.
    fn next_temperature(&self, current: f64) -> f64;
}

fn check_bounds(initial: f64, floor: f64) -> Result<()> {
    if !(floor > 0.0) || !floor.is_finite() {
        return Err(TspError::Configuration(format!(
            "floor temperature must be positive and finite, got {floor}"
        )));
    }
    if !initial.is_finite() || initial < floor {
        return Err(TspError::Configuration(format!(
            "initial temperature {initial} must be finite and at least the floor {floor}"
        )));
    }
    Ok(())
}

/// Geometric (exponential) cooling: `T' = max(alpha * T, floor)`.
///
/// Most widely used. Typical `alpha`: 0.95–0.99.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::sa::{CoolingSchedule, GeometricCooling};
///
/// let schedule = GeometricCooling::new(100.0, 0.01, 0.99).unwrap();
/// assert_eq!(schedule.initial_temperature(), 100.0);
/// assert!((schedule.next_temperature(100.0) - 99.0).abs() < 1e-9);
/// assert_eq!(schedule.next_temperature(0.01), 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricCooling {
    initial: f64,
    floor: f64,
    alpha: f64,
}

impl GeometricCooling {
    /// # Errors
    /// Rejects `alpha` outside `(0, 1)`, a non-positive floor, or an initial
    /// temperature below the floor.
    pub fn new(initial: f64, floor: f64, alpha: f64) -> Result<Self> {
        check_bounds(initial, floor)?;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TspError::Configuration(format!(
                "geometric alpha must be in (0, 1), got {alpha}"
            )));
        }
        Ok(Self {
            initial,
            floor,
            alpha,
        })
    }
}

impl CoolingSchedule for GeometricCooling {
    fn initial_temperature(&self) -> f64 {
        self.initial
    }

    fn next_temperature(&self, current: f64) -> f64 {
        (current * self.alpha).max(self.floor)
    }
}

/// Linear cooling: the gap between the initial temperature and the floor is
/// closed in `steps` equal decrements.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearCooling {
    initial: f64,
    floor: f64,
    decrement: f64,
}

impl LinearCooling {
    /// # Errors
    /// Rejects zero `steps` and invalid temperature bounds.
    pub fn new(initial: f64, floor: f64, steps: usize) -> Result<Self> {
        check_bounds(initial, floor)?;
        if steps == 0 {
            return Err(TspError::Configuration(
                "linear cooling needs at least one step".into(),
            ));
        }
        Ok(Self {
            initial,
            floor,
            decrement: (initial - floor) / steps as f64,
        })
    }
}

impl CoolingSchedule for LinearCooling {
    fn initial_temperature(&self) -> f64 {
        self.initial
    }

    fn next_temperature(&self, current: f64) -> f64 {
        (current - self.decrement).max(self.floor)
    }
}

/// Lundy-Mees cooling: `T' = max(T / (1 + beta * T), floor)`.
///
/// Cools fast at high T, slow at low T.
///
/// Reference: Lundy & Mees (1986)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LundyMeesCooling {
    initial: f64,
    floor: f64,
    beta: f64,
}

impl LundyMeesCooling {
    /// # Errors
    /// Rejects a non-positive `beta` and invalid temperature bounds.
    pub fn new(initial: f64, floor: f64, beta: f64) -> Result<Self> {
        check_bounds(initial, floor)?;
        if !(beta > 0.0) || !beta.is_finite() {
            return Err(TspError::Configuration(format!(
                "lundy-mees beta must be positive, got {beta}"
            )));
        }
        Ok(Self {
            initial,
            floor,
            beta,
        })
    }

    /// Picks `beta` so that the floor is reached after about `steps`
    /// temperature updates.
    pub fn with_steps(initial: f64, floor: f64, steps: usize) -> Result<Self> {
        check_bounds(initial, floor)?;
        let beta = (initial - floor) / (steps.max(1) as f64 * initial * floor);
        Self::new(initial, floor, beta.max(f64::MIN_POSITIVE))
    }
}

impl CoolingSchedule for LundyMeesCooling {
    fn initial_temperature(&self) -> f64 {
        self.initial
    }

    fn next_temperature(&self, current: f64) -> f64 {
        (current / (1.0 + self.beta * current)).max(self.floor)
    }
}
