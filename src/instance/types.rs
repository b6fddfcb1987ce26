//! Core instance types.

use crate::error::Result;

/// A city: a point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// What the engines need from a problem instance.
///
/// Implementations must score any permutation of `0..city_count()` as the
/// total cyclic length of the tour and must reject anything else.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::error::Result;
/// use tsp_metaheur::instance::TourProblem;
/// use tsp_metaheur::tour::validate_tour;
///
/// /// Every hop costs one unit.
/// struct UnitRing(usize);
///
/// impl TourProblem for UnitRing {
///     fn city_count(&self) -> usize {
///         self.0
///     }
///
///     fn tour_length(&self, tour: &[usize]) -> Result<f64> {
///         validate_tour(tour, self.0)?;
///         Ok(if self.0 > 1 { self.0 as f64 } else { 0.0 })
///     }
/// }
///
/// assert_eq!(UnitRing(5).tour_length(&[4, 3, 2, 1, 0]).unwrap(), 5.0);
/// ```
pub trait TourProblem {
    /// Number of cities in the instance.
    fn city_count(&self) -> usize;

    /// Total cyclic length (energy) of `tour`.
    ///
    /// # Errors
    /// Returns [`TspError::InvalidTour`](crate::error::TspError::InvalidTour)
    /// when `tour` is not a permutation of `0..city_count()`.
    fn tour_length(&self, tour: &[usize]) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_distance() {
        let a = City::new(0.0, 0.0);
        let b = City::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
