//! Problem instances.
//!
//! The engines only see the [`TourProblem`] trait: a city count and a way to
//! score a tour. [`TspInstance`] is the Euclidean implementation used by the
//! binary and the tests. It stores city coordinates and a precomputed,
//! symmetric [`DistanceMatrix`], and can be built from explicit coordinates,
//! generated synthetically, or read from a TSPLIB file.

mod matrix;
mod tsplib;
mod types;

pub use matrix::DistanceMatrix;
pub use types::{City, TourProblem};

use crate::error::{Result, TspError};
use crate::random::EngineRng;
use crate::tour::{edges, validate_tour};
use rand::Rng;
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Radius of the synthetic circular layout.
const CIRCLE_RADIUS: f64 = 100.0;

/// Upper bound (exclusive) of randomly generated coordinates.
const RANDOM_EXTENT: f64 = 999.0;

/// A Euclidean TSP instance with a precomputed distance matrix.
#[derive(Debug, Clone)]
pub struct TspInstance {
    cities: Vec<City>,
    distances: DistanceMatrix,
}

impl TspInstance {
    /// Builds an instance from city coordinates and computes its distance
    /// matrix.
    ///
    /// # Errors
    /// Returns [`TspError::EmptyInstance`] when `cities` is empty and
    /// [`TspError::Configuration`] when a coordinate is not finite.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(TspError::EmptyInstance);
        }
        if let Some((i, city)) = cities
            .iter()
            .enumerate()
            .find(|(_, c)| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(TspError::Configuration(format!(
                "city {i} has a non-finite coordinate ({}, {})",
                city.x, city.y
            )));
        }
        let distances = DistanceMatrix::euclidean(&cities);
        Ok(Self { cities, distances })
    }

    /// Builds an instance from `(x, y)` pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        Self::new(points.iter().map(|&(x, y)| City::new(x, y)).collect())
    }

    /// `n` cities evenly spaced on a circle of radius 100 centred at
    /// (100, 100). The optimal tour visits them in index order.
    pub fn circle(n: usize) -> Result<Self> {
        let d_theta = 2.0 * PI / n as f64;
        let cities = (0..n)
            .map(|i| {
                let theta = d_theta * i as f64;
                City::new(
                    CIRCLE_RADIUS * theta.cos() + CIRCLE_RADIUS,
                    CIRCLE_RADIUS * theta.sin() + CIRCLE_RADIUS,
                )
            })
            .collect();
        Self::new(cities)
    }

    /// `n` cities placed uniformly at random in `[0, 999)²`.
    pub fn random(n: usize, rng: &mut EngineRng) -> Result<Self> {
        let cities = (0..n)
            .map(|_| {
                City::new(
                    rng.random_range(0.0..RANDOM_EXTENT),
                    rng.random_range(0.0..RANDOM_EXTENT),
                )
            })
            .collect();
        Self::new(cities)
    }

    /// Reads the `NODE_COORD_SECTION` of a TSPLIB file.
    pub fn from_tsplib<R: BufRead>(reader: R) -> Result<Self> {
        Self::new(tsplib::read_coordinates(reader)?)
    }

    /// Opens and reads a TSPLIB file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_tsplib(BufReader::new(file))
    }

    /// City coordinates in index order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Distance between cities `i` and `j`.
    pub fn dist(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }
}

impl TourProblem for TspInstance {
    fn city_count(&self) -> usize {
        self.cities.len()
    }

    fn tour_length(&self, tour: &[usize]) -> Result<f64> {
        validate_tour(tour, self.cities.len())?;
        Ok(edges(tour).map(|(a, b)| self.dist(a, b)).sum())
    }
}
