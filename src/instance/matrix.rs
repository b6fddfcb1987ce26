//! Dense distance matrix.

use super::types::City;

/// Symmetric pairwise distances with a zero diagonal, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes Euclidean distances between all pairs of `cities`.
    ///
    /// Only the upper triangle is computed; each value is mirrored so the
    /// matrix is exactly symmetric.
    pub fn euclidean(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Distance between `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index out of range");
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}
