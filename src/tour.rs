//! Tours and their permutation invariant.
//!
//! A tour is an ordered sequence of city indices that implicitly closes into
//! a cycle. A valid tour over `n` cities contains every index in `0..n`
//! exactly once; tours are never resized after creation.

use crate::error::{Result, TspError};

/// A visiting order over city indices.
pub type Tour = Vec<usize>;

/// Returns `true` when `tour` is a permutation of `0..n`.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Checks the permutation invariant, reporting the first violation.
pub fn validate_tour(tour: &[usize], n: usize) -> Result<()> {
    if tour.len() != n {
        return Err(TspError::InvalidTour(format!(
            "expected {n} cities, got {}",
            tour.len()
        )));
    }
    let mut seen = vec![false; n];
    for (pos, &city) in tour.iter().enumerate() {
        if city >= n {
            return Err(TspError::InvalidTour(format!(
                "city {city} at position {pos} is out of range 0..{n}"
            )));
        }
        if seen[city] {
            return Err(TspError::InvalidTour(format!(
                "city {city} appears more than once (again at position {pos})"
            )));
        }
        seen[city] = true;
    }
    Ok(())
}

/// Iterates over the closed edges of a tour, including the edge from the
/// last city back to the first.
pub fn edges(tour: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let closing = match (tour.last(), tour.first()) {
        (Some(&last), Some(&first)) if tour.len() > 1 => Some((last, first)),
        _ => None,
    };
    tour.windows(2).map(|w| (w[0], w[1])).chain(closing)
}
