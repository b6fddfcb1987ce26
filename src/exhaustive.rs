//! Brute-force baseline.
//!
//! Enumerates every tour that starts at city 0 and keeps the shortest. The
//! search visits `(n-1)!` tours, so it is only usable for small instances; it
//! exists to check the heuristics against a known optimum.

use crate::error::{Result, TspError};
use crate::instance::TourProblem;
use crate::observer::{broadcast, Observer, ObserverAction, Progress, ProgressSnapshot};
use crate::optimizer::{BestRecord, Optimizer, Solution};
use crate::random::identity;
use crate::tour::Tour;
use std::time::Instant;
use tracing::{debug, info};

/// Largest instance enumerated by default (10! tours).
pub const DEFAULT_MAX_CITIES: usize = 11;

const DEFAULT_NOTIFICATION_CYCLE: u64 = 100_000;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExhaustiveResult {
    pub best_tour: Tour,
    pub best_energy: f64,
    /// Number of tours scored.
    pub evaluated: u64,
    /// Whether an observer asked the search to stop.
    pub stopped_early: bool,
}

/// Exact solver over all tours anchored at city 0.
///
/// Tours are visited in lexicographic order of positions `1..n`; the first
/// shortest tour in that order is returned.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::exhaustive::Exhaustive;
/// use tsp_metaheur::instance::TspInstance;
///
/// let points = [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)];
/// let square = TspInstance::from_points(&points).unwrap();
/// let result = Exhaustive::new().run(&square).unwrap();
/// assert!((result.best_energy - 4.0).abs() < 1e-9);
/// assert_eq!(result.evaluated, 6);
/// ```
pub struct Exhaustive<'a, P: ?Sized> {
    max_cities: usize,
    notification_cycle: u64,
    observers: Vec<Box<dyn Observer<P> + 'a>>,
}

impl<'a, P: ?Sized> Default for Exhaustive<'a, P> {
    fn default() -> Self {
        Self {
            max_cities: DEFAULT_MAX_CITIES,
            notification_cycle: DEFAULT_NOTIFICATION_CYCLE,
            observers: Vec::new(),
        }
    }
}

impl<'a, P: TourProblem + ?Sized> Exhaustive<'a, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest city count the search accepts.
    pub fn with_max_cities(mut self, limit: usize) -> Self {
        self.max_cities = limit;
        self
    }

    /// Observers are notified every `cycle` scored tours (0 is treated as 1).
    pub fn with_notification_cycle(mut self, cycle: u64) -> Self {
        self.notification_cycle = cycle.max(1);
        self
    }

    pub fn with_observer(mut self, observer: impl Observer<P> + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Enumerates all anchored tours of `problem`.
    ///
    /// # Errors
    /// - [`TspError::EmptyInstance`] if the problem has no cities
    /// - [`TspError::TooManyCities`] above the configured limit
    /// - any error from the problem or from an observer
    pub fn run(&mut self, problem: &P) -> Result<ExhaustiveResult> {
        let n = problem.city_count();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }
        if n > self.max_cities {
            return Err(TspError::TooManyCities {
                cities: n,
                limit: self.max_cities,
            });
        }

        let started = Instant::now();
        info!(cities = n, "exhaustive search started");

        let mut tour = identity(n);
        let mut energy = problem.tour_length(&tour)?;
        let mut best = BestRecord::new(tour.clone(), energy);
        let mut evaluated = 0u64;
        let mut stopped_early = false;

        loop {
            evaluated += 1;
            best.offer(&tour, energy);

            if evaluated % self.notification_cycle == 0 {
                let snapshot = ProgressSnapshot {
                    tour: &tour,
                    energy,
                    best_tour: best.tour(),
                    best_energy: best.energy(),
                    progress: Progress::Enumeration { evaluated },
                    terminated: false,
                };
                if broadcast(&mut self.observers, problem, &snapshot)? == ObserverAction::Stop {
                    debug!(evaluated, "stop requested by observer");
                    stopped_early = true;
                    break;
                }
            }

            if !next_permutation(&mut tour[1..]) {
                break;
            }
            energy = problem.tour_length(&tour)?;
        }

        let snapshot = ProgressSnapshot {
            tour: best.tour(),
            energy: best.energy(),
            best_tour: best.tour(),
            best_energy: best.energy(),
            progress: Progress::Enumeration { evaluated },
            terminated: true,
        };
        broadcast(&mut self.observers, problem, &snapshot)?;

        info!(
            best_energy = best.energy(),
            evaluated,
            stopped_early,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "exhaustive search finished"
        );

        let Solution { tour, energy } = best.into_solution();
        Ok(ExhaustiveResult {
            best_tour: tour,
            best_energy: energy,
            evaluated,
            stopped_early,
        })
    }
}

impl<'a, P: TourProblem + ?Sized> Optimizer<P> for Exhaustive<'a, P> {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn optimize(&mut self, problem: &P) -> Result<Solution> {
        let result = self.run(problem)?;
        Ok(Solution {
            tour: result.best_tour,
            energy: result.best_energy,
        })
    }
}

/// Advances `xs` to the next lexicographic permutation.
///
/// Returns `false` (leaving `xs` sorted ascending) once the last permutation
/// has been passed.
fn next_permutation(xs: &mut [usize]) -> bool {
    if xs.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `i`.
    let mut i = xs.len() - 1;
    while i > 0 && xs[i - 1] >= xs[i] {
        i -= 1;
    }
    if i == 0 {
        xs.reverse();
        return false;
    }

    let mut j = xs.len() - 1;
    while xs[j] <= xs[i - 1] {
        j -= 1;
    }
    xs.swap(i - 1, j);
    xs[i..].reverse();
    true
}
