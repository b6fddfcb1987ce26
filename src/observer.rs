//! Progress reporting.
//!
//! Engines push a fresh, read-only [`ProgressSnapshot`] to every registered
//! [`Observer`] on their notification cadence and once more when the run
//! terminates. Observers run synchronously on the engine's own path, in
//! registration order; the engine waits for each call to return, so a slow
//! or blocking observer slows the whole run down.
//!
//! An observer steers the run through its return value:
//! [`ObserverAction::Stop`] asks the engine to skip its remaining iterations
//! and terminate normally, and an `Err` aborts the run with no result.
//!
//! # Examples
//!
//! ```
//! use tsp_metaheur::instance::TspInstance;
//! use tsp_metaheur::observer::{from_fn, ObserverAction, ProgressSnapshot};
//!
//! let mut seen = 0usize;
//! let observer = from_fn(|_: &TspInstance, snapshot: &ProgressSnapshot<'_>| {
//!     seen += 1;
//!     Ok(if snapshot.best_energy < 10.0 {
//!         ObserverAction::Stop
//!     } else {
//!         ObserverAction::Continue
//!     })
//! });
//! # drop(observer);
//! ```

use crate::error::Result;
use tracing::{debug, info};

/// What the engine should do after a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverAction {
    /// Keep iterating.
    #[default]
    Continue,
    /// Stop iterating and terminate with the best tour found so far.
    Stop,
}

/// Algorithm-specific loop counters carried by a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress<'a> {
    /// Simulated annealing position.
    Annealing {
        /// Outer (temperature) loop index.
        outer: usize,
        /// Inner (Markov chain) loop index.
        inner: usize,
        /// Total inner iterations completed over the whole run.
        iteration: usize,
        /// Temperature of the current outer loop.
        temperature: f64,
        /// Energy of the most recent proposal.
        proposed_energy: f64,
    },
    /// Genetic algorithm position.
    Evolution {
        /// Zero-based generation index.
        generation: usize,
        /// Arithmetic mean energy of the generation.
        mean_energy: f64,
        /// Energy of every member, in population order.
        population_energies: &'a [f64],
    },
    /// Exhaustive enumeration position.
    Enumeration {
        /// Permutations evaluated so far.
        evaluated: u64,
    },
}

/// Immutable view of an engine's state at one notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot<'a> {
    /// The engine's current tour.
    pub tour: &'a [usize],
    /// Energy of `tour`.
    pub energy: f64,
    /// Best tour observed so far.
    pub best_tour: &'a [usize],
    /// Energy of `best_tour`.
    pub best_energy: f64,
    /// Loop counters.
    pub progress: Progress<'a>,
    /// `true` only for the final notification of a run.
    pub terminated: bool,
}

/// A sink for progress snapshots.
pub trait Observer<P: ?Sized> {
    /// Handles one snapshot.
    ///
    /// # Errors
    /// Any error aborts the run that issued the notification.
    fn notify(&mut self, problem: &P, snapshot: &ProgressSnapshot<'_>) -> Result<ObserverAction>;
}

/// Adapter turning a closure into an [`Observer`].
pub struct FnObserver<F>(F);

/// Wraps `f` as an observer.
pub fn from_fn<P, F>(f: F) -> FnObserver<F>
where
    P: ?Sized,
    F: FnMut(&P, &ProgressSnapshot<'_>) -> Result<ObserverAction>,
{
    FnObserver(f)
}

impl<P, F> Observer<P> for FnObserver<F>
where
    P: ?Sized,
    F: FnMut(&P, &ProgressSnapshot<'_>) -> Result<ObserverAction>,
{
    fn notify(&mut self, problem: &P, snapshot: &ProgressSnapshot<'_>) -> Result<ObserverAction> {
        (self.0)(problem, snapshot)
    }
}

/// Reports snapshots as `tracing` events.
///
/// Periodic snapshots are logged at `debug`, the final one at `info`.
#[derive(Debug, Clone, Default)]
pub struct LogObserver {
    label: Option<String>,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every event with `label`.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

impl<P: ?Sized> Observer<P> for LogObserver {
    fn notify(&mut self, _problem: &P, snapshot: &ProgressSnapshot<'_>) -> Result<ObserverAction> {
        let label = self.label.as_deref().unwrap_or("run");
        if snapshot.terminated {
            info!(
                label,
                best_energy = snapshot.best_energy,
                cities = snapshot.best_tour.len(),
                "run terminated"
            );
            return Ok(ObserverAction::Continue);
        }

        match snapshot.progress {
            Progress::Annealing {
                outer,
                inner,
                iteration,
                temperature,
                ..
            } => debug!(
                label,
                outer,
                inner,
                iteration,
                temperature,
                energy = snapshot.energy,
                best_energy = snapshot.best_energy,
                "annealing progress"
            ),
            Progress::Evolution {
                generation,
                mean_energy,
                ..
            } => debug!(
                label,
                generation,
                mean_energy,
                best_energy = snapshot.best_energy,
                "evolution progress"
            ),
            Progress::Enumeration { evaluated } => debug!(
                label,
                evaluated,
                best_energy = snapshot.best_energy,
                "enumeration progress"
            ),
        }
        Ok(ObserverAction::Continue)
    }
}

/// Delivers `snapshot` to every observer in registration order.
///
/// All observers see the event even if an earlier one asked to stop; the
/// first error short-circuits.
pub(crate) fn broadcast<P: ?Sized>(
    observers: &mut [Box<dyn Observer<P> + '_>],
    problem: &P,
    snapshot: &ProgressSnapshot<'_>,
) -> Result<ObserverAction> {
    let mut action = ObserverAction::Continue;
    for observer in observers.iter_mut() {
        if observer.notify(problem, snapshot)? == ObserverAction::Stop {
            action = ObserverAction::Stop;
        }
    }
    Ok(action)
}
