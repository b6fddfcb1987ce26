//! SA execution loop.

use super::config::SaConfig;
use super::cooling::CoolingSchedule;
use super::moves::{Move, MoveService};
use crate::error::{Result, TspError};
use crate::instance::TourProblem;
use crate::observer::{broadcast, Observer, ObserverAction, Progress, ProgressSnapshot};
use crate::optimizer::{BestRecord, Optimizer, Solution};
use crate::random::{anchored_permutation, create_rng};
use crate::tour::Tour;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best tour found.
    pub best_tour: Tour,

    /// Energy of the best tour.
    pub best_energy: f64,

    /// Total number of proposals evaluated.
    pub iterations: usize,

    /// Temperature of the last outer loop.
    pub final_temperature: f64,

    /// Number of accepted proposals (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving proposals.
    pub improving_moves: usize,

    /// Whether an observer asked the run to stop.
    pub stopped_early: bool,

    /// Best energy at the end of each completed outer loop.
    pub best_energy_history: Vec<f64>,
}

/// Simulated annealing over a single tour.
///
/// The engine owns the loop; moves, the cooling schedule and observers are
/// strategy objects registered before the run.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::instance::TspInstance;
/// use tsp_metaheur::sa::{GeometricCooling, ReverseMove, SaConfig, SimulatedAnnealing, SwapMove};
///
/// let instance = TspInstance::circle(10).unwrap();
/// let config = SaConfig::default()
///     .with_outer_loops(100)
///     .with_inner_loops(100)
///     .with_seed(42);
/// let schedule = GeometricCooling::new(100.0, 0.01, 0.95).unwrap();
///
/// let mut sa = SimulatedAnnealing::new(config, schedule)
///     .unwrap()
///     .with_move(SwapMove)
///     .with_move(ReverseMove);
/// let result = sa.run(&instance).unwrap();
/// assert_eq!(result.best_tour.len(), 10);
/// ```
pub struct SimulatedAnnealing<'a, P: ?Sized> {
    config: SaConfig,
    schedule: Box<dyn CoolingSchedule + 'a>,
    moves: Vec<Box<dyn Move + 'a>>,
    observers: Vec<Box<dyn Observer<P> + 'a>>,
}

impl<'a, P: TourProblem + ?Sized> SimulatedAnnealing<'a, P> {
    /// Creates an engine with no moves and no observers.
    ///
    /// # Errors
    /// Returns [`TspError::Configuration`] if `config` is invalid.
    pub fn new(config: SaConfig, schedule: impl CoolingSchedule + 'a) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            schedule: Box::new(schedule),
            moves: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// Registers a neighborhood move.
    pub fn add_move(&mut self, m: impl Move + 'a) {
        self.moves.push(Box::new(m));
    }

    pub fn with_move(mut self, m: impl Move + 'a) -> Self {
        self.add_move(m);
        self
    }

    /// Registers an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: impl Observer<P> + 'a) {
        self.observers.push(Box::new(observer));
    }

    pub fn with_observer(mut self, observer: impl Observer<P> + 'a) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// Runs SA on `problem`.
    ///
    /// # Errors
    /// - [`TspError::EmptyInstance`] if the problem has no cities
    /// - [`TspError::NoMoves`] if no move is registered
    /// - any error from the problem or from an observer
    pub fn run(&mut self, problem: &P) -> Result<SaResult> {
        let n = problem.city_count();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }
        if self.moves.is_empty() {
            return Err(TspError::NoMoves);
        }

        let started = Instant::now();
        let SaConfig {
            outer_loops,
            inner_loops,
            notification_cycle,
            seed,
        } = self.config;

        let mut rng = create_rng(seed);

        // Initialize
        let mut current = anchored_permutation(n, &mut rng);
        let mut energy = problem.tour_length(&current)?;
        let mut best = BestRecord::new(current.clone(), energy);
        let mut temperature = self.schedule.initial_temperature();

        info!(
            cities = n,
            outer_loops,
            inner_loops,
            moves = self.moves.len(),
            initial_energy = energy,
            initial_temperature = temperature,
            "annealing started"
        );

        let mut service = MoveService::new(&mut rng, n);
        let mut proposal = current.clone();
        let mut proposed_energy = energy;
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut stopped_early = false;
        let mut position = (0usize, 0usize);
        let mut best_energy_history = Vec::with_capacity(outer_loops);

        'outer: for outer in 0..outer_loops {
            temperature = self.schedule.next_temperature(temperature);

            // Markov chain at fixed temperature
            for inner in 0..inner_loops {
                position = (outer, inner);
                proposal.copy_from_slice(&current);

                let m = service.rng().random_range(0..self.moves.len());
                self.moves[m].propose(&mut proposal, &mut service);

                proposed_energy = problem.tour_length(&proposal)?;
                let delta = proposed_energy - energy;

                // Metropolis acceptance criterion
                let accept = if delta <= 0.0 {
                    if delta < 0.0 {
                        improving_moves += 1;
                    }
                    true
                } else {
                    let u: f64 = service.rng().random();
                    u < (-delta / temperature).exp()
                };

                if accept {
                    current.copy_from_slice(&proposal);
                    energy = proposed_energy;
                    accepted_moves += 1;
                }

                // Best tracking follows every proposal, accepted or not.
                best.offer(&proposal, proposed_energy);

                iteration += 1;
                if iteration % notification_cycle == 0 {
                    let snapshot = ProgressSnapshot {
                        tour: &current,
                        energy,
                        best_tour: best.tour(),
                        best_energy: best.energy(),
                        progress: Progress::Annealing {
                            outer,
                            inner,
                            iteration,
                            temperature,
                            proposed_energy,
                        },
                        terminated: false,
                    };
                    if broadcast(&mut self.observers, problem, &snapshot)? == ObserverAction::Stop {
                        debug!(outer, inner, iteration, "stop requested by observer");
                        stopped_early = true;
                        best_energy_history.push(best.energy());
                        break 'outer;
                    }
                }
            }

            best_energy_history.push(best.energy());
            trace!(
                outer,
                temperature,
                energy,
                best_energy = best.energy(),
                "outer loop finished"
            );
        }
        drop(service);

        // Terminate: the current state becomes the best one.
        let (outer, inner) = position;
        let snapshot = ProgressSnapshot {
            tour: best.tour(),
            energy: best.energy(),
            best_tour: best.tour(),
            best_energy: best.energy(),
            progress: Progress::Annealing {
                outer,
                inner,
                iteration,
                temperature,
                proposed_energy,
            },
            terminated: true,
        };
        broadcast(&mut self.observers, problem, &snapshot)?;

        info!(
            best_energy = best.energy(),
            iterations = iteration,
            accepted_moves,
            improving_moves,
            final_temperature = temperature,
            stopped_early,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "annealing finished"
        );

        let Solution { tour, energy } = best.into_solution();
        Ok(SaResult {
            best_tour: tour,
            best_energy: energy,
            iterations: iteration,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            stopped_early,
            best_energy_history,
        })
    }
}

impl<'a, P: TourProblem + ?Sized> Optimizer<P> for SimulatedAnnealing<'a, P> {
    fn name(&self) -> &'static str {
        "simulated-annealing"
    }

    fn optimize(&mut self, problem: &P) -> Result<Solution> {
        let result = self.run(problem)?;
        Ok(Solution {
            tour: result.best_tour,
            energy: result.best_energy,
        })
    }
}
