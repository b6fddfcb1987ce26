//! GA execution loop.

use super::config::GaConfig;
use super::operators::{OrderedCrossover, ReverseMutation};
use super::selection::TournamentSelection;
use super::types::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::error::{Result, TspError};
use crate::instance::TourProblem;
use crate::observer::{broadcast, Observer, ObserverAction, Progress, ProgressSnapshot};
use crate::optimizer::{BestRecord, Optimizer, Solution};
use crate::random::{create_rng, random_permutation};
use crate::tour::Tour;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour found across all generations.
    pub best_tour: Tour,

    /// Energy of the best tour.
    pub best_energy: f64,

    /// Number of generations completed.
    pub generations: usize,

    /// Number of children that went through mutation.
    pub mutations: usize,

    /// Whether an observer asked the run to stop.
    pub stopped_early: bool,

    /// Mean population energy per generation.
    pub mean_energies: Vec<f64>,

    /// Best energy so far, per generation.
    pub best_energies: Vec<f64>,
}

/// Generational genetic algorithm over a population of tours.
///
/// Every generation is bred entirely from the previous one: two parents are
/// selected, recombined into a single child, and the child is mutated with
/// probability `mutation_percentage`. There is no elitism; the best tour is
/// kept in a separate record instead.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::ga::{GaConfig, GeneticAlgorithm};
/// use tsp_metaheur::instance::TspInstance;
///
/// let instance = TspInstance::circle(8).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_num_generations(40)
///     .with_seed(42);
///
/// let mut ga = GeneticAlgorithm::new(config).unwrap();
/// let result = ga.run(&instance).unwrap();
/// assert_eq!(result.best_tour.len(), 8);
/// assert_eq!(result.generations, 40);
/// ```
pub struct GeneticAlgorithm<'a, P: ?Sized> {
    config: GaConfig,
    selection: Box<dyn SelectionOperator + 'a>,
    crossover: Box<dyn CrossoverOperator + 'a>,
    mutation: Box<dyn MutationOperator + 'a>,
    observers: Vec<Box<dyn Observer<P> + 'a>>,
}

impl<'a, P: TourProblem + ?Sized> GeneticAlgorithm<'a, P> {
    /// Creates an engine with tournament selection, ordered crossover and
    /// reverse mutation.
    ///
    /// # Errors
    /// Returns [`TspError::Configuration`] if `config` is invalid.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            selection: Box::new(TournamentSelection::new(config.tournament_size)),
            crossover: Box::new(OrderedCrossover),
            mutation: Box::new(ReverseMutation),
            observers: Vec::new(),
            config,
        })
    }

    pub fn with_selection(mut self, selection: impl SelectionOperator + 'a) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn with_crossover(mut self, crossover: impl CrossoverOperator + 'a) -> Self {
        self.crossover = Box::new(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: impl MutationOperator + 'a) -> Self {
        self.mutation = Box::new(mutation);
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

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA on `problem`.
    ///
    /// # Errors
    /// - [`TspError::EmptyInstance`] if the problem has no cities
    /// - [`TspError::InvalidTour`] if a crossover or mutation operator breaks
    ///   the permutation invariant
    /// - any error from the problem or from an observer
    pub fn run(&mut self, problem: &P) -> Result<GaResult> {
        let n = problem.city_count();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }

        let started = Instant::now();
        let GaConfig {
            population_size,
            num_generations,
            mutation_percentage,
            seed,
            ..
        } = self.config;

        let mut rng = create_rng(seed);

        // Initialize
        let mut population: Vec<Tour> = (0..population_size)
            .map(|_| random_permutation(n, &mut rng))
            .collect();
        let mut energies = evaluate(problem, &population)?;
        let seed_idx = find_best(&energies);
        let mut best = BestRecord::new(population[seed_idx].clone(), energies[seed_idx]);

        info!(
            cities = n,
            population_size,
            num_generations,
            mutation_percentage,
            initial_best = best.energy(),
            "evolution started"
        );

        let mut mean_energies = Vec::with_capacity(num_generations);
        let mut best_energies = Vec::with_capacity(num_generations);
        let mut mean_energy = mean(&energies);
        let mut generation = 0usize;
        let mut mutations = 0usize;
        let mut stopped_early = false;

        while generation < num_generations {
            // Breed the next population
            let mut offspring = Vec::with_capacity(population_size);
            for _ in 0..population_size {
                let p1 = self.selection.select(&energies, &mut rng);
                let p2 = self.selection.select(&energies, &mut rng);
                let mut child = self
                    .crossover
                    .crossover(&population[p1], &population[p2], &mut rng);

                if rng.random_range(0..100) < mutation_percentage {
                    self.mutation.mutate(&mut child, &mut rng);
                    mutations += 1;
                }
                offspring.push(child);
            }

            // Wholesale replacement
            population = offspring;
            energies = evaluate(problem, &population)?;
            let index = generation;
            generation += 1;

            let gen_best = find_best(&energies);
            best.offer(&population[gen_best], energies[gen_best]);
            mean_energy = mean(&energies);
            mean_energies.push(mean_energy);
            best_energies.push(best.energy());

            trace!(
                generation = index,
                mean_energy,
                generation_best = energies[gen_best],
                best_energy = best.energy(),
                "generation finished"
            );

            let snapshot = ProgressSnapshot {
                tour: &population[gen_best],
                energy: energies[gen_best],
                best_tour: best.tour(),
                best_energy: best.energy(),
                progress: Progress::Evolution {
                    generation: index,
                    mean_energy,
                    population_energies: &energies,
                },
                terminated: false,
            };
            if broadcast(&mut self.observers, problem, &snapshot)? == ObserverAction::Stop {
                debug!(generation = index, "stop requested by observer");
                stopped_early = true;
                break;
            }
        }

        // Terminate: the current state becomes the best one.
        let snapshot = ProgressSnapshot {
            tour: best.tour(),
            energy: best.energy(),
            best_tour: best.tour(),
            best_energy: best.energy(),
            // Index of the last generation that ran.
            progress: Progress::Evolution {
                generation: generation.saturating_sub(1),
                mean_energy,
                population_energies: &energies,
            },
            terminated: true,
        };
        broadcast(&mut self.observers, problem, &snapshot)?;

        info!(
            best_energy = best.energy(),
            generations = generation,
            mutations,
            stopped_early,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "evolution finished"
        );

        let Solution { tour, energy } = best.into_solution();
        Ok(GaResult {
            best_tour: tour,
            best_energy: energy,
            generations: generation,
            mutations,
            stopped_early,
            mean_energies,
            best_energies,
        })
    }
}

impl<'a, P: TourProblem + ?Sized> Optimizer<P> for GeneticAlgorithm<'a, P> {
    fn name(&self) -> &'static str {
        "genetic-algorithm"
    }

    fn optimize(&mut self, problem: &P) -> Result<Solution> {
        let result = self.run(problem)?;
        Ok(Solution {
            tour: result.best_tour,
            energy: result.best_energy,
        })
    }
}

/// Energy of every member, in population order.
fn evaluate<P: TourProblem + ?Sized>(problem: &P, population: &[Tour]) -> Result<Vec<f64>> {
    population.iter().map(|tour| problem.tour_length(tour)).collect()
}

/// Index of the lowest energy; the first one wins ties.
fn find_best(energies: &[f64]) -> usize {
    energies
        .iter()
        .enumerate()
        .fold(0, |best, (i, &e)| if e < energies[best] { i } else { best })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
