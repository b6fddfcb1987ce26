use std::cell::Cell;
use std::io::Cursor;

use tsp_metaheur::{
    error::{Result, TspError},
    exhaustive::Exhaustive,
    ga::{GaConfig, GeneticAlgorithm, MutationOperator, ReverseMutation},
    instance::{TourProblem, TspInstance},
    optimizer::Optimizer,
    random::{create_rng, EngineRng},
    sa::{GeometricCooling, ReverseMove, RotateMove, SaConfig, SimulatedAnnealing, SwapMove},
    tour::is_permutation,
};

// Unit square listed so that the identity tour crosses itself.
const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)];

fn annealer<'a>(config: SaConfig) -> SimulatedAnnealing<'a, TspInstance> {
    let schedule = GeometricCooling::new(100.0, 1e-2, 0.9).unwrap();
    SimulatedAnnealing::new(config, schedule)
        .unwrap()
        .with_move(SwapMove)
        .with_move(ReverseMove)
        .with_move(RotateMove)
}

/// Wraps a mutation operator and counts how often the engine applies it.
struct CountingMutation<'c> {
    calls: &'c Cell<usize>,
}

impl MutationOperator for CountingMutation<'_> {
    fn mutate(&self, tour: &mut [usize], rng: &mut EngineRng) {
        self.calls.set(self.calls.get() + 1);
        ReverseMutation.mutate(tour, rng);
    }
}

#[test]
fn test_square_annealing_finds_perimeter() -> Result<()> {
    let square = TspInstance::from_points(&SQUARE)?;
    let config = SaConfig::default()
        .with_outer_loops(100)
        .with_inner_loops(50)
        .with_seed(42);

    let result = annealer(config).run(&square)?;

    assert!(
        (result.best_energy - 4.0).abs() < 1e-3,
        "expected 4.0, got {}",
        result.best_energy
    );
    assert!(is_permutation(&result.best_tour, 4));
    Ok(())
}

#[test]
fn test_square_evolution_finds_perimeter() -> Result<()> {
    let square = TspInstance::from_points(&SQUARE)?;
    let config = GaConfig::default()
        .with_population_size(20)
        .with_num_generations(50)
        .with_tournament_size(3)
        .with_seed(42);

    let result = GeneticAlgorithm::new(config)?.run(&square)?;

    assert!(
        (result.best_energy - 4.0).abs() < 1e-3,
        "expected 4.0, got {}",
        result.best_energy
    );
    assert!(is_permutation(&result.best_tour, 4));
    Ok(())
}

#[test]
fn test_heuristics_never_beat_brute_force() -> Result<()> {
    let mut rng = create_rng(Some(2024));
    let instance = TspInstance::random(6, &mut rng)?;

    let optimum = Exhaustive::new().run(&instance)?.best_energy;

    let sa = annealer(
        SaConfig::default()
            .with_outer_loops(200)
            .with_inner_loops(200)
            .with_seed(1),
    )
    .run(&instance)?;
    let ga = GeneticAlgorithm::new(
        GaConfig::default()
            .with_population_size(50)
            .with_num_generations(50)
            .with_seed(1),
    )?
    .run(&instance)?;

    assert!(sa.best_energy >= optimum - 1e-9);
    assert!(ga.best_energy >= optimum - 1e-9);
    assert!(
        (sa.best_energy - optimum).abs() < 1e-6,
        "annealing should reach the optimum on 6 cities: {} vs {optimum}",
        sa.best_energy
    );
    Ok(())
}

#[test]
fn test_solvers_are_interchangeable() -> Result<()> {
    let instance = TspInstance::circle(7)?;
    let optimum = instance.tour_length(&[0, 1, 2, 3, 4, 5, 6])?;

    let mut solvers: Vec<Box<dyn Optimizer<TspInstance>>> = vec![
        Box::new(annealer(
            SaConfig::default()
                .with_outer_loops(100)
                .with_inner_loops(100)
                .with_seed(9),
        )),
        Box::new(GeneticAlgorithm::<TspInstance>::new(
            GaConfig::default()
                .with_population_size(60)
                .with_num_generations(60)
                .with_seed(9),
        )?),
        Box::new(Exhaustive::<TspInstance>::new()),
    ];

    for solver in solvers.iter_mut() {
        let solution = solver.optimize(&instance)?;
        assert!(is_permutation(&solution.tour, 7), "{} broke the tour", solver.name());
        assert!(solution.energy >= optimum - 1e-9);
        assert!((instance.tour_length(&solution.tour)? - solution.energy).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_single_member_population_is_stable() -> Result<()> {
    let instance = TspInstance::circle(9)?;
    let config = GaConfig::default()
        .with_population_size(1)
        .with_num_generations(25)
        .with_mutation_percentage(0)
        .with_seed(4);

    let result = GeneticAlgorithm::new(config)?.run(&instance)?;

    // The lone member is crossed with itself and never mutated, so it never changes.
    assert_eq!(result.generations, 25);
    assert!(is_permutation(&result.best_tour, 9));
    for &mean in &result.mean_energies {
        assert_eq!(mean, result.best_energy);
    }
    Ok(())
}

#[test]
fn test_mutation_percentage_boundaries() -> Result<()> {
    let instance = TspInstance::circle(8)?;
    let base = GaConfig::default()
        .with_population_size(30)
        .with_num_generations(20)
        .with_seed(6);

    let never = Cell::new(0);
    GeneticAlgorithm::new(base.clone().with_mutation_percentage(0))?
        .with_mutation(CountingMutation { calls: &never })
        .run(&instance)?;
    assert_eq!(never.get(), 0);

    let always = Cell::new(0);
    GeneticAlgorithm::new(base.with_mutation_percentage(100))?
        .with_mutation(CountingMutation { calls: &always })
        .run(&instance)?;
    assert_eq!(always.get(), 30 * 20);
    Ok(())
}

#[test]
fn test_tsplib_instance_end_to_end() -> Result<()> {
    let text = "NAME : square\nTYPE : TSP\nDIMENSION : 4\nEDGE_WEIGHT_TYPE : EUC_2D\n\
                NODE_COORD_SECTION\n1 0 0\n2 10 10\n3 10 0\n4 0 10\nEOF\n";
    let instance = TspInstance::from_tsplib(Cursor::new(text))?;
    assert_eq!(instance.city_count(), 4);

    let result = Exhaustive::new().run(&instance)?;
    assert!((result.best_energy - 40.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_empty_instance_rejected() {
    assert!(matches!(
        TspInstance::from_points(&[]),
        Err(TspError::EmptyInstance)
    ));
}
