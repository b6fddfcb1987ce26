//! A command line interface to the TSP solvers.

use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tsp_metaheur::error::Result;
use tsp_metaheur::exhaustive::Exhaustive;
use tsp_metaheur::ga::{GaConfig, GeneticAlgorithm};
use tsp_metaheur::instance::{TourProblem, TspInstance};
use tsp_metaheur::observer::LogObserver;
use tsp_metaheur::optimizer::Optimizer;
use tsp_metaheur::sa::{
    GeometricCooling, ReverseMove, RotateMove, SaConfig, SimulatedAnnealing, SwapMove,
};

const INSTANCE_ARG_NAME: &str = "INSTANCE";
const ALGORITHM_ARG_NAME: &str = "algorithm";
const CITIES_ARG_NAME: &str = "cities";
const SEED_ARG_NAME: &str = "seed";
const OUTER_LOOPS_ARG_NAME: &str = "outer-loops";
const INNER_LOOPS_ARG_NAME: &str = "inner-loops";
const NOTIFICATION_CYCLE_ARG_NAME: &str = "notification-cycle";
const INITIAL_TEMP_ARG_NAME: &str = "initial-temp";
const FINAL_TEMP_ARG_NAME: &str = "final-temp";
const ALPHA_ARG_NAME: &str = "alpha";
const POPULATION_ARG_NAME: &str = "population";
const GENERATIONS_ARG_NAME: &str = "generations";
const TOURNAMENT_ARG_NAME: &str = "tournament";
const MUTATION_ARG_NAME: &str = "mutation";

fn get_app() -> Command {
    Command::new("tsp-metaheur")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves TSP instances with simulated annealing or a genetic algorithm")
        .arg(
            Arg::new(INSTANCE_ARG_NAME)
                .help("TSPLIB file with NODE_COORD_SECTION; a circle is generated when omitted")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new(ALGORITHM_ARG_NAME)
                .help("Solver to run")
                .short('a')
                .long(ALGORITHM_ARG_NAME)
                .value_parser(["sa", "ga", "exhaustive"])
                .default_value("sa"),
        )
        .arg(
            Arg::new(CITIES_ARG_NAME)
                .help("Number of cities on the generated circle")
                .short('n')
                .long(CITIES_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("30"),
        )
        .arg(
            Arg::new(SEED_ARG_NAME)
                .help("Random seed for a reproducible run")
                .short('s')
                .long(SEED_ARG_NAME)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new(OUTER_LOOPS_ARG_NAME)
                .help("SA: number of temperature steps")
                .long(OUTER_LOOPS_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("300"),
        )
        .arg(
            Arg::new(INNER_LOOPS_ARG_NAME)
                .help("SA: proposals per temperature")
                .long(INNER_LOOPS_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new(NOTIFICATION_CYCLE_ARG_NAME)
                .help("SA: report progress every this many proposals")
                .long(NOTIFICATION_CYCLE_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new(INITIAL_TEMP_ARG_NAME)
                .help("SA: initial temperature of the geometric schedule")
                .long(INITIAL_TEMP_ARG_NAME)
                .value_parser(value_parser!(f64))
                .default_value("100"),
        )
        .arg(
            Arg::new(FINAL_TEMP_ARG_NAME)
                .help("SA: temperature floor of the geometric schedule")
                .long(FINAL_TEMP_ARG_NAME)
                .value_parser(value_parser!(f64))
                .default_value("0.01"),
        )
        .arg(
            Arg::new(ALPHA_ARG_NAME)
                .help("SA: cooling factor in (0, 1)")
                .long(ALPHA_ARG_NAME)
                .value_parser(value_parser!(f64))
                .default_value("0.99"),
        )
        .arg(
            Arg::new(POPULATION_ARG_NAME)
                .help("GA: population size")
                .long(POPULATION_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("1000"),
        )
        .arg(
            Arg::new(GENERATIONS_ARG_NAME)
                .help("GA: number of generations")
                .long(GENERATIONS_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("300"),
        )
        .arg(
            Arg::new(TOURNAMENT_ARG_NAME)
                .help("GA: tournament size")
                .long(TOURNAMENT_ARG_NAME)
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new(MUTATION_ARG_NAME)
                .help("GA: mutation chance in percent (0-100)")
                .long(MUTATION_ARG_NAME)
                .value_parser(value_parser!(u32).range(0..=100))
                .default_value("100"),
        )
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a value that clap guarantees through its default.
fn get_value<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, name: &str, fallback: T) -> T {
    matches.get_one::<T>(name).cloned().unwrap_or(fallback)
}

fn load_instance(matches: &ArgMatches) -> Result<TspInstance> {
    match matches.get_one::<PathBuf>(INSTANCE_ARG_NAME) {
        Some(path) => TspInstance::from_path(path),
        None => TspInstance::circle(get_value(matches, CITIES_ARG_NAME, 30)),
    }
}

fn create_optimizer(matches: &ArgMatches) -> Result<Box<dyn Optimizer<TspInstance>>> {
    let seed = matches.get_one::<u64>(SEED_ARG_NAME).copied();
    let algorithm = get_value(matches, ALGORITHM_ARG_NAME, String::from("sa"));

    let optimizer: Box<dyn Optimizer<TspInstance>> = match algorithm.as_str() {
        "ga" => {
            let mut config = GaConfig::default()
                .with_population_size(get_value(matches, POPULATION_ARG_NAME, 1000))
                .with_num_generations(get_value(matches, GENERATIONS_ARG_NAME, 300))
                .with_tournament_size(get_value(matches, TOURNAMENT_ARG_NAME, 10))
                .with_mutation_percentage(get_value(matches, MUTATION_ARG_NAME, 100));
            config.seed = seed;
            Box::new(
                GeneticAlgorithm::<TspInstance>::new(config)?
                    .with_observer(LogObserver::with_label("ga")),
            )
        }
        "exhaustive" => Box::new(
            Exhaustive::<TspInstance>::new().with_observer(LogObserver::with_label("exhaustive")),
        ),
        _ => {
            let mut config = SaConfig::default()
                .with_outer_loops(get_value(matches, OUTER_LOOPS_ARG_NAME, 300))
                .with_inner_loops(get_value(matches, INNER_LOOPS_ARG_NAME, 100))
                .with_notification_cycle(get_value(matches, NOTIFICATION_CYCLE_ARG_NAME, 100));
            config.seed = seed;
            let schedule = GeometricCooling::new(
                get_value(matches, INITIAL_TEMP_ARG_NAME, 100.0),
                get_value(matches, FINAL_TEMP_ARG_NAME, 1e-2),
                get_value(matches, ALPHA_ARG_NAME, 0.99),
            )?;
            Box::new(
                SimulatedAnnealing::<TspInstance>::new(config, schedule)?
                    .with_move(SwapMove)
                    .with_move(ReverseMove)
                    .with_move(RotateMove)
                    .with_observer(LogObserver::with_label("sa")),
            )
        }
    };
    Ok(optimizer)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let instance = load_instance(matches)?;
    let mut optimizer = create_optimizer(matches)?;

    let started = Instant::now();
    let solution = optimizer.optimize(&instance)?;
    let elapsed = started.elapsed();

    println!("algorithm: {}", optimizer.name());
    println!("cities: {}", instance.city_count());
    println!("elapsed: {} ms", elapsed.as_millis());
    println!("tour length: {:.4}", solution.energy);
    println!(
        "tour: {}",
        solution.tour.iter().map(|city| city.to_string()).collect::<Vec<_>>().join(" ")
    );
    Ok(())
}

fn main() {
    enable_tracing();

    let matches = get_app().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("{err}");
        process::exit(1);
    }
}
