use clap::Parser;
use conveyor_sim::core::belt::describe;
use conveyor_sim::{FactoryConfig, Simulation, SimulationConfig};
use std::process::ExitCode;
use std::time::Duration;

/// Robot factory simulation: one supplier, many workers, one conveyor belt
#[derive(Parser, Debug)]
#[command(name = "conveyor_sim", version, about)]
struct Args {
    /// Number of workers assembling DRY2000 robots
    dry_workers: usize,

    /// Number of workers assembling WET2000 robots
    wet_workers: usize,

    /// How long to run, in seconds
    seconds: u64,

    /// Maximum number of components on the belt
    #[arg(long, default_value_t = conveyor_sim::core::config::DEFAULT_BELT_CAPACITY)]
    capacity: usize,

    /// Seed for the component generator
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut factory = FactoryConfig::new().with_belt_capacity(args.capacity);
    if let Some(seed) = args.seed {
        factory = factory.with_random_seed(seed);
    }
    let config = SimulationConfig::new(Duration::from_secs(args.seconds))
        .with_dry_workers(args.dry_workers)
        .with_wet_workers(args.wet_workers)
        .with_factory(factory);

    match Simulation::new(config).run() {
        Ok(report) => {
            println!("Run {} ({:.1?})", report.run_id, report.elapsed);
            println!(
                "Supplied {} component(s), evicted {}",
                report.supplied, report.evicted
            );
            for worker in &report.workers {
                println!("  {:<12} assembled {}", worker.name, worker.assembled);
            }
            println!("Belt: {}", describe(&report.belt));
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Simulation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
