//! `factory-plan` — plan a factory's orders from the command line.
//!
//! Loads factory data from a directory (or generates random data first),
//! runs the planner, and prints the resulting schedule.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};

use factory_plan::config::{ChargePolicy, PlanConfig};
use factory_plan::models::FactorySnapshot;
use factory_plan::planner::Planner;
use factory_plan::{generator, loader, logging, report};

/// Factory production planner.
#[derive(Parser, Debug)]
#[command(name = "factory-plan", about = "Factory production planner")]
struct Cli {
    /// Data directory holding materials/recipes/machines/orders JSON files.
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Generate random data before planning (written to <data>/generated).
    #[arg(short, long)]
    generate: bool,

    /// Number of materials to generate (default: random 5–15).
    #[arg(long)]
    materials: Option<usize>,

    /// Number of recipes to generate (default: random 3–10).
    #[arg(long)]
    recipes: Option<usize>,

    /// Number of machines to generate (default: random 2–5).
    #[arg(long)]
    machines: Option<usize>,

    /// Number of orders to generate (default: random 2–8).
    #[arg(long)]
    orders: Option<usize>,

    /// Smallest order quantity to generate.
    #[arg(long, default_value_t = 10.0)]
    min_quantity: f64,

    /// RNG seed for reproducible generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Solver time budget in seconds.
    #[arg(long, default_value_t = 30.0)]
    time_limit: f64,

    /// Charge loading/unloading once per batch instead of once per task.
    #[arg(long)]
    per_batch: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let snapshot = match load_or_generate(&cli) {
        Ok(snapshot) => snapshot,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let config = PlanConfig::new().with_charge_policy(if cli.per_batch {
        ChargePolicy::PerBatch
    } else {
        ChargePolicy::PerTask
    });

    let planner = Planner::new().with_config(config);
    match planner.plan(&snapshot, Duration::from_secs_f64(cli.time_limit)) {
        Ok(plan) => {
            print!("{}", report::render(&plan, &snapshot));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("planning failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_or_generate(cli: &Cli) -> Result<FactorySnapshot, String> {
    if cli.generate {
        let config = generator::GeneratorConfig {
            materials: cli.materials,
            recipes: cli.recipes,
            machines: cli.machines,
            orders: cli.orders,
            min_quantity: cli.min_quantity,
        };
        let mut rng = match cli.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let snapshot = generator::generate(&config, &mut rng);

        let out_dir = cli.data.join("generated");
        generator::save_dir(&snapshot, &out_dir)
            .map_err(|e| format!("failed to save generated data: {e}"))?;
        info!(dir = %out_dir.display(), "generated data saved");
        Ok(snapshot)
    } else {
        loader::load_dir(&cli.data).map_err(|e| format!("failed to load factory data: {e}"))
    }
}
