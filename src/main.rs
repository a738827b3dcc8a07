use clap::Parser;
use inventory_dp::io::{demand, reporting};
use inventory_dp::{
    simulate, BaseStockPolicy, InventoryError, ModelConfig, PolicySolver, Result,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Solve a finite-horizon inventory problem and replay the optimal policy.
#[derive(Parser, Debug)]
#[command(name = "inventory-dp")]
#[command(version)]
struct Args {
    /// JSON file with model parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of decision periods
    #[arg(long)]
    horizon: Option<usize>,

    /// Largest stock level that may be held
    #[arg(long)]
    max_stock: Option<u32>,

    /// Stock on hand before the first period
    #[arg(long)]
    initial_stock: Option<u32>,

    /// Seed for the demand generator
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the CSV exports
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of animation frames (defaults to the horizon)
    #[arg(long)]
    frames: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<ModelConfig> {
    let mut config = match &args.config {
        Some(path) => ModelConfig::from_json_file(path)?,
        None => ModelConfig::default(),
    };

    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(max_stock) = args.max_stock {
        if config.terminal_cost.is_some() && max_stock != config.max_stock {
            return Err(InventoryError::InvalidConfiguration(
                "--max-stock conflicts with the terminal cost in the config file".to_string(),
            ));
        }
        config.max_stock = max_stock;
    }
    if let Some(initial_stock) = args.initial_stock {
        config.initial_stock = initial_stock;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok(config)
}

fn run(args: Args) -> Result<()> {
    println!("=== Inventory Control by Backward Induction ===");

    // 1. SETUP CONFIGURATION
    let config = load_config(&args)?;
    info!(
        horizon = config.horizon,
        max_stock = config.max_stock,
        initial_stock = config.initial_stock,
        "loaded configuration"
    );

    // 2. SOLVE
    let solver = PolicySolver::from_config(&config)?;
    let (policy, cost) = solver.solve();
    if let Some(expected) = cost.cost(0, config.initial_stock) {
        println!(
            "Expected optimal cost from stock {}: {:.3}",
            config.initial_stock, expected
        );
    }

    // 3. GENERATE DEMAND
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let demand_schedule = demand::generate_demand(solver.demand(), config.horizon, &mut rng)?;
    println!("Demand Schedule generated: {:?}", demand_schedule);

    // 4. RUN SIMULATIONS
    let optimal_trace = simulate(&policy, &demand_schedule, config.initial_stock)?;
    let baseline = BaseStockPolicy::at_mean_demand(
        solver.demand().mean(),
        config.max_stock,
        config.horizon,
    );
    let baseline_trace = simulate(&baseline, &demand_schedule, config.initial_stock)?;

    // 5. EXPORT RESULTS
    fs::create_dir_all(&args.output_dir)?;
    reporting::write_policy_table(File::create(args.output_dir.join("policy.csv"))?, &policy)?;
    reporting::write_csv_file(args.output_dir.join("trace.csv"), &optimal_trace.records)?;

    let long_form = reporting::to_long_form(&optimal_trace);
    reporting::write_csv_file(args.output_dir.join("long_form.csv"), &long_form)?;

    let frames = args.frames.unwrap_or(config.horizon);
    let animation = reporting::animation_frames(&long_form, frames);
    reporting::write_csv_file(args.output_dir.join("animation.csv"), &animation)?;

    // 6. PRINT COST ANALYSIS
    println!("\n=== Cost Analysis ===");
    println!(
        "Optimal policy:               ${:.2}",
        reporting::realized_cost(&optimal_trace)
    );
    println!(
        "Base stock (target {:>2}):       ${:.2}",
        baseline.target(),
        reporting::realized_cost(&baseline_trace)
    );

    println!("\nSimulation Complete.");
    Ok(())
}
