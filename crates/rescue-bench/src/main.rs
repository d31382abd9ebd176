use std::path::PathBuf;

use clap::Parser;

use rescue_bench::config::{BenchmarkConfig, ResolvedOutputs};
use rescue_bench::logging::init_logging;
use rescue_bench::runner::SimulationRunner;

/// Monte-Carlo benchmarking harness for rescue search policies.
#[derive(Debug, Parser)]
#[command(
    name = "rescue-bench",
    author,
    version,
    about = "Deterministic search-and-rescue simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/rescue.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games per policy.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for game generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the per-game search cap.
    #[arg(long, value_name = "COUNT")]
    max_searches: Option<u32>,

    /// Exit after validating the configuration (no simulation is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(max_searches) = cli.max_searches {
        config.games.max_searches = max_searches;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let policy_count = config.policies.len();
    let run_id = config.run_id.clone();
    let games = config.games.count;

    println!(
        "Loaded configuration '{run_id}' with {policy_count} polic{} ({games} games each)",
        if policy_count == 1 { "y" } else { "ies" }
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games × {} policies → {} rows at {}",
        summary.games_played,
        summary.policies,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(plot_path) = summary.plot_path.as_ref() {
        println!("Mean-searches plot: {}", plot_path.display());
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
