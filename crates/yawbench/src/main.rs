use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yawbench_core::registry::Registry;
use yawbench_core::{collector, runner};

/// Benchmarks yaw-error estimation algorithms against public wind farm
/// SCADA datasets.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding (or receiving) the benchmark SCADA data files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Skip dataset downloads and use whatever is already in the data
    /// directory.
    #[arg(long)]
    skip_collect: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("starting the wind farm yaw error benchmark");

    if !cli.skip_collect {
        collector::collect_all(&cli.data_dir)?;
    }

    let registry = Registry::with_builtin_strategies();
    let summary = runner::run_benchmark(&registry, &cli.data_dir)?;

    info!(
        cases_completed = summary.cases_completed,
        cases_failed = summary.cases_failed,
        turbines_failed = summary.turbines_failed,
        "benchmark finished"
    );
    Ok(())
}
