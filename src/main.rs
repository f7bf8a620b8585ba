mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;

use capital_gains::config::Settings;
use capital_gains::CapitalGainsError;
use cli::{runner, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings.log_filter())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match &cli.input {
        Some(path) => {
            info!("Reading simulations from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            runner::run(BufReader::new(file), &mut out, &settings.tax, cli.format)?
        }
        None => runner::run(io::stdin().lock(), &mut out, &settings.tax, cli.format)?,
    };

    info!(
        simulations = summary.simulations,
        failed = summary.failed,
        "run complete"
    );

    Ok(())
}

/// Logs go to stderr so stdout carries only simulation results
fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|e| CapitalGainsError::ConfigError(format!("invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    Ok(())
}
