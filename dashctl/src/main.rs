//! dashctl - Dashboard composition tool
//!
//! This is the main entry point for the command-line tool.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{CliArgs, Command};
use compose::pipeline;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    tracing::debug!(command = ?args.command, "Starting dashctl");
    run(args.command)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Mega { plan, output } => {
            let report = pipeline::run_mega(&plan, output.as_deref()).with_context(|| {
                format!("Failed to compose mega dashboard from {}", plan.display())
            })?;
            report.log("Mega dashboard");
        }
        Command::Demo { plan, output } => {
            let report = pipeline::run_demo(&plan, output.as_deref()).with_context(|| {
                format!("Failed to compose demo dashboard from {}", plan.display())
            })?;
            report.log("Demo dashboard");
        }
        Command::StatusCodes {
            target,
            config,
            output,
        } => {
            let report =
                pipeline::run_status_codes(&target, config.as_deref(), output.as_deref())
                    .with_context(|| {
                        format!("Failed to add status code panels to {}", target.display())
                    })?;
            report.log("Status code panels");
        }
        Command::Append {
            target,
            panels,
            tile_width,
            tile_height,
            per_row,
            at,
            id_floor,
            output,
        } => {
            let config = cli::append_config(tile_width, tile_height, per_row, at, id_floor);
            let report = pipeline::run_append(&target, &panels, &config, output.as_deref())
                .with_context(|| {
                    format!(
                        "Failed to append panels from {} to {}",
                        panels.display(),
                        target.display()
                    )
                })?;
            report.log("Append");
        }
    }
    Ok(())
}
