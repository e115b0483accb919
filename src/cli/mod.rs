//! Command-line interface: the thin control surface over the pipeline.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Crucible: five-stage agentic task pipeline.
#[derive(Debug, Parser)]
#[command(name = "crucible", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the pipeline on a task
    Run(commands::run::RunArgs),
    /// Inspect or clear the run history
    History(commands::history::HistoryArgs),
    /// Show the effective settings
    Settings(commands::settings::SettingsArgs),
}

/// Print a top-level error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
