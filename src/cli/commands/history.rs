use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::output::table::format_history_table;
use crate::domain::models::{AgentRole, TaskRecord};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::history::HistoryStore;

/// Arguments for `crucible history`.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommands>,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// List past runs (default)
    List {
        /// Maximum number of runs to show, newest last
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one run in full
    Show {
        /// Short run id
        id: String,
    },
    /// Delete all persisted runs
    Clear,
}

/// Handle the history command.
pub async fn execute(args: HistoryArgs, json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut store = HistoryStore::open(&config.history.path);

    match args.command.unwrap_or(HistoryCommands::List { limit: 20 }) {
        HistoryCommands::List { limit } => {
            let records = store.records();
            let start = records.len().saturating_sub(limit);
            let window = &records[start..];

            if json {
                println!("{}", serde_json::to_string_pretty(window)?);
            } else if window.is_empty() {
                println!("No runs recorded.");
            } else {
                println!("{}", format_history_table(window));
                println!("\nShowing {} of {} run(s)", window.len(), records.len());
            }
        }
        HistoryCommands::Show { id } => {
            let record = store.find(&id).ok_or_else(|| {
                anyhow::anyhow!(
                    "Run {} not found. Use 'crucible history' to see recorded runs.",
                    id
                )
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                print_record(record);
            }
        }
        HistoryCommands::Clear => {
            let removed = store.len();
            store.clear()?;
            if json {
                println!("{}", serde_json::json!({ "cleared": removed }));
            } else {
                println!("Cleared {removed} run(s).");
            }
        }
    }

    Ok(())
}

fn print_record(record: &TaskRecord) {
    println!("Run {}", record.id);
    println!("  Task: {}", record.task);
    println!(
        "  Created at: {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Completion time: {:.2}s", record.completion_time);
    for role in AgentRole::ALL {
        println!("\n--- {role} ---");
        println!("{}", record.artifact(role));
    }
}
