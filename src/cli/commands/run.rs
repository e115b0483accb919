use anyhow::{Context, Result, bail};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::gemini::{GeminiClient, GeminiClientConfig};
use crate::infrastructure::history::HistoryStore;
use crate::services::{FailurePolicy, PipelineOrchestrator};

/// Arguments for `crucible run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// The task to automate
    pub task: String,

    /// Replace a failed stage's output with a neutral placeholder in
    /// downstream prompts (the record still stores the error marker)
    #[arg(long)]
    pub redact_failures: bool,

    /// Per-stage deadline in seconds
    #[arg(long)]
    pub stage_timeout: Option<u64>,
}

/// Handle the run command.
pub async fn execute(args: RunArgs, json: bool) -> Result<()> {
    // The orchestrator does not validate emptiness; the caller does.
    let task = args.task.trim();
    if task.is_empty() {
        bail!("Task text cannot be empty");
    }

    let config = ConfigLoader::load()?;

    let client = GeminiClient::new(GeminiClientConfig::from(&config.provider))
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to create provider client")?;

    let history = HistoryStore::open(&config.history.path);

    let mut orchestrator =
        PipelineOrchestrator::new(Arc::new(client), config.settings.clone(), history);
    if args.redact_failures {
        orchestrator = orchestrator.with_policy(FailurePolicy::Placeholder);
    }
    if let Some(secs) = args.stage_timeout {
        orchestrator = orchestrator.with_stage_deadline(Duration::from_secs(secs));
    }

    let record = orchestrator
        .run(task)
        .await
        .context("Pipeline run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    if config.settings.verbose {
        for entry in orchestrator.messages() {
            println!(
                "[{}] {}\n",
                entry.timestamp.format("%H:%M:%S"),
                entry.message
            );
        }
    }

    println!("=== Refined solution ===");
    println!("{}", record.refinement);
    println!();
    println!(
        "Run {} completed in {:.2}s",
        record.id, record.completion_time
    );

    Ok(())
}
