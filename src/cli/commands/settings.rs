use anyhow::Result;
use clap::Args;

use crate::infrastructure::config::ConfigLoader;

/// Arguments for `crucible settings`.
#[derive(Debug, Args)]
pub struct SettingsArgs {}

/// Print the effective configuration (after file and env merging).
pub async fn execute(_args: SettingsArgs, json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;

    if json {
        // The provider API key is deliberately omitted from output.
        let body = serde_json::json!({
            "settings": config.settings,
            "provider": { "base_url": config.provider.base_url, "timeout_secs": config.provider.timeout_secs },
            "history": config.history,
            "logging": config.logging,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Models:");
    println!("  Planner:    {}", config.settings.planner_model);
    println!("  Researcher: {}", config.settings.researcher_model);
    println!("  Executive:  {}", config.settings.executive_model);
    println!("  Critic:     {}", config.settings.critic_model);
    println!("  Refiner:    {} (reuses executive)", config.settings.executive_model);
    println!("Temperature: {}", config.settings.temperature);
    println!("Max steps:   {}", config.settings.max_steps);
    println!("Verbose:     {}", config.settings.verbose);
    println!("History:     {}", config.history.path);
    println!("Provider:    {}", config.provider.base_url);

    Ok(())
}
