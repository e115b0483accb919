//! Crucible CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crucible::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => crucible::cli::commands::run::execute(args, cli.json).await,
        Commands::History(args) => crucible::cli::commands::history::execute(args, cli.json).await,
        Commands::Settings(args) => {
            crucible::cli::commands::settings::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        crucible::cli::handle_error(err, cli.json);
    }
}
