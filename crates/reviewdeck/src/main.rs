//! reviewdeck - local review and checklist co-pilot backed by LLM APIs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod banner;
mod cli;
mod commands;
mod output;
mod server;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle dynamic shell completions (when invoked via COMPLETE=<shell> reviewdeck)
    clap_complete::CompleteEnv::with_factory(Cli::command).complete();

    // Keys in a local .env are picked up as if exported
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = if cli.verbose > 0 {
        match cli.verbose {
            1 => "reviewdeck=debug,reviewdeck_client=debug,reviewdeck_core=debug,tower_http=debug",
            _ => "reviewdeck=trace,reviewdeck_client=trace,reviewdeck_core=trace,tower_http=trace",
        }
    } else if cli.quiet {
        "error"
    } else {
        "reviewdeck=info,reviewdeck_client=info,reviewdeck_core=info"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::new(filter))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("loaded environment from {}", path.display());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    cli.run().await
}
