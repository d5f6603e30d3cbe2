use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plantdex_core::{PlantId, Settings};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "plantdex")]
#[command(about = "Search the Perenual plant database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print a single result
    Search {
        query: String,
        /// Zero-based result to show (clamped to the last result)
        #[arg(short, long, default_value = "0")]
        index: usize,
        /// Print the raw species-list response instead of the card
        #[arg(long)]
        json: bool,
    },
    /// Print the detail record of one species
    Details {
        id: PlantId,
        #[arg(long)]
        json: bool,
    },
    /// Interactive search: typed lines are debounced, `:help` lists commands
    Browse {
        /// Quiet period before typed input triggers a search
        #[arg(long)]
        debounce_ms: Option<u64>,
        /// Launch the system browser for image/wiki links instead of printing them
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();
    tracing::debug!(?settings, "settings resolved");

    match cli.command {
        Commands::Search { query, index, json } => {
            commands::search::run_search(&settings, query, index, json).await?;
        },
        Commands::Details { id, json } => {
            commands::search::run_details(&settings, id, json).await?;
        },
        Commands::Browse { debounce_ms, open } => {
            let debounce = debounce_ms.map_or(settings.debounce, Duration::from_millis);
            commands::browse::run(&settings, debounce, open).await?;
        },
    }

    Ok(())
}
