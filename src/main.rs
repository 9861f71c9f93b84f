use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{CatalogCommand, ConfigCommand, ListsCommand, PlanCommand};
use config::Config;
use grocery_core::HttpGateway;

#[derive(Parser)]
#[command(name = "grocery")]
#[command(version)]
#[command(about = "Plan and manage family grocery lists", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the item catalog
    Catalog(CatalogCommand),

    /// Create a new grocery list
    Plan(PlanCommand),

    /// Browse and edit saved grocery lists
    Lists(ListsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grocery=warn,grocery_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    let gateway = HttpGateway::new(config.api_url.value.clone());
    tracing::debug!("Using grocery API at {}", gateway.base_url());

    match cli.command {
        Some(Commands::Catalog(cmd)) => {
            cmd.run(&gateway).await?;
        }
        Some(Commands::Plan(cmd)) => {
            cmd.run(&gateway, &config).await?;
        }
        Some(Commands::Lists(cmd)) => {
            cmd.run(&gateway).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
