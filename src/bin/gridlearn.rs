//! gridlearn CLI - Q-learning route finding on block grids
//!
//! This CLI provides:
//! - Training an agent against the simulated grid environment
//! - Printing the shortest start-to-goal route of a grid

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gridlearn")]
#[command(version, about = "Q-learning agent for grid route finding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent on a grid
    Train(Box<gridlearn::cli::commands::train::TrainArgs>),

    /// Show the shortest route from start to goal
    Route(gridlearn::cli::commands::route::RouteArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridlearn=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => gridlearn::cli::commands::train::execute(*args),
        Commands::Route(args) => gridlearn::cli::commands::route::execute(args),
    }
}
