//! Train command - Learn a route across a grid with tabular Q-learning
//!
//! Runs to completion: the pipeline's cancel flag is a library hook and is
//! not wired to a signal handler here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::SimulatedEnvironment,
    cli::{
        config::{ConfigOverrides, GridSource, resolve_training_config},
        output::{format_number, print_kv, print_section},
    },
    export::write_history_csv,
    grid::EdgeMode,
    pipeline::{ProgressObserver, ReportObserver, TrainingPipeline, TrainingResult},
    q_learning::QTable,
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent to cross the grid")]
pub struct TrainArgs {
    #[command(flatten)]
    pub source: GridSource,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON training configuration; flags override its fields
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Learning rate α (0.0-1.0)
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Report the greedy route every N episodes (0 disables)
    #[arg(long)]
    pub report_every: Option<usize>,

    /// Write per-episode history to this CSV file
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Write the run summary to this JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Write the resolved training configuration to this JSON file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Print reports without a progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            episodes: self.episodes,
            seed: self.seed,
            epsilon: self.epsilon,
            learning_rate: self.learning_rate,
            discount: self.discount,
            report_every: self.report_every,
            edge_mode: self.source.wrap_edges.then_some(EdgeMode::Wrap),
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_training_config(args.config.as_deref(), &args.overrides())?;
    let grid = args.source.load()?.with_edge_mode(config.edge_mode);

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        println!("Configuration written to {}", path.display());
    }

    print_section("Training Configuration");
    print_kv("Grid", &format!("{}x{}", grid.width(), grid.height()));
    print_kv("Episodes", &format_number(config.episodes));
    print_kv("Learning rate", &config.learning_rate.to_string());
    print_kv("Discount", &config.discount.to_string());
    print_kv("Epsilon", &config.exploration.epsilon.to_string());
    print_kv("Edges", &format!("{:?}", config.edge_mode));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }
    println!();

    let mut table = QTable::new(grid.len());
    let mut env = SimulatedEnvironment::new(grid);

    let mut pipeline = TrainingPipeline::new(config);
    pipeline = if args.no_progress {
        pipeline.with_observer(Box::new(ReportObserver::new()))
    } else {
        pipeline.with_observer(Box::new(ProgressObserver::new()))
    };

    let result = pipeline
        .run(&mut env, &mut table)
        .context("Training failed")?;

    print_results(&result);

    if let Some(path) = &args.history {
        write_history_csv(path, &result.episodes)
            .with_context(|| format!("Failed to write history {}", path.display()))?;
        println!("History written to {}", path.display());
    }
    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_results(result: &TrainingResult) {
    print_section("Training Results");
    print_kv(
        "Episodes",
        &format!(
            "{} / {}",
            format_number(result.episodes.len()),
            format_number(result.planned_episodes)
        ),
    );
    print_kv(
        "Reached goal",
        &format!(
            "{} ({:.1}%)",
            result.successes,
            result.success_rate() * 100.0
        ),
    );
    print_kv("Obstructed", &result.failures.to_string());
    print_kv("Step limit", &result.truncated.to_string());
    print_kv("Mean reward", &format!("{:.3}", result.mean_reward()));
    print_kv("Score over time", &format!("{:.3}", result.score_over_time()));
    if result.cancelled {
        print_kv("Status", "cancelled");
    }
    match &result.final_route {
        Some(route) => print_kv("Final route", &route.to_string()),
        None => print_kv("Final route", "none"),
    }
}
