//! Shared configuration plumbing for CLI commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    grid::{EdgeMode, Grid, layout},
    pipeline::TrainingConfig,
};

/// Where the grid comes from
#[derive(Args, Debug, Clone, Default)]
pub struct GridSource {
    /// Text map file (`.` open, `#` obstructed, `~` hazard, `S` start, `G` goal)
    #[arg(long, conflicts_with = "demo")]
    pub map: Option<PathBuf>,

    /// Use the built-in 21x21 demo floor (the default when no map is given)
    #[arg(long)]
    pub demo: bool,

    /// Let east/west moves wrap onto the neighboring row
    #[arg(long)]
    pub wrap_edges: bool,
}

impl GridSource {
    pub fn edge_mode(&self) -> EdgeMode {
        if self.wrap_edges {
            EdgeMode::Wrap
        } else {
            EdgeMode::Bounded
        }
    }

    /// Load the selected grid with the `--wrap-edges` choice applied.
    pub fn load(&self) -> Result<Grid> {
        let grid = match &self.map {
            Some(path) => layout::load_map(path)
                .with_context(|| format!("Failed to load map {}", path.display()))?,
            None => layout::demo(),
        };
        Ok(grid.with_edge_mode(self.edge_mode()))
    }
}

/// Flag values that override fields of a loaded [`TrainingConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub episodes: Option<usize>,
    pub seed: Option<u64>,
    pub epsilon: Option<f64>,
    pub learning_rate: Option<f64>,
    pub discount: Option<f64>,
    pub report_every: Option<usize>,
    pub edge_mode: Option<EdgeMode>,
}

/// Build the training configuration: defaults, then the JSON file if given,
/// then command-line overrides.
pub fn resolve_training_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<TrainingConfig> {
    let mut config = match path {
        Some(path) => TrainingConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TrainingConfig::default(),
    };

    if let Some(episodes) = overrides.episodes {
        config.episodes = episodes;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(epsilon) = overrides.epsilon {
        config.exploration.epsilon = epsilon;
    }
    if let Some(learning_rate) = overrides.learning_rate {
        config.learning_rate = learning_rate;
    }
    if let Some(discount) = overrides.discount {
        config.discount = discount;
    }
    if let Some(report_every) = overrides.report_every {
        config.report_every = report_every;
    }
    if let Some(edge_mode) = overrides.edge_mode {
        config.edge_mode = edge_mode;
    }

    config.validate().context("Invalid training configuration")?;
    Ok(config)
}
