//! Common test utilities for the gridlearn test suite.

#![allow(dead_code)]

use gridlearn::{
    Grid,
    pipeline::{StepContext, TrainingConfig},
    ports::PollSettings,
    reward::RewardModel,
    shortest_path::PathEngine,
};

/// Parse a text map, panicking on malformed fixtures.
pub fn grid(map: &str) -> Grid {
    Grid::parse(map).expect("fixture map should parse")
}

/// Configuration that never sleeps long and prints nothing.
pub fn quiet_config(episodes: usize, seed: u64) -> TrainingConfig {
    TrainingConfig {
        report_every: 0,
        poll: PollSettings {
            timeout_ms: 1_000,
            interval_ms: 1,
        },
        ..TrainingConfig::default()
    }
    .with_episodes(episodes)
    .with_seed(seed)
}

/// Step context with the default learning parameters.
pub fn step_context<'a>(engine: &'a PathEngine, rewards: &'a RewardModel) -> StepContext<'a> {
    StepContext {
        engine,
        rewards,
        learning_rate: 0.9,
        discount: 0.9,
        max_steps: 99,
    }
}

/// Whether two indices are horizontal or vertical neighbors on `grid`.
pub fn adjacent(grid: &Grid, a: usize, b: usize) -> bool {
    let (ar, ac) = grid.coordinates(a);
    let (br, bc) = grid.coordinates(b);
    ar.abs_diff(br) + ac.abs_diff(bc) == 1
}
