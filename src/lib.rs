//! Tabular Q-learning agent that learns to cross a block grid
//!
//! This crate provides:
//! - A typed grid model built from 21x21 block snapshots or text maps
//! - Dijkstra shortest paths used to shape the step reward
//! - A dense Q-table with epsilon-greedy exploration
//! - An episode state machine and multi-episode training pipeline
//! - Periodic greedy route reports, CSV/JSON export and a CLI

pub mod adapters;
pub mod cli;
pub mod error;
pub mod export;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod reward;
pub mod shortest_path;

pub use error::{Error, Result};
pub use grid::{Cell, Direction, EdgeMode, Grid};
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult};
pub use q_learning::{EpsilonGreedy, QTable};
pub use shortest_path::PathEngine;
