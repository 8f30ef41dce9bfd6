//! Training pipeline abstractions
//!
//! This module provides:
//! - The per-episode learning state machine
//! - Multi-episode training with periodic greedy route reports
//! - Observers for progress and metrics during training

pub mod episode;
pub mod observers;
pub mod report;
pub mod training;

pub use episode::{
    Course, Episode, EpisodeOutcome, EpisodePhase, EpisodeSummary, StepContext, StepRecord,
};
// Re-export observer implementations (adapters)
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver, ReportObserver};
pub use report::{GreedyRoute, RouteOutcome, extract_greedy_route};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Environment, Observer};
