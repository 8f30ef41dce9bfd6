//! Export functionality for training runs
//!
//! Per-episode history goes to CSV for plotting; the run summary itself is
//! JSON via [`crate::pipeline::TrainingResult::save`].

mod history_csv;

pub use history_csv::{HistoryRecord, read_history_csv, write_history_csv};
