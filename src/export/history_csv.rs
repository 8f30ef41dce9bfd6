//! CSV export of per-episode training history

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::{EpisodeOutcome, EpisodeSummary},
};

/// A single row in the history CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub steps: usize,
    pub total_reward: f64,
    pub epsilon: f64,
    /// Running mean of total reward up to and including this episode
    pub mean_reward: f64,
}

impl HistoryRecord {
    fn rows(episodes: &[EpisodeSummary]) -> Vec<Self> {
        let mut sum = 0.0;
        episodes
            .iter()
            .enumerate()
            .map(|(i, summary)| {
                sum += summary.total_reward;
                Self {
                    episode: summary.episode,
                    outcome: summary.outcome,
                    steps: summary.steps,
                    total_reward: summary.total_reward,
                    epsilon: summary.epsilon,
                    mean_reward: sum / (i + 1) as f64,
                }
            })
            .collect()
    }
}

/// Write one row per episode, with a header.
pub fn write_history_csv<P: AsRef<Path>>(path: P, episodes: &[EpisodeSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in HistoryRecord::rows(episodes) {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back a history file written by [`write_history_csv`].
pub fn read_history_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HistoryRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_mean() {
        let summary = |episode, total_reward| EpisodeSummary {
            episode,
            outcome: EpisodeOutcome::ReachedGoal,
            steps: 4,
            total_reward,
            epsilon: 0.1,
        };
        let rows = HistoryRecord::rows(&[summary(0, -10.0), summary(1, -6.0), summary(2, -2.0)]);
        let means: Vec<f64> = rows.iter().map(|r| r.mean_reward).collect();
        assert_eq!(means, vec![-10.0, -8.0, -6.0]);
    }
}
