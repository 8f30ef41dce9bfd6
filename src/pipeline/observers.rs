//! Observer implementations for training runs
//!
//! Observers collect data and render progress without coupling the learning
//! loop to any output format.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::{EpisodeOutcome, EpisodeSummary, GreedyRoute},
    ports::Observer,
};

/// Render a periodic route report.
pub fn format_report(episode: usize, route: &GreedyRoute) -> String {
    let moves: Vec<String> = route.moves.iter().map(|m| m.to_string()).collect();
    let ending = if route.reached_goal() {
        "reaches goal"
    } else {
        "does not reach goal"
    };
    format!(
        "Report for {episode}:\n  path length: {} ({ending})\n  moves: {}",
        route.len(),
        moves.join(" ")
    )
}

/// Progress bar observer - Shows training progress and route reports
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    obstructed: usize,
    truncated: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            obstructed: 0,
            truncated: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "goal:{} blocked:{} capped:{}",
            self.goals, self.obstructed, self.truncated
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::ReachedGoal => self.goals += 1,
            EpisodeOutcome::Obstructed => self.obstructed += 1,
            EpisodeOutcome::StepLimit => self.truncated += 1,
            EpisodeOutcome::Cancelled => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_report(&mut self, episode: usize, route: &GreedyRoute) -> Result<()> {
        match &self.progress_bar {
            Some(pb) => pb.println(format_report(episode, route)),
            None => println!("{}", format_report(episode, route)),
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Console observer - Prints route reports to stdout
#[derive(Debug, Default)]
pub struct ReportObserver;

impl ReportObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for ReportObserver {
    fn on_report(&mut self, episode: usize, route: &GreedyRoute) -> Result<()> {
        println!("{}", format_report(episode, route));
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    goals: usize,
    obstructed: usize,
    truncated: usize,
    step_counts: Vec<usize>,
    best_reward: Option<f64>,
    first_goal: Option<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_episodes(&self) -> usize {
        self.step_counts.len()
    }

    /// Fraction of episodes that reached the goal
    pub fn goal_rate(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.goals as f64 / self.step_counts.len() as f64
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            goals: self.goals,
            obstructed: self.obstructed,
            truncated: self.truncated,
            goal_rate: self.goal_rate(),
            avg_episode_length: self.avg_episode_length(),
            best_reward: self.best_reward,
            first_goal: self.first_goal,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub goals: usize,
    pub obstructed: usize,
    pub truncated: usize,
    pub goal_rate: f64,
    pub avg_episode_length: f64,
    pub best_reward: Option<f64>,
    pub first_goal: Option<usize>,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.step_counts.push(summary.steps);
        match summary.outcome {
            EpisodeOutcome::ReachedGoal => {
                self.goals += 1;
                self.first_goal.get_or_insert(summary.episode);
            }
            EpisodeOutcome::Obstructed => self.obstructed += 1,
            EpisodeOutcome::StepLimit => self.truncated += 1,
            EpisodeOutcome::Cancelled => {}
        }
        self.best_reward = Some(match self.best_reward {
            Some(best) => best.max(summary.total_reward),
            None => summary.total_reward,
        });
        Ok(())
    }
}
