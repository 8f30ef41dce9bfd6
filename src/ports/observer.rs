//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the learning
//! loop to specific output formats or metrics.

use crate::{
    Result,
    pipeline::{EpisodeSummary, GreedyRoute, StepRecord},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - For each move in the episode
///    - `on_episode_end(summary)`
///    - `on_report(...)` - On reporting episodes only
/// 3. `on_training_end()` - Once at the end
///
/// An episode interrupted by cancellation gets no `on_episode_end`.
///
/// # Examples
///
/// ```no_run
/// use gridlearn::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct GoalCounter {
///     goals: usize,
/// }
///
/// impl Observer for GoalCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> gridlearn::Result<()> {
///         if summary.outcome.is_success() {
///             self.goals += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called once the episode's snapshot has been taken.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each move has been scored and learned from.
    fn on_step(&mut self, _episode: usize, _step: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode terminates.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called with the greedy route on reporting episodes.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to display or record learned routes.
    fn on_report(&mut self, _episode: usize, _route: &GreedyRoute) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// This is the last method called in the observation lifecycle.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
