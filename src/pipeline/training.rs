//! Training pipeline: runs episodes against an environment

use std::{
    fs::File,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{
    episode::{Course, Episode, EpisodeOutcome, EpisodePhase, EpisodeSummary, StepContext},
    report::{GreedyRoute, extract_greedy_route},
};
use crate::{
    Error, Result,
    grid::EdgeMode,
    ports::{Environment, Observer, PollSettings},
    q_learning::{EpsilonGreedy, QTable},
    reward::RewardModel,
    shortest_path::{PathCosts, PathEngine},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Hard cap on moves per episode
    pub max_steps: usize,

    /// Learning rate α
    pub learning_rate: f64,

    /// Discount factor γ
    pub discount: f64,

    pub exploration: EpsilonGreedy,

    pub rewards: RewardModel,

    pub path_costs: PathCosts,

    /// East/west behavior at the grid's side edges
    pub edge_mode: EdgeMode,

    /// Extract and report the greedy route every this many episodes (0 = never)
    pub report_every: usize,

    /// Move budget for greedy route extraction
    pub replay_steps: usize,

    pub poll: PollSettings,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps: 99,
            learning_rate: 0.9,
            discount: 0.9,
            exploration: EpsilonGreedy::default(),
            rewards: RewardModel::default(),
            path_costs: PathCosts::default(),
            edge_mode: EdgeMode::default(),
            report_every: 10,
            replay_steps: 30,
            poll: PollSettings::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_exploration(mut self, exploration: EpsilonGreedy) -> Self {
        self.exploration = exploration;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning rate must be in (0, 1], got {}", self.learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount must be in [0, 1], got {}", self.discount),
            });
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max steps must be at least 1".to_string(),
            });
        }
        if self.poll.interval_ms == 0 {
            return Err(Error::InvalidConfiguration {
                message: "poll interval must be at least 1 ms".to_string(),
            });
        }
        self.exploration.validate()
    }

    /// Load configuration from a JSON file; missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes the run was configured for
    pub planned_episodes: usize,

    /// Summaries of completed episodes, in order
    pub episodes: Vec<EpisodeSummary>,

    /// Episodes that reached the goal
    pub successes: usize,

    /// Episodes that ended on an obstructed cell
    pub failures: usize,

    /// Episodes cut off by the step cap
    pub truncated: usize,

    /// Whether the run was stopped early
    pub cancelled: bool,

    /// Greedy route after the last episode
    pub final_route: Option<GreedyRoute>,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        planned_episodes: usize,
        episodes: Vec<EpisodeSummary>,
        cancelled: bool,
        final_route: Option<GreedyRoute>,
    ) -> Self {
        let count = |outcome: EpisodeOutcome| {
            episodes
                .iter()
                .filter(|e| e.outcome == outcome)
                .count()
        };
        Self {
            planned_episodes,
            successes: count(EpisodeOutcome::ReachedGoal),
            failures: count(EpisodeOutcome::Obstructed),
            truncated: count(EpisodeOutcome::StepLimit),
            episodes,
            cancelled,
            final_route,
        }
    }

    /// Total reward of each completed episode
    pub fn reward_history(&self) -> Vec<f64> {
        self.episodes.iter().map(|e| e.total_reward).collect()
    }

    pub fn mean_reward(&self) -> f64 {
        if self.episodes.is_empty() {
            0.0
        } else {
            self.reward_history().iter().sum::<f64>() / self.episodes.len() as f64
        }
    }

    /// Sum of episode rewards over the planned episode count
    pub fn score_over_time(&self) -> f64 {
        if self.planned_episodes == 0 {
            0.0
        } else {
            self.reward_history().iter().sum::<f64>() / self.planned_episodes as f64
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.episodes.is_empty() {
            0.0
        } else {
            self.successes as f64 / self.episodes.len() as f64
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a Q-table against an environment
///
/// The table is owned by the caller and threaded through every episode, so
/// the same table can be trained further or inspected afterwards.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    exploration: EpsilonGreedy,
    engine: PathEngine,
    rng: StdRng,
    cancel: Option<Arc<AtomicBool>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            exploration: config.exploration,
            engine: PathEngine::new(config.path_costs),
            rng,
            config,
            observers: Vec::new(),
            cancel: None,
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Stop training at the next step boundary once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Exploration settings as decayed so far
    pub fn exploration(&self) -> &EpsilonGreedy {
        &self.exploration
    }

    fn cancel_requested(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Run all configured episodes, learning into `table`.
    ///
    /// Environment failures abort the run and are returned as errors.
    pub fn run<E: Environment + ?Sized>(
        &mut self,
        env: &mut E,
        table: &mut QTable,
    ) -> Result<TrainingResult> {
        self.config.validate()?;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.episodes);
        let mut last_course: Option<Course> = None;
        let mut cancelled = false;

        for number in 0..self.config.episodes {
            if self.cancel_requested() {
                cancelled = true;
                break;
            }

            let epsilon = self.exploration.epsilon;
            let episode = self.run_episode(number, env, table)?;
            let Some(summary) = episode.summary(epsilon) else {
                continue;
            };
            if summary.outcome == EpisodeOutcome::Cancelled {
                cancelled = true;
                break;
            }

            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
            summaries.push(summary);

            let reporting =
                self.config.report_every > 0 && number.is_multiple_of(self.config.report_every);
            if let Some(course) = episode.into_course() {
                if reporting {
                    let route = extract_greedy_route(table, &course, self.config.replay_steps)?;
                    info!(
                        episode = number,
                        length = route.len(),
                        reached_goal = route.reached_goal(),
                        "greedy route: {route}"
                    );
                    for observer in &mut self.observers {
                        observer.on_report(number, &route)?;
                    }
                }
                last_course = Some(course);
            }

            self.exploration.decay_epsilon();
        }

        if cancelled {
            warn!(
                completed = summaries.len(),
                planned = self.config.episodes,
                "training cancelled"
            );
        }

        let final_route = last_course
            .as_ref()
            .map(|course| extract_greedy_route(table, course, self.config.replay_steps))
            .transpose()?;

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            summaries,
            cancelled,
            final_route,
        ))
    }

    /// Run a single episode to termination.
    pub fn run_episode<E: Environment + ?Sized>(
        &mut self,
        number: usize,
        env: &mut E,
        table: &mut QTable,
    ) -> Result<Episode> {
        env.begin_episode(number)?;

        let mut episode = Episode::new(number);
        episode.observe(env, &self.config.poll, self.config.edge_mode, &self.engine)?;
        if let Some(course) = episode.course() {
            if course.grid.len() != table.num_states() {
                return Err(Error::GridSizeMismatch {
                    grid_cells: course.grid.len(),
                    table_states: table.num_states(),
                });
            }
        }

        for observer in &mut self.observers {
            observer.on_episode_start(number)?;
        }

        let ctx = StepContext {
            engine: &self.engine,
            rewards: &self.config.rewards,
            learning_rate: self.config.learning_rate,
            discount: self.config.discount,
            max_steps: self.config.max_steps,
        };

        while episode.phase() == EpisodePhase::Stepping {
            if self.cancel_requested() {
                episode.cancel();
                break;
            }

            let action = self
                .exploration
                .select(table, episode.state(), &mut self.rng);
            let record = episode.advance(action, env, table, &ctx)?;

            for observer in &mut self.observers {
                observer.on_step(number, &record)?;
            }
        }

        Ok(episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = TrainingConfig::default();
        assert_eq!(config.episodes, 1000);
        assert_eq!(config.max_steps, 99);
        assert_eq!(config.replay_steps, 30);
        assert_eq!(config.report_every, 10);
        assert_eq!(config.learning_rate, 0.9);
        assert_eq!(config.discount, 0.9);
        assert_eq!(config.exploration.epsilon, 0.1);
        assert_eq!(config.rewards.obstructed_penalty, -99.0);
        assert_eq!(config.rewards.hazard_penalty, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainingConfig =
            serde_json::from_str(r#"{ "episodes": 20, "edge_mode": "wrap", "seed": 3 }"#).unwrap();
        assert_eq!(config.episodes, 20);
        assert_eq!(config.edge_mode, EdgeMode::Wrap);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.max_steps, 99);
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let config = TrainingConfig {
            learning_rate: 0.0,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TrainingConfig {
            discount: 1.5,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TrainingConfig {
            max_steps: 0,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_result_statistics() {
        let summary = |episode, outcome, total_reward| EpisodeSummary {
            episode,
            outcome,
            steps: 3,
            total_reward,
            epsilon: 0.1,
        };
        let result = TrainingResult::new(
            4,
            vec![
                summary(0, EpisodeOutcome::Obstructed, -99.0),
                summary(1, EpisodeOutcome::ReachedGoal, -3.0),
            ],
            true,
            None,
        );
        assert_eq!(result.successes, 1);
        assert_eq!(result.failures, 1);
        assert_eq!(result.truncated, 0);
        assert_eq!(result.reward_history(), vec![-99.0, -3.0]);
        assert_eq!(result.mean_reward(), -51.0);
        assert_eq!(result.score_over_time(), -25.5);
        assert_eq!(result.success_rate(), 0.5);
    }
}
