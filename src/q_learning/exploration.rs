//! ε-greedy action selection

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::Direction,
    q_learning::q_table::QTable,
};

/// ε-greedy exploration with optional multiplicative decay per episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    /// Current exploration rate
    pub epsilon: f64,
    /// Multiplicative decay applied after each episode
    pub decay: f64,
    /// Floor for the exploration rate
    pub min_epsilon: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            decay: 1.0,
            min_epsilon: 0.0,
        }
    }
}

impl EpsilonGreedy {
    /// Constant exploration rate
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }

    pub fn with_decay(mut self, decay: f64, min_epsilon: f64) -> Self {
        self.decay = decay;
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.epsilon) || !in_unit(self.decay) || !in_unit(self.min_epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon ({}), decay ({}) and min epsilon ({}) must lie in [0, 1]",
                    self.epsilon, self.decay, self.min_epsilon
                ),
            });
        }
        Ok(())
    }

    /// Pick a move for `state`.
    ///
    /// Explores uniformly over all four directions, greedy choice included.
    pub fn select<R: Rng>(&self, table: &QTable, state: usize, rng: &mut R) -> Direction {
        if rng.random::<f64>() < self.epsilon {
            Direction::ALL[rng.random_range(0..Direction::COUNT)]
        } else {
            table.best_action(state)
        }
    }

    /// Decay epsilon after episode
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
    }
}
