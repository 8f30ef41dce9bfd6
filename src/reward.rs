//! Per-step reward shaped by the remaining path length to the goal

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    grid::{Cell, Grid},
    shortest_path::PathEngine,
};

/// Why a step ended the episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    ReachedGoal,
    /// Stepped onto an obstructed cell or off the grid
    Obstructed,
}

/// Reward for a single move and whether it ends the episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReward {
    pub reward: f64,
    pub termination: Option<Termination>,
}

/// Reward schedule
///
/// Landing on a walkable cell is worth minus the number of moves still
/// needed to reach the goal from it; hazards cost an extra
/// `hazard_penalty`, and an obstructed landing pays `obstructed_penalty`
/// and ends the episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardModel {
    pub obstructed_penalty: f64,
    pub hazard_penalty: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        Self {
            obstructed_penalty: -99.0,
            hazard_penalty: 1.5,
        }
    }
}

impl RewardModel {
    /// Score the cell a move lands on.
    ///
    /// `landing` is `None` when the move left the grid, which counts as an
    /// obstructed landing. Fails if the goal cannot be reached from a
    /// walkable landing cell.
    pub fn evaluate(
        &self,
        engine: &PathEngine,
        grid: &Grid,
        landing: Option<usize>,
        goal: usize,
    ) -> Result<StepReward> {
        let Some(index) = landing else {
            return Ok(self.obstructed());
        };
        let cell = grid.cell(index)?;
        if cell == Cell::Obstructed {
            return Ok(self.obstructed());
        }

        let remaining = engine.path_length(grid, index, goal)? - 1;
        let distance_reward = -(remaining as f64);

        Ok(match cell {
            Cell::Hazard => StepReward {
                reward: distance_reward - self.hazard_penalty,
                termination: None,
            },
            Cell::Goal => StepReward {
                reward: distance_reward,
                termination: Some(Termination::ReachedGoal),
            },
            Cell::Open | Cell::Start | Cell::Obstructed => StepReward {
                reward: distance_reward,
                termination: None,
            },
        })
    }

    fn obstructed(&self) -> StepReward {
        StepReward {
            reward: self.obstructed_penalty,
            termination: Some(Termination::Obstructed),
        }
    }
}
