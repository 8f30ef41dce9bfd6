//! Q-table implementation for temporal difference learning

use crate::grid::Direction;

/// Q-table mapping (cell index, move) pairs to Q-values
///
/// Dense storage: one row of four values per grid cell, all starting at
/// zero. The table outlives individual episodes and is owned by whoever
/// drives training.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    q_values: Vec<[f64; Direction::COUNT]>,
}

impl QTable {
    /// Create a zeroed Q-table covering `num_states` cells
    pub fn new(num_states: usize) -> Self {
        Self {
            q_values: vec![[0.0; Direction::COUNT]; num_states],
        }
    }

    /// Number of states (grid cells) covered
    pub fn num_states(&self) -> usize {
        self.q_values.len()
    }

    /// Get Q-value for a state-action pair
    ///
    /// # Panics
    ///
    /// Panics if `state` is outside the table.
    pub fn value(&self, state: usize, action: Direction) -> f64 {
        self.q_values[state][action.index()]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: usize, action: Direction, value: f64) {
        self.q_values[state][action.index()] = value;
    }

    /// All four Q-values of a state, in [`Direction::ALL`] order
    pub fn values(&self, state: usize) -> &[f64; Direction::COUNT] {
        &self.q_values[state]
    }

    /// Get maximum Q-value over all moves in a state
    pub fn max_value(&self, state: usize) -> f64 {
        self.q_values[state]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action (highest Q-value)
    ///
    /// Ties go to the direction listed first in [`Direction::ALL`].
    pub fn best_action(&self, state: usize) -> Direction {
        let row = &self.q_values[state];
        let mut best = Direction::North;
        for direction in Direction::ALL {
            if row[direction.index()] > row[best.index()] {
                best = direction;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn update(
        &mut self,
        state: usize,
        action: Direction,
        reward: f64,
        next_state: usize,
        learning_rate: f64,
        discount: f64,
    ) {
        let td_target = reward + discount * self.max_value(next_state);
        self.apply(state, action, td_target, learning_rate);
    }

    /// Update for a move with no successor cell (it left the grid)
    ///
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
    pub fn update_terminal(
        &mut self,
        state: usize,
        action: Direction,
        reward: f64,
        learning_rate: f64,
    ) {
        self.apply(state, action, reward, learning_rate);
    }

    fn apply(&mut self, state: usize, action: Direction, td_target: f64, learning_rate: f64) {
        let current_q = self.value(state, action);
        let td_error = td_target - current_q;
        self.set(state, action, current_q + learning_rate * td_error);
    }
}
