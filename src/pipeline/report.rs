//! Greedy route extraction for progress reports

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{Cell, Direction},
    pipeline::episode::Course,
    q_learning::QTable,
};

/// How a greedy replay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteOutcome {
    ReachedGoal,
    /// The greedy move left the grid or hit an obstructed cell
    Blocked,
    StepLimit,
}

/// Route obtained by following the greedy policy from the start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyRoute {
    pub moves: Vec<Direction>,
    /// Cells visited, starting with the start cell
    pub cells: Vec<usize>,
    pub outcome: RouteOutcome,
}

impl GreedyRoute {
    /// Number of moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn reached_goal(&self) -> bool {
        self.outcome == RouteOutcome::ReachedGoal
    }

    /// Move commands as the environment spells them
    pub fn commands(&self) -> Vec<&'static str> {
        self.moves.iter().map(|m| m.command()).collect()
    }
}

impl fmt::Display for GreedyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves: Vec<String> = self.moves.iter().map(|m| m.to_string()).collect();
        let ending = match self.outcome {
            RouteOutcome::ReachedGoal => "reaches goal",
            RouteOutcome::Blocked => "blocked",
            RouteOutcome::StepLimit => "step limit",
        };
        write!(f, "{} moves ({ending}): [{}]", self.len(), moves.join(", "))
    }
}

/// Follow the table's best action from the course start for at most
/// `max_steps` moves.
///
/// Read-only with respect to the table. Not reaching the goal is a normal
/// outcome.
pub fn extract_greedy_route(
    table: &QTable,
    course: &Course,
    max_steps: usize,
) -> Result<GreedyRoute> {
    let grid = &course.grid;
    if table.num_states() != grid.len() {
        return Err(Error::GridSizeMismatch {
            grid_cells: grid.len(),
            table_states: table.num_states(),
        });
    }

    let mut state = course.start;
    let mut moves = Vec::new();
    let mut cells = vec![state];

    for _ in 0..max_steps {
        let action = table.best_action(state);
        moves.push(action);

        let Some(next) = grid.neighbor(state, action) else {
            return Ok(GreedyRoute {
                moves,
                cells,
                outcome: RouteOutcome::Blocked,
            });
        };
        let cell = grid.cell(next)?;
        if cell == Cell::Obstructed {
            return Ok(GreedyRoute {
                moves,
                cells,
                outcome: RouteOutcome::Blocked,
            });
        }

        cells.push(next);
        state = next;
        if next == course.goal {
            return Ok(GreedyRoute {
                moves,
                cells,
                outcome: RouteOutcome::ReachedGoal,
            });
        }
    }

    Ok(GreedyRoute {
        moves,
        cells,
        outcome: RouteOutcome::StepLimit,
    })
}
