//! A single learning episode
//!
//! An episode moves through three phases:
//!
//! ```text
//! AwaitingObservation --observe--> Stepping --advance*--> Terminated
//! ```
//!
//! `observe` takes one grid snapshot and locates the start and goal.
//! Each `advance` sends one move, scores the landing cell, updates the
//! Q-table and moves the agent. The episode terminates on reaching the goal,
//! on an obstructed landing, or when the step budget is spent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    grid::{Direction, EdgeMode, Grid},
    ports::{Environment, PollSettings, grid_snapshot},
    q_learning::QTable,
    reward::{RewardModel, Termination},
    shortest_path::PathEngine,
};

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    ReachedGoal,
    Obstructed,
    StepLimit,
    Cancelled,
}

impl EpisodeOutcome {
    pub fn is_success(self) -> bool {
        self == EpisodeOutcome::ReachedGoal
    }
}

impl From<Termination> for EpisodeOutcome {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::ReachedGoal => EpisodeOutcome::ReachedGoal,
            Termination::Obstructed => EpisodeOutcome::Obstructed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    AwaitingObservation,
    Stepping,
    Terminated(EpisodeOutcome),
}

/// The grid an episode runs on, with its located markers
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub grid: Grid,
    pub start: usize,
    pub goal: usize,
}

impl Course {
    /// Locate start and goal and check that the goal can be reached.
    pub fn locate(grid: Grid, engine: &PathEngine) -> Result<Self> {
        let start = grid.start()?;
        let goal = grid.goal()?;
        engine.shortest_path(&grid, start, goal)?;
        Ok(Self { grid, start, goal })
    }
}

/// Everything that happened in one move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based step number within the episode
    pub step: usize,
    pub state: usize,
    pub action: Direction,
    /// `None` when the move left the grid
    pub next_state: Option<usize>,
    pub reward: f64,
    pub termination: Option<Termination>,
}

/// Summary of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub steps: usize,
    pub total_reward: f64,
    /// Exploration rate the episode ran with
    pub epsilon: f64,
}

/// Learning parameters for a step
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub engine: &'a PathEngine,
    pub rewards: &'a RewardModel,
    pub learning_rate: f64,
    pub discount: f64,
    pub max_steps: usize,
}

/// Episode state machine
#[derive(Debug, Clone)]
pub struct Episode {
    number: usize,
    phase: EpisodePhase,
    course: Option<Course>,
    state: usize,
    total_reward: f64,
    steps: usize,
}

impl Episode {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            phase: EpisodePhase::AwaitingObservation,
            course: None,
            state: 0,
            total_reward: 0.0,
            steps: 0,
        }
    }

    /// Take the episode's grid snapshot from the environment.
    pub fn observe<E: Environment + ?Sized>(
        &mut self,
        env: &mut E,
        poll: &PollSettings,
        edges: EdgeMode,
        engine: &PathEngine,
    ) -> Result<()> {
        let labels = grid_snapshot(env, poll)?;
        let grid = Grid::from_labels(env.grid_width(), &labels)?.with_edge_mode(edges);
        self.begin(Course::locate(grid, engine)?);
        Ok(())
    }

    /// Start stepping on an already located course.
    pub fn begin(&mut self, course: Course) {
        self.state = course.start;
        self.course = Some(course);
        self.total_reward = 0.0;
        self.steps = 0;
        self.phase = EpisodePhase::Stepping;
    }

    /// Perform one move.
    ///
    /// The move is sent to the environment, the landing cell is computed
    /// from the grid (the environment is not asked where the agent ended
    /// up), and the Q-table is updated with the shaped reward.
    pub fn advance<E: Environment + ?Sized>(
        &mut self,
        action: Direction,
        env: &mut E,
        table: &mut QTable,
        ctx: &StepContext<'_>,
    ) -> Result<StepRecord> {
        let course = match (&self.phase, &self.course) {
            (EpisodePhase::Stepping, Some(course)) => course,
            _ => {
                return Err(Error::EpisodeNotStepping {
                    episode: self.number,
                });
            }
        };
        if table.num_states() != course.grid.len() {
            return Err(Error::GridSizeMismatch {
                grid_cells: course.grid.len(),
                table_states: table.num_states(),
            });
        }

        env.request_move(action)?;

        let state = self.state;
        let landing = course.grid.neighbor(state, action);
        let scored = ctx
            .rewards
            .evaluate(ctx.engine, &course.grid, landing, course.goal)?;

        match landing {
            Some(next) => table.update(
                state,
                action,
                scored.reward,
                next,
                ctx.learning_rate,
                ctx.discount,
            ),
            None => table.update_terminal(state, action, scored.reward, ctx.learning_rate),
        }

        self.total_reward += scored.reward;
        self.steps += 1;
        if let Some(next) = landing {
            self.state = next;
        }

        if let Some(termination) = scored.termination {
            self.phase = EpisodePhase::Terminated(termination.into());
        } else if self.steps >= ctx.max_steps {
            self.phase = EpisodePhase::Terminated(EpisodeOutcome::StepLimit);
        }

        debug!(
            episode = self.number,
            step = self.steps,
            from = state,
            to = ?landing,
            %action,
            reward = scored.reward,
            "step"
        );

        Ok(StepRecord {
            step: self.steps,
            state,
            action,
            next_state: landing,
            reward: scored.reward,
            termination: scored.termination,
        })
    }

    /// Stop a running episode between steps.
    pub fn cancel(&mut self) {
        if !self.is_terminated() {
            self.phase = EpisodePhase::Terminated(EpisodeOutcome::Cancelled);
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, EpisodePhase::Terminated(_))
    }

    pub fn outcome(&self) -> Option<EpisodeOutcome> {
        match self.phase {
            EpisodePhase::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Current cell index
    pub fn state(&self) -> usize {
        self.state
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn into_course(self) -> Option<Course> {
        self.course
    }

    /// Summary of a terminated episode
    pub fn summary(&self, epsilon: f64) -> Option<EpisodeSummary> {
        self.outcome().map(|outcome| EpisodeSummary {
            episode: self.number,
            outcome,
            steps: self.steps,
            total_reward: self.total_reward,
            epsilon,
        })
    }
}
