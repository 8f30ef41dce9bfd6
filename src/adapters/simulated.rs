//! In-process stand-in for the simulation host.
//!
//! Serves a fixed grid as its observation, tracks where the agent would be
//! after each move, and can be told to misbehave so error paths can be
//! exercised without a live simulator.

use crate::{
    Result,
    error::Error,
    grid::{Direction, Grid},
    ports::Environment,
};

/// Simulated environment over a fixed layout.
///
/// # Examples
///
/// ```
/// use gridlearn::adapters::SimulatedEnvironment;
/// use gridlearn::grid::{Direction, Grid};
/// use gridlearn::ports::Environment;
///
/// let mut env = SimulatedEnvironment::new(Grid::parse("S.G")?);
/// env.begin_episode(0)?;
/// env.request_move(Direction::East)?;
/// assert_eq!(env.position(), Some(1));
/// # Ok::<(), gridlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedEnvironment {
    grid: Grid,
    labels: Vec<String>,
    position: Option<usize>,
    moves: Vec<Direction>,
    episodes_started: usize,
    observation_delay: usize,
    pending_polls: usize,
    fail_after_moves: Option<usize>,
    fail_observations: bool,
}

impl SimulatedEnvironment {
    pub fn new(grid: Grid) -> Self {
        let labels = grid.labels();
        let position = grid.start().ok();
        Self {
            grid,
            labels,
            position,
            moves: Vec::new(),
            episodes_started: 0,
            observation_delay: 0,
            pending_polls: 0,
            fail_after_moves: None,
            fail_observations: false,
        }
    }

    /// Answer the first `polls` observation requests of each episode with
    /// "nothing yet".
    pub fn with_observation_delay(mut self, polls: usize) -> Self {
        self.observation_delay = polls;
        self.pending_polls = polls;
        self
    }

    /// Report a lost connection once `moves` move commands have been accepted.
    pub fn failing_after_moves(mut self, moves: usize) -> Self {
        self.fail_after_moves = Some(moves);
        self
    }

    /// Report an error on every observation request.
    pub fn failing_observations(mut self) -> Self {
        self.fail_observations = true;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every move command received so far, across episodes
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    pub fn episodes_started(&self) -> usize {
        self.episodes_started
    }

    /// Where the simulated agent stands, `None` once it has left the grid
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl Environment for SimulatedEnvironment {
    fn grid_width(&self) -> usize {
        self.grid.width()
    }

    fn begin_episode(&mut self, _episode: usize) -> Result<()> {
        self.episodes_started += 1;
        self.pending_polls = self.observation_delay;
        self.position = Some(self.grid.start()?);
        Ok(())
    }

    fn poll_observation(&mut self) -> Result<Option<Vec<String>>> {
        if self.fail_observations {
            return Err(Error::environment("could not load grid"));
        }
        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            return Ok(None);
        }
        Ok(Some(self.labels.clone()))
    }

    fn request_move(&mut self, direction: Direction) -> Result<()> {
        if self.fail_after_moves == Some(self.moves.len()) {
            return Err(Error::environment("connection to simulation lost"));
        }
        self.moves.push(direction);
        self.position = self
            .position
            .and_then(|index| self.grid.neighbor(index, direction));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_matches_grid() {
        let grid = Grid::parse("S~#\n..G").unwrap();
        let mut env = SimulatedEnvironment::new(grid.clone());
        let labels = env.poll_observation().unwrap().unwrap();
        assert_eq!(Grid::from_labels(env.grid_width(), &labels).unwrap(), grid);
    }

    #[test]
    fn test_observation_delay_resets_per_episode() {
        let mut env =
            SimulatedEnvironment::new(Grid::parse("S.G").unwrap()).with_observation_delay(2);
        env.begin_episode(0).unwrap();
        assert!(env.poll_observation().unwrap().is_none());
        assert!(env.poll_observation().unwrap().is_none());
        assert!(env.poll_observation().unwrap().is_some());
        env.begin_episode(1).unwrap();
        assert!(env.poll_observation().unwrap().is_none());
        assert_eq!(env.episodes_started(), 2);
    }

    #[test]
    fn test_moves_track_position() {
        let mut env = SimulatedEnvironment::new(Grid::parse("S.\n.G").unwrap());
        env.request_move(Direction::East).unwrap();
        env.request_move(Direction::South).unwrap();
        assert_eq!(env.position(), Some(3));
        env.request_move(Direction::East).unwrap();
        assert_eq!(env.position(), None);
        assert_eq!(env.moves().len(), 3);
    }

    #[test]
    fn test_failure_injection() {
        let mut env =
            SimulatedEnvironment::new(Grid::parse("S.G").unwrap()).failing_after_moves(1);
        env.request_move(Direction::East).unwrap();
        assert!(matches!(
            env.request_move(Direction::East),
            Err(Error::Environment { .. })
        ));

        let mut env =
            SimulatedEnvironment::new(Grid::parse("S.G").unwrap()).failing_observations();
        assert!(env.poll_observation().is_err());
    }
}
