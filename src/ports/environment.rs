//! Environment port - the simulation host that owns the world
//!
//! The learning loop never talks to a simulator directly. It asks this port
//! for grid snapshots and sends it discrete move commands; connection
//! handling, mission setup and retries live behind implementations.

use std::{
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{Direction, SNAPSHOT_SIDE},
};

/// Environment trait - source of grid observations and sink for moves
///
/// # Examples
///
/// ```
/// use gridlearn::{grid::Direction, ports::Environment};
///
/// struct Frozen(Vec<String>);
///
/// impl Environment for Frozen {
///     fn grid_width(&self) -> usize {
///         3
///     }
///
///     fn poll_observation(&mut self) -> gridlearn::Result<Option<Vec<String>>> {
///         Ok(Some(self.0.clone()))
///     }
///
///     fn request_move(&mut self, _direction: Direction) -> gridlearn::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Environment {
    /// Cells per row of the observation grid.
    ///
    /// # Default Implementation
    ///
    /// Width of the square block snapshot.
    fn grid_width(&self) -> usize {
        SNAPSHOT_SIDE
    }

    /// Prepare the world for a new episode.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn begin_episode(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Latest grid observation, if one has arrived.
    ///
    /// Returns `Ok(None)` while the environment has nothing new to report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the host reports an error.
    fn poll_observation(&mut self) -> Result<Option<Vec<String>>>;

    /// Send a one-cell move command.
    ///
    /// Fire-and-forget: the caller does not wait for the new position.
    fn request_move(&mut self, direction: Direction) -> Result<()>;
}

/// Bounded polling for observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    /// Give up after this many milliseconds
    pub timeout_ms: u64,
    /// Sleep between polls
    pub interval_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            interval_ms: 100,
        }
    }
}

/// Poll `env` until it yields a grid snapshot.
///
/// Environment errors are returned immediately; running out of time yields
/// [`Error::EnvironmentTimeout`].
pub fn grid_snapshot<E: Environment + ?Sized>(
    env: &mut E,
    settings: &PollSettings,
) -> Result<Vec<String>> {
    let timeout = Duration::from_millis(settings.timeout_ms);
    let interval = Duration::from_millis(settings.interval_ms);
    let started = Instant::now();

    loop {
        if let Some(labels) = env.poll_observation()? {
            return Ok(labels);
        }
        let waited = started.elapsed();
        if waited >= timeout {
            return Err(Error::EnvironmentTimeout {
                waited_ms: waited.as_millis() as u64,
            });
        }
        thread::sleep(interval.min(timeout - waited));
    }
}
