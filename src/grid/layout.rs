//! Built-in layouts and map loading

use std::{fs, path::Path};

use super::{Cell, Grid, SNAPSHOT_SIDE};
use crate::error::{Error, Result};

/// Platform cells relative to the start, as (x, z) = (column, row) offsets
const PLATFORM_COLUMNS: usize = 3;
const PLATFORM_ROWS: usize = 7;
const GOAL_OFFSET: (usize, usize) = (2, 6);
const HAZARD_OFFSETS: [(usize, usize); 7] =
    [(1, 0), (2, 0), (0, 2), (1, 2), (2, 4), (1, 5), (2, 5)];

/// The demonstration course: a 3x7 platform floating in air, seen through
/// a 21x21 window centred on the start cell.
///
/// Hazards are placed where the mission draws its fire strips. A live
/// mission observes the floor one level down and sees `netherrack` under
/// the fire, so its snapshots contain no hazard cells; this layout marks
/// them explicitly.
pub fn demo() -> Grid {
    let centre = SNAPSHOT_SIDE / 2;
    let mut cells = vec![Cell::Obstructed; SNAPSHOT_SIDE * SNAPSHOT_SIDE];
    let at = |x: usize, z: usize| (centre + z) * SNAPSHOT_SIDE + centre + x;

    for z in 0..PLATFORM_ROWS {
        for x in 0..PLATFORM_COLUMNS {
            cells[at(x, z)] = Cell::Open;
        }
    }
    for (x, z) in HAZARD_OFFSETS {
        cells[at(x, z)] = Cell::Hazard;
    }
    cells[at(0, 0)] = Cell::Start;
    cells[at(GOAL_OFFSET.0, GOAL_OFFSET.1)] = Cell::Goal;

    Grid {
        width: SNAPSHOT_SIDE,
        height: SNAPSHOT_SIDE,
        cells,
        edges: Default::default(),
    }
}

/// Open square room with the start in the top-left and the goal in the
/// bottom-right corner.
pub fn open_room(side: usize) -> Result<Grid> {
    if side < 2 {
        return Err(Error::InvalidGridShape {
            message: format!("room side must be at least 2, got {side}"),
        });
    }
    let mut cells = vec![Cell::Open; side * side];
    cells[0] = Cell::Start;
    cells[side * side - 1] = Cell::Goal;
    Grid::new(side, side, cells)
}

/// Read a text map from disk.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read grid map {}", path.display()),
        source,
    })?;
    Grid::parse(&text)
}
