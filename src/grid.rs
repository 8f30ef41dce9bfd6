//! Flat-indexed grid of typed cells

pub mod cell;
pub mod direction;
pub mod layout;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cell::Cell;
pub use direction::Direction;

use crate::error::{Error, Result};

/// Side length of the observation window the environment reports
pub const SNAPSHOT_SIDE: usize = 21;

/// How east/west moves behave at the first and last column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// Horizontal moves never leave their row
    #[default]
    Bounded,
    /// Plain flat-index arithmetic: east from the last column lands on the
    /// first cell of the next row
    Wrap,
}

/// A grid snapshot, stored row-major.
///
/// Immutable once built; an episode works on a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    edges: EdgeMode,
}

impl Grid {
    /// Build a grid from row-major cells.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGridShape {
                message: format!("dimensions must be non-zero, got {width}x{height}"),
            });
        }
        if cells.len() != width * height {
            return Err(Error::InvalidGridShape {
                message: format!(
                    "expected {} cells for {width}x{height}, got {}",
                    width * height,
                    cells.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
            edges: EdgeMode::default(),
        })
    }

    /// Build a grid from environment block labels, `width` cells per row.
    pub fn from_labels<S: AsRef<str>>(width: usize, labels: &[S]) -> Result<Self> {
        if width == 0 || labels.len() % width != 0 {
            return Err(Error::InvalidGridShape {
                message: format!("{} labels do not fill rows of {width}", labels.len()),
            });
        }
        let cells = labels.iter().map(|l| Cell::from_label(l.as_ref())).collect();
        Self::new(width, labels.len() / width, cells)
    }

    /// Block labels for every cell, row-major
    pub fn labels(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.label().to_string()).collect()
    }

    /// Parse a text map (one row per line, see [`Cell::from_char`]).
    pub fn parse(map: &str) -> Result<Self> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for line in map.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row_start = cells.len();
            for (column, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(Error::InvalidMapCharacter {
                    character: c,
                    row: height,
                    column,
                })?;
                cells.push(cell);
            }
            let row_width = cells.len() - row_start;
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(Error::InvalidGridShape {
                        message: format!("row {height} has {row_width} cells, expected {w}"),
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Self::new(width.unwrap_or(0), height, cells)
    }

    pub fn with_edge_mode(mut self, edges: EdgeMode) -> Self {
        self.edges = edges;
        self
    }

    pub fn edge_mode(&self) -> EdgeMode {
        self.edges
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Kind of the cell at `index`
    pub fn cell(&self, index: usize) -> Result<Cell> {
        self.cells
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.cells.len(),
            })
    }

    /// First index holding `kind`, in row-major order
    pub fn index_of(&self, kind: Cell) -> Result<usize> {
        self.cells
            .iter()
            .position(|&c| c == kind)
            .ok_or(Error::MissingMarker {
                marker: kind.marker_name(),
            })
    }

    pub fn start(&self) -> Result<usize> {
        self.index_of(Cell::Start)
    }

    pub fn goal(&self) -> Result<usize> {
        self.index_of(Cell::Goal)
    }

    /// Cell reached by moving one step from `index`.
    ///
    /// Returns `None` when the step leaves the grid. Whether east/west moves
    /// may cross into an adjacent row depends on the grid's [`EdgeMode`].
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.cells.len() {
            return None;
        }
        let column = index % self.width;
        if self.edges == EdgeMode::Bounded {
            let leaves_row = match direction {
                Direction::West => column == 0,
                Direction::East => column + 1 == self.width,
                Direction::North | Direction::South => false,
            };
            if leaves_row {
                return None;
            }
        }
        let target = index as isize + direction.offset(self.width);
        if target < 0 || target as usize >= self.cells.len() {
            return None;
        }
        Some(target as usize)
    }

    /// Walkable cells adjacent to `index`, in direction order
    pub fn walkable_neighbors(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            self.neighbor(index, d)
                .filter(|&n| self.cells[n].is_walkable())
                .map(|n| (d, n))
        })
    }

    /// (row, column) of a flat index
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
