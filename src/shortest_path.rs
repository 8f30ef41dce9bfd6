//! Single-source shortest paths over a grid snapshot
//!
//! Uniform-cost search from a source cell to every reachable walkable cell.
//! The learning loop runs it once per step, from the cell the agent just
//! entered, and uses the number of cells on the path to the goal as its
//! reward signal.
//!
//! Vertices are settled in (distance, index) order, so among equally short
//! routes the one through lower-indexed cells is chosen. The result is
//! deterministic for a given grid.

use std::{cmp::Reverse, collections::BinaryHeap};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{Cell, Direction, Grid},
};

/// Cost of entering each walkable cell kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCosts {
    pub open: u32,
    pub hazard: u32,
}

impl Default for PathCosts {
    fn default() -> Self {
        Self { open: 1, hazard: 1 }
    }
}

impl PathCosts {
    /// Cost of stepping onto `cell`, or `None` if it cannot be entered
    pub fn entry_cost(&self, cell: Cell) -> Option<u32> {
        match cell {
            Cell::Obstructed => None,
            Cell::Hazard => Some(self.hazard),
            Cell::Open | Cell::Start | Cell::Goal => Some(self.open),
        }
    }
}

/// Per-vertex search record
#[derive(Debug, Clone, Copy)]
struct Vertex {
    distance: u64,
    predecessor: Option<usize>,
    settled: bool,
}

impl Vertex {
    const UNREACHED: Vertex = Vertex {
        distance: u64::MAX,
        predecessor: None,
        settled: false,
    };
}

/// Shortest-path engine
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEngine {
    costs: PathCosts,
}

impl PathEngine {
    pub fn new(costs: PathCosts) -> Self {
        Self { costs }
    }

    /// Cells from `source` to `destination`, both inclusive.
    ///
    /// Fails with [`Error::UnreachableDestination`] when either endpoint is
    /// obstructed or no walkable route connects them.
    pub fn shortest_path(
        &self,
        grid: &Grid,
        source: usize,
        destination: usize,
    ) -> Result<Vec<usize>> {
        let unreachable = Error::UnreachableDestination {
            origin: source,
            destination,
        };
        if !grid.cell(source)?.is_walkable() || !grid.cell(destination)?.is_walkable() {
            return Err(unreachable);
        }

        let mut vertices = vec![Vertex::UNREACHED; grid.len()];
        vertices[source].distance = 0;

        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((0u64, source)));

        while let Some(Reverse((distance, current))) = frontier.pop() {
            if vertices[current].settled || distance > vertices[current].distance {
                continue;
            }
            vertices[current].settled = true;
            if current == destination {
                break;
            }

            for (_, next) in grid.walkable_neighbors(current) {
                if vertices[next].settled {
                    continue;
                }
                let Some(cost) = self.costs.entry_cost(grid.cells()[next]) else {
                    continue;
                };
                let candidate = distance + u64::from(cost);
                if candidate < vertices[next].distance {
                    vertices[next].distance = candidate;
                    vertices[next].predecessor = Some(current);
                    frontier.push(Reverse((candidate, next)));
                }
            }
        }

        if !vertices[destination].settled {
            return Err(unreachable);
        }

        let mut path = vec![destination];
        let mut cursor = destination;
        while cursor != source {
            cursor = vertices[cursor].predecessor.ok_or(Error::UnreachableDestination {
                origin: source,
                destination,
            })?;
            path.push(cursor);
        }
        path.reverse();
        Ok(path)
    }

    /// Number of cells on the shortest path, endpoints included.
    pub fn path_length(&self, grid: &Grid, source: usize, destination: usize) -> Result<usize> {
        Ok(self.shortest_path(grid, source, destination)?.len())
    }
}

/// Shortest path with uniform costs.
pub fn shortest_path(grid: &Grid, source: usize, destination: usize) -> Result<Vec<usize>> {
    PathEngine::default().shortest_path(grid, source, destination)
}

/// Convert a path of cell indices into the moves that walk it.
pub fn moves_along(grid: &Grid, path: &[usize]) -> Result<Vec<Direction>> {
    path.windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            Direction::ALL
                .into_iter()
                .find(|&d| grid.neighbor(from, d) == Some(to))
                .ok_or(Error::NonAdjacentStep { from, to })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_self_is_singleton() {
        let grid = Grid::parse("S..\n...\n..G").unwrap();
        assert_eq!(shortest_path(&grid, 4, 4).unwrap(), vec![4]);
    }

    #[test]
    fn test_corridor_length_is_manhattan_plus_one() {
        let grid = Grid::parse("S...G").unwrap();
        let path = shortest_path(&grid, 0, 4).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_routes_around_walls() {
        let grid = Grid::parse(
            "
            S#G
            .#.
            ...
            ",
        )
        .unwrap();
        let path = shortest_path(&grid, 0, 2).unwrap();
        assert_eq!(path, vec![0, 3, 6, 7, 8, 5, 2]);
    }

    #[test]
    fn test_tie_break_prefers_lower_indices() {
        let grid = Grid::parse("S.\n.G").unwrap();
        // Both routes have length 3; the one through cell 1 settles first.
        assert_eq!(shortest_path(&grid, 0, 3).unwrap(), vec![0, 1, 3]);
    }

    #[test]
    fn test_obstructed_source_is_unreachable() {
        let grid = Grid::parse("#.G").unwrap();
        let err = shortest_path(&grid, 0, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::UnreachableDestination {
                origin: 0,
                destination: 2
            }
        ));
    }

    #[test]
    fn test_disconnected_destination_is_unreachable() {
        let grid = Grid::parse("S#G").unwrap();
        assert!(matches!(
            shortest_path(&grid, 0, 2),
            Err(Error::UnreachableDestination { .. })
        ));
    }

    #[test]
    fn test_out_of_range_source() {
        let grid = Grid::parse("S.G").unwrap();
        assert!(matches!(
            shortest_path(&grid, 9, 2),
            Err(Error::IndexOutOfBounds { index: 9, len: 3 })
        ));
    }

    #[test]
    fn test_hazard_cost_diverts_route() {
        let grid = Grid::parse(
            "
            S~G
            ...
            ",
        )
        .unwrap();
        let uniform = PathEngine::default();
        assert_eq!(uniform.shortest_path(&grid, 0, 2).unwrap(), vec![0, 1, 2]);

        let careful = PathEngine::new(PathCosts { open: 1, hazard: 5 });
        assert_eq!(
            careful.shortest_path(&grid, 0, 2).unwrap(),
            vec![0, 3, 4, 5, 2]
        );
    }

    #[test]
    fn test_row_wrap_only_in_wrap_mode() {
        // Cell 2 and cell 3 are flat-index neighbors but sit on different rows.
        let grid = Grid::parse("#.S\nG##").unwrap();
        assert!(shortest_path(&grid, 2, 3).is_err());

        let wrapped = grid.with_edge_mode(crate::grid::EdgeMode::Wrap);
        assert_eq!(shortest_path(&wrapped, 2, 3).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_moves_along_path() {
        let grid = Grid::parse("S#G\n.#.\n...").unwrap();
        let path = shortest_path(&grid, 0, 2).unwrap();
        let moves = moves_along(&grid, &path).unwrap();
        assert_eq!(
            moves,
            vec![
                Direction::South,
                Direction::South,
                Direction::East,
                Direction::East,
                Direction::North,
                Direction::North,
            ]
        );
    }

    #[test]
    fn test_moves_along_rejects_gaps() {
        let grid = Grid::parse("S...G").unwrap();
        assert!(matches!(
            moves_along(&grid, &[0, 2]),
            Err(Error::NonAdjacentStep { from: 0, to: 2 })
        ));
    }

    #[test]
    fn test_moves_along_follows_edge_mode() {
        let grid = Grid::parse("...\n...").unwrap();
        assert!(matches!(
            moves_along(&grid, &[2, 3]),
            Err(Error::NonAdjacentStep { from: 2, to: 3 })
        ));

        let wrapped = grid.with_edge_mode(crate::grid::EdgeMode::Wrap);
        assert_eq!(moves_along(&wrapped, &[2, 3]).unwrap(), vec![Direction::East]);
    }

    #[test]
    fn test_moves_along_single_column() {
        let grid = Grid::parse("S\n.\nG").unwrap();
        assert_eq!(moves_along(&grid, &[1, 0]).unwrap(), vec![Direction::North]);
        assert_eq!(
            moves_along(&grid, &[0, 1, 2]).unwrap(),
            vec![Direction::South, Direction::South]
        );
    }
}
