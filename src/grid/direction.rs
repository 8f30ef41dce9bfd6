//! Cardinal moves on a flat-indexed grid

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four discrete moves.
///
/// The declaration order is the fixed enumeration order used for
/// tie-breaking and for action-value table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions in enumeration order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Number of actions
    pub const COUNT: usize = 4;

    /// Column of this direction in the action-value table
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    /// Flat-index offset for a grid with the given row width
    pub fn offset(self, width: usize) -> isize {
        let width = width as isize;
        match self {
            Direction::North => -width,
            Direction::South => width,
            Direction::West => -1,
            Direction::East => 1,
        }
    }

    /// Discrete movement command understood by the environment
    pub fn command(self) -> &'static str {
        match self {
            Direction::North => "movenorth 1",
            Direction::South => "movesouth 1",
            Direction::West => "movewest 1",
            Direction::East => "moveeast 1",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_enumeration_order() {
        for (i, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), i);
            assert_eq!(Direction::from_index(i), Some(*direction));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn test_offsets_for_canonical_width() {
        assert_eq!(Direction::North.offset(21), -21);
        assert_eq!(Direction::South.offset(21), 21);
        assert_eq!(Direction::West.offset(21), -1);
        assert_eq!(Direction::East.offset(21), 1);
    }

    #[test]
    fn test_commands() {
        assert_eq!(Direction::North.command(), "movenorth 1");
        assert_eq!(Direction::West.command(), "movewest 1");
    }
}
