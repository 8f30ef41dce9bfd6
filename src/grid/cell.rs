//! Cell kinds and their snapshot labels

use serde::{Deserialize, Serialize};

/// Block label the environment reports for empty space.
pub const AIR_LABEL: &str = "air";
/// Block label for a burning cell.
pub const FIRE_LABEL: &str = "fire";
/// Block label marking the start cell.
pub const START_LABEL: &str = "emerald_block";
/// Block label marking the goal cell.
pub const GOAL_LABEL: &str = "redstone_block";

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Walkable floor with no special meaning
    Open,
    /// Cannot be entered
    Obstructed,
    /// Walkable, but entering it is penalized
    Hazard,
    Start,
    Goal,
}

impl Cell {
    /// Classify a block label from an environment snapshot.
    ///
    /// Unknown labels are ordinary floor.
    pub fn from_label(label: &str) -> Cell {
        match label {
            AIR_LABEL => Cell::Obstructed,
            FIRE_LABEL => Cell::Hazard,
            START_LABEL => Cell::Start,
            GOAL_LABEL => Cell::Goal,
            _ => Cell::Open,
        }
    }

    /// Representative block label for this kind.
    pub fn label(self) -> &'static str {
        match self {
            Cell::Open => "diamond_block",
            Cell::Obstructed => AIR_LABEL,
            Cell::Hazard => FIRE_LABEL,
            Cell::Start => START_LABEL,
            Cell::Goal => GOAL_LABEL,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Obstructed => '#',
            Cell::Hazard => '~',
            Cell::Start => 'S',
            Cell::Goal => 'G',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Open),
            '#' => Some(Cell::Obstructed),
            '~' | 'F' | 'f' => Some(Cell::Hazard),
            'S' | 's' => Some(Cell::Start),
            'G' | 'g' => Some(Cell::Goal),
            _ => None,
        }
    }

    /// Whether an agent may stand on this cell
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Obstructed)
    }

    /// Name used in error messages for marker cells
    pub(crate) fn marker_name(self) -> &'static str {
        match self {
            Cell::Start => "start",
            Cell::Goal => "goal",
            Cell::Hazard => "hazard",
            Cell::Obstructed => "obstructed",
            Cell::Open => "open",
        }
    }
}
