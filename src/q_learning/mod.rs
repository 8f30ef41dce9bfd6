//! Tabular Q-learning
//!
//! The action-value table maps every grid cell and each of the four moves to
//! an estimated return. It is updated with the off-policy TD rule
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! and read greedily when the learned route is reported.
//!
//! ## Usage Example
//!
//! ```
//! use gridlearn::grid::Direction;
//! use gridlearn::q_learning::{EpsilonGreedy, QTable};
//!
//! let mut table = QTable::new(25);
//! table.update(0, Direction::East, -7.0, 1, 0.9, 0.9);
//! assert_eq!(table.best_action(0), Direction::North);
//!
//! let policy = EpsilonGreedy::new(0.1);
//! assert_eq!(policy.epsilon, 0.1);
//! ```

pub mod exploration;
pub mod q_table;

pub use exploration::EpsilonGreedy;
pub use q_table::QTable;
