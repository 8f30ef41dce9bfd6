//! Subcommand implementations

pub mod route;
pub mod train;
