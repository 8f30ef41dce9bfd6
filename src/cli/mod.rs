//! CLI infrastructure for the gridlearn toolkit
//!
//! This module provides the command-line interface for training an agent on
//! a grid and inspecting shortest routes.

pub mod commands;
pub mod config;
pub mod output;
