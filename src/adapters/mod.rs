//! Adapters implementing domain ports.
//!
//! This module contains implementations of the traits defined in the ports
//! module. Following hexagonal architecture, adapters depend on domain
//! ports, not the other way around.

pub mod simulated;

pub use simulated::SimulatedEnvironment;
