//! Deterministic physics module
//!
//! All particle logic lives here. This module must be pure and deterministic:
//! - Fixed sub-stepped timestep only
//! - Seeded RNG only
//! - Stable pair iteration order (by spawn index)
//! - No rendering or platform dependencies

pub mod particle;
pub mod simulation;

pub use particle::{DENSITY, Particle};
pub use simulation::Simulation;
