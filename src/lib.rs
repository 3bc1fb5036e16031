//! Pebble Pit - deterministic 2D particle physics in a circular arena
//!
//! Core modules:
//! - `sim`: Particles and the sub-stepped simulation driver
//! - `config`: Validated tuning parameters
//! - `palette`: Spawn-order color gradient
//! - `snapshot`: Read-only frame state and a bounded handoff queue
//! - `error`: Crate error and result types

pub mod config;
pub mod error;
pub mod palette;
pub mod sim;
pub mod snapshot;

pub use config::SimConfig;
pub use error::{Error, Result};

use glam::Vec2;

/// Tuning constants, also the [`SimConfig`] defaults.
pub mod consts {
    use std::f32::consts::PI;

    /// Frame interval hosts are expected to drive (100 Hz).
    pub const FRAME_DT: f32 = 0.01;
    /// Physics sub-steps per frame.
    pub const SUBSTEPS: u32 = 16;

    /// Arena radius.
    pub const ARENA_RADIUS: f32 = 420.0;
    /// Downward gravity magnitude (y grows downward), units/s².
    pub const GRAVITY: f32 = 1500.0;

    /// Most particles a simulation will hold.
    pub const SPAWN_CAP: u32 = 400;
    /// Ticks between consecutive spawns.
    pub const SPAWN_INTERVAL_TICKS: u32 = 1;
    /// Launch speed of spawned particles.
    pub const SPAWN_SPEED: f32 = 1000.0;
    /// Angle between consecutive launch directions (radians).
    pub const SPAWN_ANGLE_INCREMENT: f32 = PI / 32.0;
    /// Spawned radius bounds.
    pub const MIN_RADIUS: f32 = 3.0;
    pub const MAX_RADIUS: f32 = 15.0;

    /// Wall bounce damping (1 = lossless).
    pub const DAMPING: f32 = 1.0;
    /// Pair collision restitution (1 = perfectly elastic).
    pub const RESTITUTION: f32 = 1.0;

    /// Radial impulse strength and the interval it acts over.
    pub const IMPULSE_STRENGTH: f32 = 5000.0;
    pub const IMPULSE_DURATION: f32 = 5.0;

    /// Distance floor below which direction-dependent math is skipped.
    pub const MIN_DISTANCE: f32 = 1e-6;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
