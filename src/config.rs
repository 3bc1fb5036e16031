//! Simulation configuration.
//!
//! Everything tunable lives here, validated once up front so the tick
//! loop never has to fail. Defaults come from [`crate::consts`]. The
//! struct deserializes from partial JSON, missing fields fall back to
//! their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::palette::{RAINBOW, Rgb};

/// Tunable parameters, fixed for a simulation's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Radius of the circular arena.
    pub arena_radius: f32,
    /// Arena center in world coordinates.
    pub center: Vec2,
    /// Constant acceleration applied to every particle (y grows downward).
    pub gravity: Vec2,
    /// Physics sub-steps per tick.
    pub substeps: u32,
    /// Most particles the simulation will ever hold.
    pub spawn_cap: u32,
    /// Ticks between consecutive spawns.
    pub spawn_interval_ticks: u32,
    /// Fixed spawn site; `None` puts it half a radius above the center.
    pub spawn_pos: Option<Vec2>,
    /// Launch speed of spawned particles.
    pub spawn_speed: f32,
    /// Angle between consecutive launch directions (radians).
    pub spawn_angle_increment: f32,
    /// Bounds for the random radius draw.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Wall bounce damping in [0, 1]; 1 keeps all normal speed.
    pub damping: f32,
    /// Pair collision restitution in [0, 1]; 1 is perfectly elastic.
    pub restitution: f32,
    /// Radial impulse strength and the interval it acts over.
    pub impulse_strength: f32,
    pub impulse_duration: f32,
    /// Gradient anchors for spawn colors.
    pub palette: Vec<Rgb>,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_radius: ARENA_RADIUS,
            center: Vec2::ZERO,
            gravity: Vec2::new(0.0, GRAVITY),
            substeps: SUBSTEPS,
            spawn_cap: SPAWN_CAP,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            spawn_pos: None,
            spawn_speed: SPAWN_SPEED,
            spawn_angle_increment: SPAWN_ANGLE_INCREMENT,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            damping: DAMPING,
            restitution: RESTITUTION,
            impulse_strength: IMPULSE_STRENGTH,
            impulse_duration: IMPULSE_DURATION,
            palette: RAINBOW.to_vec(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Check every field, returning the first rule violated.
    pub fn validate(&self) -> Result<()> {
        if !self.arena_radius.is_finite() || self.arena_radius <= 0.0 {
            return Err(invalid("arena_radius must be finite and > 0"));
        }
        if !self.center.is_finite() {
            return Err(invalid("center must be finite"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity must be finite"));
        }
        if self.substeps == 0 {
            return Err(invalid("substeps must be >= 1"));
        }
        if self.spawn_interval_ticks == 0 {
            return Err(invalid("spawn_interval_ticks must be >= 1"));
        }
        if !self.spawn_speed.is_finite() || self.spawn_speed < 0.0 {
            return Err(invalid("spawn_speed must be finite and >= 0"));
        }
        if !self.spawn_angle_increment.is_finite() {
            return Err(invalid("spawn_angle_increment must be finite"));
        }
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(invalid("min_radius must be finite and > 0"));
        }
        if !self.max_radius.is_finite() || self.max_radius < self.min_radius {
            return Err(invalid("max_radius must be finite and >= min_radius"));
        }
        if self.max_radius >= self.arena_radius {
            return Err(invalid("max_radius must be smaller than arena_radius"));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(invalid("damping must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(invalid("restitution must be within [0, 1]"));
        }
        if !self.impulse_strength.is_finite() || self.impulse_strength < 0.0 {
            return Err(invalid("impulse_strength must be finite and >= 0"));
        }
        if !self.impulse_duration.is_finite() || self.impulse_duration < 0.0 {
            return Err(invalid("impulse_duration must be finite and >= 0"));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette needs at least one anchor"));
        }
        if let Some(pos) = self.spawn_pos {
            if !pos.is_finite() {
                return Err(invalid("spawn_pos must be finite"));
            }
            if pos.distance(self.center) >= self.arena_radius {
                return Err(invalid("spawn_pos must lie inside the arena"));
            }
        }
        Ok(())
    }

    /// Effective spawn site, resolving the default.
    pub fn spawn_site(&self) -> Vec2 {
        self.spawn_pos
            .unwrap_or_else(|| self.center + Vec2::new(0.0, -self.arena_radius / 2.0))
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_string())
}
