//! A single circular body.
//!
//! Particles integrate under constant gravity with velocity Verlet, bounce
//! off the circular arena wall, and resolve pairwise elastic collisions
//! along the line of centers. All state is finite by construction and
//! every degenerate direction (zero separation, particle on the arena
//! center) is skipped rather than divided by.

use std::f32::consts::PI;

use glam::Vec2;

use crate::consts::MIN_DISTANCE;
use crate::error::{Error, Result};
use crate::palette::Rgb;

/// Uniform disc density; mass is density times area.
pub const DENSITY: f32 = 1.0;

/// One circular body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    radius: f32,
    mass: f32,
    color: Rgb,
    damping: f32,
    restitution: f32,
}

impl Particle {
    /// Create a particle at `position` moving with `velocity`.
    ///
    /// Radius must be finite and positive; position and velocity must be
    /// finite. Wall damping and restitution start lossless at 1 and can be
    /// tightened with [`with_damping`](Self::with_damping) and
    /// [`with_restitution`](Self::with_restitution).
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: Rgb) -> Result<Self> {
        if !position.is_finite() {
            return Err(Error::InvalidParticle("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParticle("velocity must be finite".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParticle("radius must be finite and > 0".into()));
        }
        Ok(Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            radius,
            mass: DENSITY * PI * radius * radius,
            color,
            damping: 1.0,
            restitution: 1.0,
        })
    }

    /// Set the wall bounce damping factor.
    pub fn with_damping(mut self, damping: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&damping) {
            return Err(Error::InvalidParticle("damping must be within [0, 1]".into()));
        }
        self.damping = damping;
        Ok(self)
    }

    /// Set the collision restitution.
    pub fn with_restitution(mut self, restitution: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(Error::InvalidParticle(
                "restitution must be within [0, 1]".into(),
            ));
        }
        self.restitution = restitution;
        Ok(self)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Kinetic energy, `m/2 * |v|²`.
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Advance one interval of velocity Verlet under constant `gravity`.
    ///
    /// Verlet rather than plain Euler: the symmetric update keeps energy
    /// stable over the thousands of sub-steps a long run accumulates.
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        let acc_next = gravity;
        self.position += self.velocity * dt + self.acceleration * (dt * dt * 0.5);
        self.velocity += (self.acceleration + acc_next) * (dt * 0.5);
        self.acceleration = acc_next;
    }

    /// Kick the velocity by `acc` acting over `interval`.
    pub fn apply_impulse(&mut self, acc: Vec2, interval: f32) {
        self.velocity += acc * interval;
    }

    /// Keep the particle inside a circle of `arena_radius` around `center`.
    ///
    /// Past the rim the outward velocity component is reflected and scaled
    /// by the damping factor, the tangential component kept, and the
    /// position clamped back onto the rim so numerical drift cannot leak
    /// bodies out. A particle sitting exactly on the center has no outward
    /// direction and is left alone.
    pub fn confine_to_arena(&mut self, center: Vec2, arena_radius: f32) {
        let outward = self.position - center;
        let dist = outward.length();
        if dist <= arena_radius - self.radius || dist <= MIN_DISTANCE {
            return;
        }

        let normal = outward / dist;
        let tangent = Vec2::new(-normal.y, normal.x);
        let normal_vel = self.velocity.dot(normal) * self.damping;
        let tangent_vel = self.velocity.dot(tangent);

        self.velocity = tangent * tangent_vel - normal * normal_vel;
        self.position = center + normal * (arena_radius - self.radius);
    }

    /// Whether the two bodies touch or overlap.
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.position.distance(other.position) <= self.radius + other.radius
    }

    /// Elastic collision response along the line of centers.
    ///
    /// Velocities change by the two-body collision formula projected onto
    /// the separation axis, using the pair's effective restitution, the
    /// smaller of the two coefficients. Both bodies are then pushed half
    /// the overlap apart so they end exactly touching. Coincident centers
    /// give no axis to separate along; the pair is left untouched.
    pub fn resolve_collision(&mut self, other: &mut Particle) {
        let separation = self.position - other.position;
        let dist = separation.length();
        if dist <= MIN_DISTANCE {
            return;
        }

        let restitution = self.restitution.min(other.restitution);
        let rel_vel = self.velocity - other.velocity;
        let total_mass = self.mass + other.mass;
        let shared = (1.0 + restitution) * rel_vel.dot(separation) / (dist * dist);

        self.velocity -= separation * (shared * other.mass / total_mass);
        other.velocity += separation * (shared * self.mass / total_mass);

        let overlap = (self.radius + other.radius - dist) * 0.5;
        let dir = separation / dist;
        self.position += dir * overlap;
        other.position -= dir * overlap;
    }
}
