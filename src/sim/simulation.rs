//! Simulation driver: spawn policy, sub-stepped integration, pairwise sweep.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::SimConfig;
use crate::consts::MIN_DISTANCE;
use crate::error::Result;
use crate::palette::Gradient;
use crate::polar_to_cartesian;
use crate::sim::particle::Particle;
use crate::snapshot::{FrameSnapshot, ParticleState};

/// Owns the particle population and drives it through time.
///
/// The only sources of randomness are the spawn radius draws from a seeded
/// Pcg32, so two simulations built from the same config (with the same
/// seed) reproduce identical trajectories bit for bit.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    gradient: Gradient,
    spawn_site: Vec2,
    seed: u64,
    rng: Pcg32,
    particles: Vec<Particle>,
    spawned: u32,
    ticks_since_spawn: u32,
    ticks: u64,
    time: f64,
}

impl Simulation {
    /// Build a simulation, failing fast on a degenerate config.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let gradient = Gradient::new(config.palette.clone())?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let spawn_site = config.spawn_site();
        let capacity = config.spawn_cap as usize;
        let sim = Self {
            config,
            gradient,
            spawn_site,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            particles: Vec::with_capacity(capacity),
            spawned: 0,
            ticks_since_spawn: 0,
            ticks: 0,
            time: 0.0,
        };
        log::info!(
            "simulation ready: spawn cap {}, {} substeps, seed {}",
            sim.config.spawn_cap,
            sim.config.substeps,
            sim.seed
        );
        Ok(sim)
    }

    /// Advance one displayed frame.
    ///
    /// The spawn policy runs once per tick; `frame_dt` is then divided
    /// into equal sub-intervals, each of which integrates every particle,
    /// confines it to the arena, and resolves every overlapping pair.
    /// Sweeping every sub-interval keeps fast particles from tunneling
    /// through each other between checks.
    pub fn tick(&mut self, frame_dt: f32) {
        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn >= self.config.spawn_interval_ticks {
            self.ticks_since_spawn = 0;
            if self.spawned < self.config.spawn_cap {
                self.spawn_particle();
            }
        }

        let sub_dt = frame_dt / self.config.substeps as f32;
        for _ in 0..self.config.substeps {
            for particle in &mut self.particles {
                particle.integrate(sub_dt, self.config.gravity);
                particle.confine_to_arena(self.config.center, self.config.arena_radius);
            }
            self.resolve_collisions();
        }

        self.ticks += 1;
        self.time += frame_dt as f64;
    }

    /// Admit one particle: fixed site, launch direction fanning around by
    /// a fixed angle per spawn, color cycling through the gradient, radius
    /// drawn from the seeded RNG.
    fn spawn_particle(&mut self) {
        let angle = self.spawned as f32 * self.config.spawn_angle_increment;
        let velocity = polar_to_cartesian(self.config.spawn_speed, angle);
        let color = self.gradient.cycle(u64::from(self.spawned));
        let radius = self
            .rng
            .random_range(self.config.min_radius..=self.config.max_radius);

        let particle = Particle::new(self.spawn_site, velocity, radius, color)
            .and_then(|p| p.with_damping(self.config.damping))
            .and_then(|p| p.with_restitution(self.config.restitution));
        match particle {
            Ok(p) => {
                log::debug!("spawn {}: radius {:.2}", self.spawned, p.radius());
                self.particles.push(p);
                self.spawned += 1;
            }
            // Unreachable with a validated config; skip rather than poison the run.
            Err(err) => log::warn!("spawn skipped: {err}"),
        }
    }

    /// O(n²) sweep in fixed `i < j` index order, so resolution order, and
    /// with it the whole trajectory, is reproducible across runs.
    fn resolve_collisions(&mut self) {
        for i in 0..self.particles.len() {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail {
                if a.overlaps(b) {
                    a.resolve_collision(b);
                }
            }
        }
    }

    /// Kick every particle away from `source` with an acceleration of
    /// `impulse_strength / distance` along the line from the source,
    /// applied over `impulse_duration`. Particles sitting on the source
    /// point are skipped.
    pub fn apply_radial_impulse(&mut self, source: Vec2) {
        log::debug!(
            "radial impulse at {source} over {} particles",
            self.particles.len()
        );
        let strength = self.config.impulse_strength;
        let duration = self.config.impulse_duration;
        for particle in &mut self.particles {
            let offset = particle.position() - source;
            let dist = offset.length();
            if dist <= MIN_DISTANCE {
                continue;
            }
            let acc = offset * (strength / (dist * dist));
            particle.apply_impulse(acc, duration);
        }
    }

    /// All live particles, in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles admitted so far; nothing ever despawns.
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Outer ticks advanced so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds accumulated across ticks.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Seed actually used, recorded so a run can be replayed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Total kinetic energy, a cheap stability diagnostic.
    pub fn kinetic_energy(&self) -> f32 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Copy of the drawable state for off-thread consumers.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            tick: self.ticks,
            time: self.time,
            particles: self
                .particles
                .iter()
                .map(|p| ParticleState {
                    position: p.position(),
                    radius: p.radius(),
                    color: p.color(),
                })
                .collect(),
        }
    }
}
