//! Pebble Pit entry point
//!
//! Headless demo host: drives a simulation at a fixed frame cadence,
//! hands read-only snapshots to a worker thread over the bounded queue,
//! fires one radial impulse mid-run, and logs a summary. Pass a JSON
//! config path as the only argument to override the defaults.

use std::sync::Arc;
use std::thread;

use glam::Vec2;

use pebble_pit::config::SimConfig;
use pebble_pit::consts::FRAME_DT;
use pebble_pit::error::Result;
use pebble_pit::sim::Simulation;
use pebble_pit::snapshot::SnapshotQueue;

/// Frames simulated by the demo run (six seconds at 100 Hz).
const FRAMES: u64 = 600;
/// Frame on which the demo fires its radial impulse.
const IMPULSE_FRAME: u64 = 300;
/// Snapshot queue capacity.
const QUEUE_CAPACITY: usize = 64;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => SimConfig::default(),
    };

    let mut sim = Simulation::new(config)?;
    log::info!("driving {FRAMES} frames of {FRAME_DT} s, seed {}", sim.seed());

    let queue = Arc::new(SnapshotQueue::new(QUEUE_CAPACITY));
    let worker = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut frames = 0u64;
            let mut peak = 0usize;
            while let Some(frame) = queue.next_frame() {
                peak = peak.max(frame.particles.len());
                frames += 1;
            }
            (frames, peak)
        })
    };

    let impulse_at = sim.config().center + Vec2::new(0.0, sim.config().arena_radius / 2.0);
    for frame in 0..FRAMES {
        sim.tick(FRAME_DT);
        if frame == IMPULSE_FRAME {
            log::info!("radial impulse at {impulse_at} on tick {}", sim.ticks());
            sim.apply_radial_impulse(impulse_at);
        }
        queue.publish(sim.snapshot());
    }
    queue.close();

    match worker.join() {
        Ok((frames, peak)) => {
            log::info!("worker consumed {frames} frames, peak population {peak}");
        }
        Err(_) => log::warn!("snapshot worker panicked"),
    }

    log::info!(
        "done: {} ticks, {} particles, {:.2} simulated seconds, kinetic energy {:.3e}, {} snapshots dropped",
        sim.ticks(),
        sim.len(),
        sim.time(),
        sim.kinetic_energy(),
        queue.dropped()
    );
    Ok(())
}

fn load_config(path: &str) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: SimConfig = serde_json::from_str(&text)?;
    Ok(config)
}
