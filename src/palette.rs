//! Spawn colors.
//!
//! Particles are colored by spawn order: a gradient over a short list of
//! anchor colors, walked cyclically as particles appear. Between
//! consecutive anchors the cycle interpolates [`STEPS_PER_SEGMENT`]
//! intermediate shades.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Interpolation steps between consecutive anchors when cycling.
pub const STEPS_PER_SEGMENT: usize = 32;

/// Default anchors, violet through red.
pub const RAINBOW: [Rgb; 7] = [
    Rgb::new(75, 0, 130),   // violet
    Rgb::new(138, 43, 226), // indigo
    Rgb::new(0, 0, 255),    // blue
    Rgb::new(0, 255, 0),    // green
    Rgb::new(255, 255, 0),  // yellow
    Rgb::new(255, 165, 0),  // orange
    Rgb::new(255, 0, 0),    // red
];

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation toward `other`, truncating each channel.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + t * (b as f32 - a as f32)) as u8
}

/// A piecewise-linear gradient over an ordered list of anchor colors.
#[derive(Debug, Clone)]
pub struct Gradient {
    anchors: Vec<Rgb>,
}

impl Gradient {
    /// Build a gradient; at least one anchor is required.
    pub fn new(anchors: Vec<Rgb>) -> Result<Self> {
        if anchors.is_empty() {
            return Err(Error::InvalidConfig(
                "palette needs at least one anchor".into(),
            ));
        }
        Ok(Self { anchors })
    }

    pub fn anchors(&self) -> &[Rgb] {
        &self.anchors
    }

    /// Distinct cycle positions: every interpolation step between
    /// consecutive anchors, plus the final anchor itself.
    pub fn cycle_len(&self) -> usize {
        (self.anchors.len() - 1) * STEPS_PER_SEGMENT + 1
    }

    /// Sample at `t` in [0, 1]; out-of-range and non-finite values clamp.
    pub fn sample(&self, t: f32) -> Rgb {
        let n = self.anchors.len();
        if n == 1 {
            return self.anchors[0];
        }
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let u = t * (n - 1) as f32;
        let seg = (u as usize).min(n - 2);
        self.anchors[seg].lerp(self.anchors[seg + 1], u - seg as f32)
    }

    /// Color for the `index`-th spawn, wrapping around the cycle.
    pub fn cycle(&self, index: u64) -> Rgb {
        let i = (index % self.cycle_len() as u64) as usize;
        let seg = i / STEPS_PER_SEGMENT;
        if seg + 1 >= self.anchors.len() {
            return self.anchors[self.anchors.len() - 1];
        }
        let t = (i % STEPS_PER_SEGMENT) as f32 / STEPS_PER_SEGMENT as f32;
        self.anchors[seg].lerp(self.anchors[seg + 1], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_len_counts_steps_and_final_anchor() {
        let gradient = Gradient::new(RAINBOW.to_vec()).unwrap();
        assert_eq!(gradient.cycle_len(), 6 * STEPS_PER_SEGMENT + 1);
    }

    #[test]
    fn test_cycle_hits_anchors_at_segment_starts() {
        let gradient = Gradient::new(RAINBOW.to_vec()).unwrap();
        for (k, anchor) in RAINBOW.iter().enumerate() {
            assert_eq!(gradient.cycle((k * STEPS_PER_SEGMENT) as u64), *anchor);
        }
    }

    #[test]
    fn test_cycle_interpolates_between_anchors() {
        let gradient = Gradient::new(RAINBOW.to_vec()).unwrap();
        // One step from violet toward indigo: 75 + 63/32, 0 + 43/32, 130 + 96/32.
        assert_eq!(gradient.cycle(1), Rgb::new(76, 1, 133));
    }

    #[test]
    fn test_cycle_wraps_past_final_anchor() {
        let gradient = Gradient::new(RAINBOW.to_vec()).unwrap();
        let len = gradient.cycle_len() as u64;
        assert_eq!(gradient.cycle(len - 1), RAINBOW[6]);
        assert_eq!(gradient.cycle(len), RAINBOW[0]);
        assert_eq!(gradient.cycle(len + 1), gradient.cycle(1));
    }

    #[test]
    fn test_sample_endpoints_and_midpoint() {
        let gradient = Gradient::new(vec![Rgb::new(0, 0, 0), Rgb::new(200, 100, 50)]).unwrap();
        assert_eq!(gradient.sample(0.0), Rgb::new(0, 0, 0));
        assert_eq!(gradient.sample(1.0), Rgb::new(200, 100, 50));
        assert_eq!(gradient.sample(0.5), Rgb::new(100, 50, 25));
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let gradient = Gradient::new(RAINBOW.to_vec()).unwrap();
        assert_eq!(gradient.sample(-3.0), gradient.sample(0.0));
        assert_eq!(gradient.sample(7.5), gradient.sample(1.0));
        assert_eq!(gradient.sample(f32::NAN), gradient.sample(0.0));
    }

    #[test]
    fn test_single_anchor_is_constant() {
        let gradient = Gradient::new(vec![Rgb::new(10, 20, 30)]).unwrap();
        assert_eq!(gradient.cycle_len(), 1);
        assert_eq!(gradient.cycle(0), Rgb::new(10, 20, 30));
        assert_eq!(gradient.cycle(17), Rgb::new(10, 20, 30));
        assert_eq!(gradient.sample(0.7), Rgb::new(10, 20, 30));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Gradient::new(Vec::new()).is_err());
    }
}
