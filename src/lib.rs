//! Particle Field - interactive decorative particles for canvas backgrounds
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, reseeding, connections)
//! - `render`: Drawing surface abstraction (canvas on web, recording elsewhere)
//! - `simulator`: Lifecycle handle (disabled / running / stopped)
//! - `config`: Data-driven tuning and presets
//! - `platform`: Browser driver (events, animation loop)

pub mod color;
pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod sim;
pub mod simulator;

pub use color::{Color, Palette};
pub use config::{FieldConfig, FieldPreset};
pub use error::{ColorParseError, ConfigError};
pub use simulator::{FrameStats, Simulator};

use serde::{Deserialize, Serialize};

/// Default tuning constants
pub mod consts {
    /// Particle count at (or above) the reference resolution
    pub const BASE_PARTICLE_COUNT: usize = 150;
    /// Upper bound accepted for a configured base count
    pub const MAX_PARTICLE_COUNT: usize = 2000;
    /// Resolution at which the base count applies at full density
    pub const REFERENCE_WIDTH: f32 = 1920.0;
    pub const REFERENCE_HEIGHT: f32 = 1080.0;

    /// Pointer influence radius (pixels)
    pub const POINTER_RADIUS: f32 = 150.0;
    /// Smaller influence radius on narrow viewports
    pub const NARROW_POINTER_RADIUS: f32 = 70.0;
    /// Viewports narrower than this count as narrow
    pub const NARROW_VIEWPORT_WIDTH: f32 = 768.0;

    /// Particles closer than this are linked by a line
    pub const CONNECTION_MAX_DISTANCE: f32 = 150.0;
    pub const CONNECTION_ALPHA: f32 = 0.5;
    pub const CONNECTION_WIDTH: f32 = 1.2;

    /// Per-frame velocity multiplier (friction)
    pub const DAMPING: f32 = 0.95;
    /// Fraction of speed kept when bouncing off an edge
    pub const BOUNCE_RESTITUTION: f32 = 0.5;
    /// Velocity impulse per unit of falloff * density
    pub const POINTER_COUPLING: f32 = 0.2;
    /// Extra radius fraction at the pointer center
    pub const POINTER_SWELL: f32 = 0.5;
    /// Radius change per frame while relaxing back to base
    pub const RADIUS_RELAX_STEP: f32 = 0.1;
    /// Width of the per-axis random drift added each frame
    pub const JITTER: f32 = 0.1;
    /// Width of the per-axis initial velocity range
    pub const INITIAL_SPEED: f32 = 0.5;

    /// Glow phase change per frame
    pub const GLOW_STEP: f32 = 0.03;
    /// Shadow blur added under every glowing particle
    pub const GLOW_BLUR_BASE: f32 = 35.0;
    /// Glowing particles are drawn this much larger
    pub const GLOW_PAD: f32 = 0.5;
    /// Highlight core radius as a fraction of the particle radius
    pub const CORE_SCALE: f32 = 0.7;
}

/// Drawing surface size in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Inclusive-exclusive float range used for randomized attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in [0, 1) onto the range
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_area() {
        assert_eq!(Dimensions::new(1920.0, 1080.0).area(), 1920.0 * 1080.0);
        assert_eq!(Dimensions::new(-10.0, 100.0).area(), 0.0);
    }

    #[test]
    fn test_range_lerp() {
        let r = Range::new(2.0, 8.0);
        assert_eq!(r.lerp(0.0), 2.0);
        assert!((r.lerp(0.5) - 5.0).abs() < 1e-6);
        assert!(r.contains(8.0));
        assert!(!r.contains(1.9));
    }
}
