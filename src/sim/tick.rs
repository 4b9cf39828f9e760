//! Per-frame simulation tick
//!
//! One call advances every particle by one nominal frame and draws the
//! result. Cadence belongs to the caller.

use glam::Vec2;
use rand::Rng;

use super::connections::{connection_line, connections};
use super::field::ParticleField;
use crate::consts::POINTER_RADIUS;
use crate::render::Surface;

/// Latest pointer/touch input (read once per tick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Surface coordinates, `None` when the pointer is off the surface
    pub position: Option<Vec2>,
    /// Influence radius
    pub radius: f32,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            position: None,
            radius: POINTER_RADIUS,
        }
    }
}

impl Pointer {
    pub fn at(position: Vec2, radius: f32) -> Self {
        Self {
            position: Some(position),
            radius,
        }
    }

    pub fn absent(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }
}

/// What one tick produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub connections: usize,
}

/// Advance the field by one frame and draw it onto `surface`
pub fn tick<R: Rng, S: Surface + ?Sized>(
    field: &mut ParticleField<R>,
    pointer: &Pointer,
    surface: &mut S,
) -> FrameStats {
    let ParticleField {
        config,
        dims,
        particles,
        rng,
        ..
    } = field;

    surface.clear();

    for particle in particles.iter_mut() {
        particle.update(pointer, *dims, config, rng);
        surface.fill_dot(&particle.dot(config));
        if let Some(core) = particle.core_dot(config) {
            surface.fill_dot(&core);
        }
    }

    let mut linked = 0;
    for conn in connections(particles, config.connection_max_distance) {
        surface.stroke_line(&connection_line(particles, &conn, config));
        linked += 1;
    }

    FrameStats {
        particles: particles.len(),
        connections: linked,
    }
}
