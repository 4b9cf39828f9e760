//! A single decorative particle and its per-frame physics

use glam::Vec2;
use rand::Rng;

use super::tick::Pointer;
use crate::Dimensions;
use crate::color::Color;
use crate::config::FieldConfig;
use crate::render::{Blend, Dot};

/// Pulsing glow: a triangle wave between 0 and `intensity`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub phase: f32,
    /// +1.0 or -1.0
    pub direction: f32,
    pub intensity: f32,
}

impl Glow {
    pub fn new(intensity: f32, direction: f32) -> Self {
        Self {
            phase: 0.0,
            direction: direction.signum(),
            intensity,
        }
    }

    /// Step the phase, reversing once it leaves [0, intensity]
    pub fn advance(&mut self, step: f32) {
        self.phase += step * self.direction;
        if self.phase > self.intensity || self.phase < 0.0 {
            self.direction = -self.direction;
        }
    }
}

/// A particle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius at creation, never changes
    pub base_radius: f32,
    /// Current radius (swells near the pointer)
    pub radius: f32,
    pub color: Color,
    pub opacity: f32,
    /// How strongly the pointer pushes this particle
    pub density: f32,
    pub glow: Option<Glow>,
    /// Reseed batch this particle was created in
    pub batch: u64,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos,
            vel,
            base_radius: radius,
            radius,
            color,
            opacity: 1.0,
            density: 1.0,
            glow: None,
            batch: 0,
        }
    }

    /// Push away from the pointer if inside its radius.
    /// Returns true if an impulse was applied.
    pub fn apply_pointer(&mut self, pointer: &Pointer, coupling: f32, swell: f32) -> bool {
        let Some(center) = pointer.position else {
            return false;
        };
        if pointer.radius <= 0.0 {
            return false;
        }

        let offset = self.pos - center;
        let distance = offset.length();
        if distance >= pointer.radius {
            return false;
        }

        // 1 at the pointer, 0 at the radius edge
        let falloff = (pointer.radius - distance) / pointer.radius;
        let dir = offset.normalize_or(Vec2::X);
        self.vel += dir * falloff * self.density * coupling;
        self.radius = self.base_radius * (1.0 + falloff * swell);
        true
    }

    /// Move radius back toward base by a fixed step without overshooting
    pub fn relax_radius(&mut self, step: f32) {
        if self.radius > self.base_radius {
            self.radius = (self.radius - step).max(self.base_radius);
        } else if self.radius < self.base_radius {
            self.radius = (self.radius + step).min(self.base_radius);
        }
    }

    /// Keep the particle inside the surface minus a `2 * radius` buffer,
    /// reflecting velocity with energy loss on contact
    pub fn handle_edges(&mut self, dims: Dimensions, restitution: f32) {
        let buffer = self.radius * 2.0;
        bounce_axis(&mut self.pos.x, &mut self.vel.x, dims.width, buffer, restitution);
        bounce_axis(&mut self.pos.y, &mut self.vel.y, dims.height, buffer, restitution);
    }

    /// Advance one frame
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        pointer: &Pointer,
        dims: Dimensions,
        config: &FieldConfig,
        rng: &mut R,
    ) {
        if !self.apply_pointer(pointer, config.pointer_coupling, config.swell) {
            self.relax_radius(config.relax_step);
        }

        self.vel *= config.damping_factor;

        // Organic drift, applied even while under the pointer
        let jx = rng.random::<f32>() - 0.5;
        let jy = rng.random::<f32>() - 0.5;
        self.vel += Vec2::new(jx, jy) * config.jitter;

        self.pos += self.vel;

        if let Some(glow) = self.glow.as_mut() {
            glow.advance(config.glow_step);
        }

        self.handle_edges(dims, config.bounce_restitution);
    }

    /// The dot to draw for this particle
    pub fn dot(&self, config: &FieldConfig) -> Dot {
        let (radius, glow_blur) = match self.glow {
            Some(glow) => (self.radius + config.glow_pad, Some(config.glow_blur_base + glow.phase)),
            None => (self.radius, None),
        };
        Dot {
            center: self.pos,
            radius,
            color: self.color,
            alpha: self.opacity,
            glow_blur,
            blend: Blend::SourceOver,
        }
    }

    /// Bright additive core for highlighted colors
    pub fn core_dot(&self, config: &FieldConfig) -> Option<Dot> {
        if !config.highlight_colors.contains(&self.color) {
            return None;
        }
        let outer = self.dot(config);
        Some(Dot {
            radius: outer.radius * config.core_scale,
            color: Color::WHITE,
            glow_blur: None,
            blend: Blend::Lighter,
            ..outer
        })
    }
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, extent: f32, buffer: f32, restitution: f32) {
    let upper = extent - buffer;
    if upper < buffer {
        // Surface too small for the padding on this axis
        *pos = extent.max(0.0) / 2.0;
        *vel *= -restitution;
    } else if *pos > upper {
        *pos = upper;
        *vel *= -restitution;
    } else if *pos < buffer {
        *pos = buffer;
        *vel *= -restitution;
    }
}
