//! The particle collection and how it is (re)populated

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::{Glow, Particle};
use crate::Dimensions;
use crate::config::FieldConfig;

/// All particles on one surface plus the RNG that drives them.
///
/// The collection is replaced wholesale by `reseed`; particles are never
/// added or removed one at a time.
#[derive(Debug, Clone)]
pub struct ParticleField<R = Pcg32> {
    pub(crate) config: FieldConfig,
    pub(crate) dims: Dimensions,
    pub(crate) particles: Vec<Particle>,
    pub(crate) rng: R,
    /// Incremented on every reseed
    batch: u64,
}

impl ParticleField<Pcg32> {
    /// Field driven by a seeded PCG stream
    pub fn with_seed(config: FieldConfig, dims: Dimensions, seed: u64) -> Self {
        Self::new(config, dims, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create a field and populate it for `dims`
    pub fn new(config: FieldConfig, dims: Dimensions, rng: R) -> Self {
        let mut field = Self {
            config,
            dims,
            particles: Vec::new(),
            rng,
            batch: 0,
        };
        field.reseed(None);
        field
    }

    /// Discard every particle and create `count` new ones
    /// (or as many as the surface area calls for). Returns the new count.
    pub fn reseed(&mut self, count: Option<usize>) -> usize {
        let count = count.unwrap_or_else(|| self.config.particle_count(self.dims));
        self.batch += 1;

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(self.spawn_particle());
        }
        self.particles = particles;

        log::debug!(
            "Reseeded batch {}: {} particles on {}x{}",
            self.batch,
            count,
            self.dims.width,
            self.dims.height
        );
        count
    }

    /// New dimensions always invalidate the current distribution
    pub fn resize(&mut self, dims: Dimensions) -> usize {
        self.dims = dims;
        self.reseed(None)
    }

    /// Draw one particle with randomized attributes
    fn spawn_particle(&mut self) -> Particle {
        let config = &self.config;
        let rng = &mut self.rng;

        let pos = Vec2::new(
            rng.random::<f32>() * self.dims.width,
            rng.random::<f32>() * self.dims.height,
        );
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
            * config.initial_speed;
        let radius = config.size_range.lerp(rng.random());
        let color = config.palette.sample(rng);

        let mut particle = Particle::new(pos, vel, radius, color);
        particle.density = config.density_range.lerp(rng.random());
        particle.opacity = config.opacity_range.lerp(rng.random());
        if rng.random::<f32>() < config.glow_probability {
            let intensity = config.glow_intensity_range.lerp(rng.random());
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            particle.glow = Some(Glow::new(intensity, direction));
        }
        particle.batch = self.batch;
        particle
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current reseed batch number
    pub fn batch(&self) -> u64 {
        self.batch
    }
}
