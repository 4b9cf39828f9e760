//! Simulator lifecycle handle
//!
//! Owns the particle field and the surface it draws on. A page without a
//! drawing surface still gets a handle; it is simply disabled and every call
//! on it does nothing.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Dimensions;
use crate::config::FieldConfig;
use crate::render::Surface;
use crate::sim::{self, Particle, ParticleField, Pointer};

pub use crate::sim::FrameStats;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// No drawing surface was available
    Disabled,
    /// Ticking normally
    Running,
    /// `stop()` was called
    Stopped,
}

struct Engine<S, R> {
    field: ParticleField<R>,
    surface: S,
}

pub struct Simulator<S, R = Pcg32> {
    phase: SimPhase,
    engine: Option<Engine<S, R>>,
    /// Influence radius for the current viewport width
    pointer_radius: f32,
}

impl<S: Surface> Simulator<S, Pcg32> {
    /// Initialize with a seeded PCG stream
    pub fn with_seed(surface: Option<S>, dims: Dimensions, config: FieldConfig, seed: u64) -> Self {
        Self::initialize(surface, dims, config, Pcg32::seed_from_u64(seed))
    }
}

impl<S: Surface, R: Rng> Simulator<S, R> {
    /// Size the surface, populate the field and start running.
    ///
    /// Without a surface the simulator comes up disabled. An invalid config
    /// falls back to the defaults.
    pub fn initialize(surface: Option<S>, dims: Dimensions, config: FieldConfig, rng: R) -> Self {
        let Some(mut surface) = surface else {
            log::warn!("No drawing surface available, particle field disabled");
            return Self::disabled();
        };

        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::error!("Invalid field config ({}), using defaults", e);
                FieldConfig::default()
            }
        };

        surface.resize(dims);
        let pointer_radius = config.pointer_radius_for_width(dims.width);
        let field = ParticleField::new(config, dims, rng);
        log::info!(
            "Particle field running: {} particles on {}x{}",
            field.len(),
            dims.width,
            dims.height
        );

        Self {
            phase: SimPhase::Running,
            engine: Some(Engine { field, surface }),
            pointer_radius,
        }
    }

    /// An inert handle
    pub fn disabled() -> Self {
        Self {
            phase: SimPhase::Disabled,
            engine: None,
            pointer_radius: 0.0,
        }
    }

    fn running_engine(&mut self) -> Option<&mut Engine<S, R>> {
        if self.phase != SimPhase::Running {
            return None;
        }
        self.engine.as_mut()
    }

    /// Advance and draw one frame
    pub fn tick(&mut self, pointer: &Pointer) -> Option<FrameStats> {
        let engine = self.running_engine()?;
        Some(sim::tick(&mut engine.field, pointer, &mut engine.surface))
    }

    /// Tick with a pointer position and this viewport's influence radius
    pub fn tick_at(&mut self, position: Option<Vec2>) -> Option<FrameStats> {
        let pointer = Pointer {
            position,
            radius: self.pointer_radius,
        };
        self.tick(&pointer)
    }

    /// New surface size: resize, re-derive the pointer radius, reseed
    pub fn resize(&mut self, dims: Dimensions) {
        let Some(engine) = self.running_engine() else {
            return;
        };
        engine.surface.resize(dims);
        let count = engine.field.resize(dims);
        let radius = engine.field.config().pointer_radius_for_width(dims.width);
        self.pointer_radius = radius;
        log::info!(
            "Resized to {}x{}: {} particles, pointer radius {}",
            dims.width,
            dims.height,
            count,
            radius
        );
    }

    /// Replace every particle (count from surface area when `None`)
    pub fn reseed(&mut self, count: Option<usize>) {
        if let Some(engine) = self.running_engine() {
            let count = engine.field.reseed(count);
            log::info!("Reseeded {} particles", count);
        }
    }

    /// Stop ticking for good. The last particles stay readable.
    pub fn stop(&mut self) {
        if self.phase == SimPhase::Running {
            self.phase = SimPhase::Stopped;
            log::info!("Particle field stopped");
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    pub fn pointer_radius(&self) -> f32 {
        self.pointer_radius
    }

    /// Read-only view for overlay effects
    pub fn particles(&self) -> &[Particle] {
        self.engine
            .as_ref()
            .map(|e| e.field.particles())
            .unwrap_or(&[])
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.engine.as_ref().map(|e| e.field.dimensions())
    }

    pub fn config(&self) -> Option<&FieldConfig> {
        self.engine.as_ref().map(|e| e.field.config())
    }

    pub fn surface(&self) -> Option<&S> {
        self.engine.as_ref().map(|e| &e.surface)
    }
}
