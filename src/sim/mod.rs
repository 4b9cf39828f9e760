//! Deterministic simulation module
//!
//! All particle logic lives here. This module must stay pure and deterministic:
//! - Fixed nominal step (one frame per tick)
//! - Injected RNG only
//! - Stable iteration order (by array position)
//! - Drawing only through the `Surface` trait

pub mod connections;
pub mod field;
pub mod particle;
pub mod tick;

pub use connections::{Connection, connection_line, connections};
pub use field::ParticleField;
pub use particle::{Glow, Particle};
pub use tick::{FrameStats, Pointer, tick};
