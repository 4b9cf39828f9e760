//! Drawing surface abstraction
//!
//! The simulation only ever draws filled circles and straight lines. On web
//! these go to a 2D canvas; natively and in tests they are recorded.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::Dimensions;
use crate::color::Color;

/// How a shape combines with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Normal alpha compositing
    #[default]
    SourceOver,
    /// Additive, used for bright particle cores
    Lighter,
}

/// A filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
    /// Shadow blur in pixels, tinted with `color`
    pub glow_blur: Option<f32>,
    pub blend: Blend,
}

/// A stroked line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
    pub alpha: f32,
    pub width: f32,
}

/// Something the field can be drawn onto
pub trait Surface {
    /// Current size in device pixels
    fn size(&self) -> Dimensions;
    /// Resize the backing store (clears it)
    fn resize(&mut self, dims: Dimensions);
    /// Erase the whole surface
    fn clear(&mut self);
    fn fill_dot(&mut self, dot: &Dot);
    fn stroke_line(&mut self, line: &Line);
}
