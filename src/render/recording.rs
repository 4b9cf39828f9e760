//! Surface that records draw calls instead of rasterizing them

use super::{Dot, Line, Surface};
use crate::Dimensions;

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Dot(Dot),
    Line(Line),
}

/// Headless surface. Keeps the commands of the current frame only
/// (everything since the last `clear`).
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Dimensions,
    commands: Vec<DrawCommand>,
    /// Total frames cleared since creation
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new(size: Dimensions) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn dots(&self) -> impl Iterator<Item = &Dot> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Dot(d) => Some(d),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(l) => Some(l),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Dimensions {
        self.size
    }

    fn resize(&mut self, dims: Dimensions) {
        self.size = dims;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_dot(&mut self, dot: &Dot) {
        self.commands.push(DrawCommand::Dot(*dot));
    }

    fn stroke_line(&mut self, line: &Line) {
        self.commands.push(DrawCommand::Line(*line));
    }
}
