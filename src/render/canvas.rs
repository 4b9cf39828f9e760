//! HTML canvas 2D surface

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Blend, Dot, Line, Surface};
use crate::Dimensions;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas element. Returns `None` if no 2D context is available.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Look up a canvas by element id
    pub fn from_element_id(id: &str) -> Option<Self> {
        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_blend(&self, blend: Blend) {
        let op = match blend {
            Blend::SourceOver => "source-over",
            Blend::Lighter => "lighter",
        };
        let _ = self.ctx.set_global_composite_operation(op);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Dimensions {
        Dimensions::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, dims: Dimensions) {
        self.canvas.set_width(dims.width.max(0.0) as u32);
        self.canvas.set_height(dims.height.max(0.0) as u32);
        if let Some(style) = self.canvas.dyn_ref::<web_sys::HtmlElement>().map(|el| el.style()) {
            let _ = style.set_property("display", "block");
        }
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn fill_dot(&mut self, dot: &Dot) {
        let color = dot.color.to_css();
        self.ctx.set_global_alpha(dot.alpha as f64);
        match dot.glow_blur {
            Some(blur) => {
                self.ctx.set_shadow_blur(blur as f64);
                self.ctx.set_shadow_color(&color);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
        self.set_blend(dot.blend);

        self.ctx.begin_path();
        let _ = self.ctx.arc(
            dot.center.x as f64,
            dot.center.y as f64,
            dot.radius.max(0.0) as f64,
            0.0,
            TAU,
        );
        self.ctx.set_fill_style_str(&color);
        self.ctx.fill();

        // Reset shared state so lines draw cleanly
        self.set_blend(Blend::SourceOver);
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_shadow_blur(0.0);
    }

    fn stroke_line(&mut self, line: &Line) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&line.color.to_css());
        self.ctx.set_global_alpha(line.alpha as f64);
        self.ctx.set_line_width(line.width as f64);
        self.ctx.move_to(line.from.x as f64, line.from.y as f64);
        self.ctx.line_to(line.to.x as f64, line.to.y as f64);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
    }
}
