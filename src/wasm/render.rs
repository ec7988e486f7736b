use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::color::Color;
use crate::error::{AuroraError, Result};
use crate::surface::{Blend, GradientStop, Paint, Path, PathCommand, Surface};
use crate::viewport::Viewport;

use super::dom_error;

/// `Surface` over a `<canvas>` 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Creates a detached decorative canvas labelled for assistive tech.
    pub fn create(document: &Document, label: &str) -> Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(dom_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AuroraError::NotACanvas)?;
        canvas.set_attribute("role", "img").map_err(dom_error)?;
        canvas.set_attribute("aria-label", label).map_err(dom_error)?;
        canvas
            .style()
            .set_property("display", "block")
            .map_err(dom_error)?;

        let ctx = canvas
            .get_context("2d")
            .map_err(dom_error)?
            .ok_or(AuroraError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AuroraError::ContextUnavailable)?;

        Ok(Self { canvas, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn trace(&self, path: &Path) {
        self.ctx.begin_path();
        for cmd in path.commands() {
            match *cmd {
                PathCommand::MoveTo { x, y } => self.ctx.move_to(x, y),
                PathCommand::LineTo { x, y } => self.ctx.line_to(x, y),
                PathCommand::QuadTo { cx, cy, x, y } => self.ctx.quadratic_curve_to(cx, cy, x, y),
                PathCommand::Close => self.ctx.close_path(),
            }
        }
    }

    /// Installs `paint` as the fill style. False if the gradient could not be built.
    fn set_fill(&self, paint: &Paint) -> bool {
        match paint {
            Paint::Linear(g) => {
                let gradient = self
                    .ctx
                    .create_linear_gradient(g.from.0, g.from.1, g.to.0, g.to.1);
                add_stops(&gradient, &g.stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial(g) => {
                let (cx, cy) = g.center;
                let Ok(gradient) =
                    self.ctx
                        .create_radial_gradient(cx, cy, g.inner_radius, cx, cy, g.outer_radius)
                else {
                    return false;
                };
                add_stops(&gradient, &g.stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        true
    }
}

fn add_stops(gradient: &web_sys::CanvasGradient, stops: &[GradientStop]) {
    for stop in stops {
        gradient
            .add_color_stop(stop.offset as f32, &stop.color.to_string())
            .ok();
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (backing_w, backing_h) = viewport.backing_size();
        self.canvas.set_width(backing_w);
        self.canvas.set_height(backing_h);
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", viewport.width()))
            .ok();
        style
            .set_property("height", &format!("{}px", viewport.height()))
            .ok();
        // Resizing resets the context, so the scale goes back on every time.
        let ratio = viewport.pixel_ratio();
        self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0).ok();
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        if self.set_fill(paint) {
            self.ctx.fill_rect(x, y, width, height);
        }
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if self.set_fill(paint) {
            self.trace(path);
            self.ctx.fill();
        }
    }

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64) {
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.trace(path);
        self.ctx.stroke();
    }

    fn set_blend(&mut self, blend: Blend) {
        self.ctx
            .set_global_composite_operation(blend.composite_operation())
            .ok();
    }
}
