//! SVG backend used to export a frame for review without a browser.
//!
//! Gradients become `<defs>` entries in user space, additive blending becomes
//! `mix-blend-mode: plus-lighter`. Only the state after the last clear is kept,
//! matching what a canvas would show.

use std::fmt::Write as _;

use crate::color::Color;
use crate::surface::{Blend, GradientStop, Paint, Path, PathCommand, Surface};
use crate::viewport::Viewport;

#[derive(Debug, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    blend: Blend,
    defs: Vec<String>,
    body: Vec<String>,
    next_id: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes drawn since the last clear.
    pub fn shape_count(&self) -> usize {
        self.body.len()
    }

    /// Serializes the current frame as a standalone SVG document.
    pub fn to_document(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="background:#000">"#,
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for def in &self.defs {
                out.push_str(def);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }
        for shape in &self.body {
            out.push_str(shape);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn blend_attr(&self) -> &'static str {
        match self.blend {
            Blend::Normal => "",
            Blend::Additive => r#" style="mix-blend-mode:plus-lighter""#,
        }
    }

    /// Returns the `fill` attribute value for `paint`, defining gradients as needed.
    fn paint_ref(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Linear(g) => {
                let id = self.gradient_id();
                let mut def = format!(
                    r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(g.from.0),
                    num(g.from.1),
                    num(g.to.0),
                    num(g.to.1)
                );
                push_stops(&mut def, &g.stops);
                def.push_str("</linearGradient>");
                self.defs.push(def);
                format!("url(#{id})")
            }
            Paint::Radial(g) => {
                let id = self.gradient_id();
                let (cx, cy) = (num(g.center.0), num(g.center.1));
                let mut def = format!(
                    r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{cx}" cy="{cy}" fx="{cx}" fy="{cy}" r="{}" fr="{}">"#,
                    num(g.outer_radius),
                    num(g.inner_radius)
                );
                push_stops(&mut def, &g.stops);
                def.push_str("</radialGradient>");
                self.defs.push(def);
                format!("url(#{id})")
            }
        }
    }

    fn gradient_id(&mut self) -> String {
        self.next_id += 1;
        format!("g{}", self.next_id)
    }
}

fn push_stops(def: &mut String, stops: &[GradientStop]) {
    for stop in stops {
        let _ = write!(
            def,
            r#"<stop offset="{}" stop-color="{}"/>"#,
            stop.offset, stop.color
        );
    }
}

/// Two decimals are plenty for CSS-pixel coordinates.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// SVG path data for `path`.
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for cmd in path.commands() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                let _ = write!(d, "M{} {}", num(x), num(y));
            }
            PathCommand::LineTo { x, y } => {
                let _ = write!(d, "L{} {}", num(x), num(y));
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                let _ = write!(d, "Q{} {} {} {}", num(cx), num(cy), num(x), num(y));
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

impl Surface for SvgSurface {
    fn resize(&mut self, viewport: &Viewport) {
        // the document is in CSS pixels; the ratio only matters to rasterizers
        let (w, h) = viewport.logical_size();
        self.width = w;
        self.height = h;
        self.clear(w, h);
    }

    fn clear(&mut self, _width: f64, _height: f64) {
        self.defs.clear();
        self.body.clear();
        self.next_id = 0;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        let fill = self.paint_ref(paint);
        let shape = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"{}/>"#,
            num(x),
            num(y),
            num(width),
            num(height),
            self.blend_attr()
        );
        self.body.push(shape);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let fill = self.paint_ref(paint);
        let shape = format!(
            r#"<path d="{}" fill="{fill}"{}/>"#,
            path_data(path),
            self.blend_attr()
        );
        self.body.push(shape);
    }

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64) {
        let shape = format!(
            r#"<path d="{}" fill="none" stroke="{color}" stroke-width="{}"{}/>"#,
            path_data(path),
            num(line_width),
            self.blend_attr()
        );
        self.body.push(shape);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }
}
