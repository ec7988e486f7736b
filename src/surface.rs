//! The 2D drawing seam between the renderer and a concrete backend.
//!
//! The renderer only ever speaks this vocabulary: the browser backend replays
//! it onto a `CanvasRenderingContext2d`, the SVG backend serializes it, and the
//! headless backend records it for assertions.

use crate::color::Color;
use crate::viewport::Viewport;

/// One color stop of a gradient; `offset` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient along the line `from → to`, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stops: Vec<GradientStop>,
}

/// Gradient between two circles sharing `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: (f64, f64),
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Linear(LinearGradient),
    Radial(RadialGradient),
}

/// Compositing mode for subsequent fills and strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Paint over what is there (`source-over`).
    #[default]
    Normal,
    /// Sum light values (`lighter`), brightening overlaps.
    Additive,
}

impl Blend {
    /// Name of the mode as a canvas `globalCompositeOperation`.
    pub fn composite_operation(self) -> &'static str {
        match self {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    Close,
}

/// A path built once and replayed onto a surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::QuadTo { cx, cy, x, y });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current point after the last command, if any.
    pub fn end_point(&self) -> Option<(f64, f64)> {
        self.commands.iter().rev().find_map(|cmd| match *cmd {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::QuadTo { x, y, .. } => Some((x, y)),
            PathCommand::Close => None,
        })
    }
}

/// A 2D drawing backend addressed in CSS pixels.
///
/// Drawing calls are infallible: a backend that cannot honour one drops it.
pub trait Surface {
    /// Sizes the backing store to `viewport.backing_size()`, the displayed
    /// size to the logical size, and scales drawing by the pixel ratio.
    fn resize(&mut self, viewport: &Viewport);

    /// Clears `[0, width] × [0, height]` to transparent.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64);

    fn set_blend(&mut self, blend: Blend);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_point_skips_close() {
        let mut path = Path::new();
        assert_eq!(path.end_point(), None);
        path.move_to(0.0, 1.0);
        path.quad_to(1.0, 2.0, 3.0, 4.0);
        path.close();
        assert_eq!(path.end_point(), Some((3.0, 4.0)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn composite_names() {
        assert_eq!(Blend::default().composite_operation(), "source-over");
        assert_eq!(Blend::Additive.composite_operation(), "lighter");
    }
}
