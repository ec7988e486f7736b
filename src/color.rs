//! CSS colors as the canvas and SVG backends consume them.

use std::fmt;

/// A color in one of the two CSS functional notations the renderer emits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// `rgba(r, g, b, a)`, channels 0..=255, alpha 0..=1.
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    /// `hsla(h, s%, l%, a)`, hue in degrees.
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba { r, g, b, a }
    }

    /// Hue is wrapped into [0, 360).
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Color::Hsla {
            h: wrap_hue(h),
            s,
            l,
            a,
        }
    }
}

/// Wraps any finite hue into [0, 360).
pub fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a})"),
            Color::Hsla { h, s, l, a } => write!(f, "hsla({h}, {s}%, {l}%, {a})"),
        }
    }
}
