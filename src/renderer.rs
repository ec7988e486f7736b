//! Per-frame painting of the aurora.

use crate::color::Color;
use crate::palette::Palette;
use crate::surface::{Blend, GradientStop, LinearGradient, Paint, RadialGradient, Surface};
use crate::viewport::Viewport;
use crate::wave::{self, CREST_LIFT, TIME_STEP};

/// Dark blue at the top of the sky gradient.
const SKY_TOP: Color = Color::rgba(0, 8, 20, 0.6);
const SKY_BOTTOM: Color = Color::rgba(0, 0, 0, 0.0);
const VIGNETTE_CENTER: Color = Color::rgba(0, 0, 0, 0.0);
const VIGNETTE_EDGE: Color = Color::rgba(0, 0, 0, 0.35);
/// Vignette center as a fraction of width and height.
const VIGNETTE_ORIGIN: (f64, f64) = (0.5, 0.6);
/// Vignette outer radius as a fraction of the longer side.
const VIGNETTE_REACH: f64 = 0.8;

pub const CREST_LINE_WIDTH: f64 = 2.5;

/// Draws the ribbons for the current frame counter and viewport.
///
/// The frame counter only ever grows; it is the sole source of time, so a
/// renderer holding the same palette and counter paints the same frame.
#[derive(Clone, Debug)]
pub struct WaveRenderer {
    palette: Palette,
    viewport: Viewport,
    frame: u64,
}

impl WaveRenderer {
    pub fn new(palette: Palette, viewport: Viewport) -> Self {
        Self {
            palette,
            viewport,
            frame: 0,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Wave time of the most recent frame.
    pub fn time(&self) -> f64 {
        self.frame as f64 * TIME_STEP
    }

    /// Crest height of `layer` at `x` for the most recent frame.
    pub fn layer_y(&self, layer: usize, x: f64) -> f64 {
        let (_, height) = self.viewport.logical_size();
        wave::wave_y(self.palette.entry(layer), layer, x, self.time(), height)
    }

    /// Advances the frame counter and paints one frame onto `surface`.
    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.frame += 1;
        let time = self.time();
        let (w, h) = self.viewport.logical_size();

        surface.clear(w, h);
        self.paint_backdrop(surface, w, h);

        surface.set_blend(Blend::Additive);
        for (layer, entry) in self.palette.entries().iter().enumerate() {
            let fill = Paint::Linear(LinearGradient {
                from: (0.0, 0.0),
                to: (0.0, h),
                stops: vec![
                    GradientStop::new(0.0, entry.fill_top()),
                    GradientStop::new(0.5, entry.fill_mid()),
                    GradientStop::new(1.0, entry.fill_bottom()),
                ],
            });
            let shape = wave::ribbon_shape(entry, layer, time, &self.viewport);
            surface.fill_path(&shape, &fill);

            let crest = wave::ribbon_curve(entry, layer, time, &self.viewport, CREST_LIFT);
            surface.stroke_path(&crest, entry.crest(), CREST_LINE_WIDTH);
        }
        surface.set_blend(Blend::Normal);
    }

    fn paint_backdrop<S: Surface + ?Sized>(&self, surface: &mut S, w: f64, h: f64) {
        let sky = Paint::Linear(LinearGradient {
            from: (0.0, 0.0),
            to: (0.0, h),
            stops: vec![
                GradientStop::new(0.0, SKY_TOP),
                GradientStop::new(1.0, SKY_BOTTOM),
            ],
        });
        surface.fill_rect(0.0, 0.0, w, h, &sky);

        let vignette = Paint::Radial(RadialGradient {
            center: (w * VIGNETTE_ORIGIN.0, h * VIGNETTE_ORIGIN.1),
            inner_radius: 0.0,
            outer_radius: w.max(h) * VIGNETTE_REACH,
            stops: vec![
                GradientStop::new(0.0, VIGNETTE_CENTER),
                GradientStop::new(1.0, VIGNETTE_EDGE),
            ],
        });
        surface.fill_rect(0.0, 0.0, w, h, &vignette);
    }
}
