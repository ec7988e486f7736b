//! Procedural ribbon geometry.
//!
//! Each ribbon's crest is two sines of different frequency summed on top of a
//! per-layer baseline. The phase offsets (`layer` and `layer × 2.1`) keep the
//! layers from moving in lockstep.

use crate::palette::PaletteEntry;
use crate::surface::Path;
use crate::viewport::Viewport;

/// Time advanced per rendered frame.
pub const TIME_STEP: f64 = 0.01;

/// Baseline of layer 0 as a fraction of height, and the drop per layer.
pub const BASELINE: f64 = 0.35;
pub const BASELINE_STEP: f64 = 0.12;

const PRIMARY_X_SCALE: f64 = 0.004;
const PRIMARY_T_SCALE: f64 = 2.2;
const SECONDARY_X_SCALE: f64 = 0.002;
const SECONDARY_T_SCALE: f64 = 1.1;
const SECONDARY_PHASE: f64 = 2.1;
const SECONDARY_AMPLITUDE: f64 = 0.45;

/// Smallest horizontal distance between samples, and the target sample count.
pub const MIN_SAMPLE_STEP: f64 = 8.0;
pub const SAMPLES_PER_WIDTH: f64 = 60.0;

/// How far the crest highlight sits above the ribbon edge.
pub const CREST_LIFT: f64 = 1.5;

/// Crest height of ribbon `layer` at horizontal position `x`.
pub fn wave_y(entry: &PaletteEntry, layer: usize, x: f64, time: f64, height: f64) -> f64 {
    let layer = layer as f64;
    let baseline = height * (BASELINE + layer * BASELINE_STEP);
    let amp = height * entry.amplitude;
    let primary = (x * entry.frequency * PRIMARY_X_SCALE + time * entry.speed * PRIMARY_T_SCALE
        + layer)
        .sin();
    let secondary = (x * entry.frequency * SECONDARY_X_SCALE
        + time * entry.speed * SECONDARY_T_SCALE
        + layer * SECONDARY_PHASE)
        .sin();
    baseline + primary * amp + secondary * amp * SECONDARY_AMPLITUDE
}

/// Horizontal distance between curve samples for a surface `width` wide.
pub fn sample_step(width: f64) -> f64 {
    (width / SAMPLES_PER_WIDTH).max(MIN_SAMPLE_STEP)
}

/// The crest curve across the full width, shifted up by `lift`.
///
/// Samples sit at `k × step` for `k = 1, 2, ...` up to one step past the right
/// edge, so the curve never ends short of it. Consecutive quadratic segments
/// share their end points and each control point is the wave itself at the
/// segment midpoint.
pub fn ribbon_curve(
    entry: &PaletteEntry,
    layer: usize,
    time: f64,
    viewport: &Viewport,
    lift: f64,
) -> Path {
    let (width, height) = viewport.logical_size();
    let step = sample_step(width);
    let y = |x: f64| wave_y(entry, layer, x, time, height) - lift;

    // the epsilon keeps `width / 60` steps from losing the last sample to rounding
    let segments = ((width + step) / step + 1e-9).floor() as usize;
    let mut path = Path::with_capacity(segments + 4);
    path.move_to(0.0, y(0.0));
    for k in 1..=segments {
        let x = k as f64 * step;
        let mid = x - step / 2.0;
        path.quad_to(mid, y(mid), x, y(x));
    }
    path
}

/// The closed ribbon: crest curve down to the bottom edge and back to x = 0.
pub fn ribbon_shape(entry: &PaletteEntry, layer: usize, time: f64, viewport: &Viewport) -> Path {
    let (width, height) = viewport.logical_size();
    let mut path = ribbon_curve(entry, layer, time, viewport, 0.0);
    path.line_to(width, height);
    path.line_to(0.0, height);
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use crate::surface::PathCommand;
    use crate::viewport::Extent;

    fn viewport(w: f64, h: f64) -> Viewport {
        Viewport::measure(Extent::new(w, h), 1.0)
    }

    #[test]
    fn baseline_when_sines_vanish() {
        // amplitude 0 leaves only the baseline
        let mut entry = *Palette::with_base_hue(200.0).entry(2);
        entry.amplitude = 0.0;
        assert_eq!(wave_y(&entry, 2, 123.0, 4.0, 1000.0), 1000.0 * (0.35 + 2.0 * 0.12));
    }

    #[test]
    fn matches_closed_form() {
        let palette = Palette::with_base_hue(200.0);
        let entry = palette.entry(1);
        let (x, t, h): (f64, f64, f64) = (250.0, 0.37, 600.0);
        let amp = h * 0.12;
        let expected = h * 0.47
            + (x * 1.2 * 0.004 + t * 0.10 * 2.2 + 1.0).sin() * amp
            + (x * 1.2 * 0.002 + t * 0.10 * 1.1 + 2.1).sin() * amp * 0.45;
        assert!((wave_y(entry, 1, x, t, h) - expected).abs() < 1e-9);
    }

    #[test]
    fn step_has_floor() {
        assert_eq!(sample_step(100.0), 8.0);
        assert_eq!(sample_step(1200.0), 20.0);
    }

    #[test]
    fn curve_reaches_past_right_edge() {
        let palette = Palette::with_base_hue(190.0);
        let vp = viewport(1200.0, 400.0);
        let path = ribbon_curve(palette.entry(0), 0, 1.0, &vp, 0.0);
        // 1200 / 20 + 1 segments after the initial move
        assert_eq!(path.len(), 62);
        let (end_x, _) = path.end_point().unwrap();
        assert_eq!(end_x, 1220.0);
    }

    #[test]
    fn control_points_lie_on_wave() {
        let palette = Palette::with_base_hue(210.0);
        let entry = palette.entry(3);
        let vp = viewport(480.0, 300.0);
        let path = ribbon_curve(entry, 3, 2.5, &vp, CREST_LIFT);
        for cmd in path.commands() {
            if let PathCommand::QuadTo { cx, cy, x, y } = *cmd {
                assert_eq!(cy, wave_y(entry, 3, cx, 2.5, 300.0) - CREST_LIFT);
                assert_eq!(y, wave_y(entry, 3, x, 2.5, 300.0) - CREST_LIFT);
            }
        }
    }

    #[test]
    fn shape_closes_along_bottom() {
        let palette = Palette::with_base_hue(200.0);
        let vp = viewport(320.0, 200.0);
        let path = ribbon_shape(palette.entry(0), 0, 0.0, &vp);
        let tail = &path.commands()[path.len() - 3..];
        assert_eq!(
            tail,
            &[
                PathCommand::LineTo { x: 320.0, y: 200.0 },
                PathCommand::LineTo { x: 0.0, y: 200.0 },
                PathCommand::Close,
            ]
        );
    }
}
