//! Sizing of the drawing surface.
//!
//! The surface is addressed in CSS pixels: its backing store holds
//! `logical × ratio` device pixels and the surface transform scales by the
//! ratio, so one drawing unit is one CSS pixel on any display.

/// Lower and upper bound applied to `window.devicePixelRatio`.
pub const MIN_PIXEL_RATIO: f64 = 1.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Largest canvas edge browsers accept, in CSS pixels. Larger boxes are
/// clamped so the backing store stays exactly `logical × ratio`.
pub const MAX_DIMENSION: u32 = 32_767;

/// A container's content box in CSS pixels, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Clamps a raw device pixel ratio into `[1, 2]`.
///
/// A missing (zero), negative or non-finite ratio counts as 1.
pub fn clamp_pixel_ratio(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return MIN_PIXEL_RATIO;
    }
    raw.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
}

/// Whole CSS pixels in `[1, MAX_DIMENSION]`.
fn clamp_dimension(raw: f64) -> u32 {
    if raw.is_nan() || raw < 1.0 {
        return 1;
    }
    raw.min(MAX_DIMENSION as f64).trunc() as u32
}

/// Current size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl Viewport {
    /// Builds the viewport for a measured container box and raw pixel ratio.
    pub fn measure(extent: Extent, raw_ratio: f64) -> Self {
        Self {
            width: clamp_dimension(extent.width),
            height: clamp_dimension(extent.height),
            pixel_ratio: clamp_pixel_ratio(raw_ratio),
        }
    }

    /// Logical width in CSS pixels, at least 1.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in CSS pixels, at least 1.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    /// Device-pixel size of the backing store, never below 1×1.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f64 * self.pixel_ratio) as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(clamp_pixel_ratio(0.5), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
        assert_eq!(clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(clamp_pixel_ratio(0.0), 1.0);
        assert_eq!(clamp_pixel_ratio(-2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
        assert_eq!(clamp_pixel_ratio(f64::INFINITY), 1.0);
    }

    #[test]
    fn fractional_box_truncates() {
        let vp = Viewport::measure(Extent::new(640.9, 360.2), 1.0);
        assert_eq!((vp.width(), vp.height()), (640, 360));
    }

    #[test]
    fn zero_box_is_one_pixel() {
        let vp = Viewport::measure(Extent::new(0.0, 0.0), 2.0);
        assert_eq!((vp.width(), vp.height()), (1, 1));
        assert_eq!(vp.backing_size(), (2, 2));

        let vp = Viewport::measure(Extent::new(800.0, 0.0), 1.0);
        assert_eq!(vp.backing_size(), (800, 1));

        let vp = Viewport::measure(Extent::new(f64::NAN, -4.0), 1.0);
        assert_eq!(vp.backing_size(), (1, 1));
    }

    #[test]
    fn backing_scales_by_ratio() {
        let vp = Viewport::measure(Extent::new(1280.0, 720.0), 2.0);
        assert_eq!(vp.backing_size(), (2560, 1440));
        assert_eq!(vp.logical_size(), (1280.0, 720.0));

        let vp = Viewport::measure(Extent::new(101.0, 33.0), 1.5);
        assert_eq!(vp.backing_size(), (151, 49));

        let vp = Viewport::measure(Extent::new(300.0, 200.0), 4.0);
        assert_eq!(vp.pixel_ratio(), 2.0);
        assert_eq!(vp.backing_size(), (600, 400));
    }

    #[test]
    fn huge_box_is_capped_at_canvas_limit() {
        let vp = Viewport::measure(Extent::new(3e9, 10.0), 2.0);
        assert_eq!(vp.width(), MAX_DIMENSION);
        assert_eq!(vp.backing_size(), (2 * MAX_DIMENSION, 20));

        let vp = Viewport::measure(Extent::new(f64::INFINITY, 5.0), 1.0);
        assert_eq!(vp.backing_size(), (MAX_DIMENSION, 5));
    }
}
