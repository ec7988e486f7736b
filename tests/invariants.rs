#![cfg(not(target_arch = "wasm32"))]

use aurora_waves::palette::{BASE_HUE_MAX, BASE_HUE_MIN, HUE_OFFSETS};
use aurora_waves::surface::PathCommand;
use aurora_waves::viewport::{clamp_pixel_ratio, MAX_DIMENSION, MAX_PIXEL_RATIO, MIN_PIXEL_RATIO};
use aurora_waves::wave::{ribbon_curve, wave_y};
use aurora_waves::{Extent, Palette, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn backing_is_logical_times_ratio(w in 1u32..4000, h in 1u32..4000, raw in -1.0f64..8.0) {
        let vp = Viewport::measure(Extent::new(w as f64, h as f64), raw);
        let ratio = vp.pixel_ratio();
        prop_assert!((MIN_PIXEL_RATIO..=MAX_PIXEL_RATIO).contains(&ratio));
        prop_assert_eq!(ratio, clamp_pixel_ratio(raw));
        prop_assert_eq!((vp.width(), vp.height()), (w, h));
        prop_assert_eq!(
            vp.backing_size(),
            ((w as f64 * ratio) as u32, (h as f64 * ratio) as u32)
        );
    }

    #[test]
    fn degenerate_boxes_clamp_to_one(w in -100.0f64..1.0, h in -100.0f64..1.0, raw in 0.0f64..3.0) {
        let vp = Viewport::measure(Extent::new(w, h), raw);
        let (bw, bh) = vp.backing_size();
        prop_assert!(vp.width() == 1 && vp.height() == 1);
        prop_assert!(bw >= 1 && bh >= 1);
    }

    #[test]
    fn oversized_boxes_keep_exact_backing(w in 0.0f64..1e12, raw in 0.0f64..3.0) {
        let vp = Viewport::measure(Extent::new(w, 10.0), raw);
        prop_assert!((1..=MAX_DIMENSION).contains(&vp.width()));
        prop_assert_eq!(
            vp.backing_size().0,
            (vp.width() as f64 * vp.pixel_ratio()) as u32
        );
    }

    #[test]
    fn palette_hues_are_offsets_of_base(seed in any::<u64>()) {
        let palette = Palette::from_seed(seed);
        let base = palette.base_hue();
        prop_assert!((BASE_HUE_MIN..BASE_HUE_MAX).contains(&base));
        prop_assert_eq!(palette.entries().len(), 4);
        for (entry, offset) in palette.entries().iter().zip(HUE_OFFSETS) {
            prop_assert!((entry.hue - (base + offset).rem_euclid(360.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn wave_is_deterministic(seed in any::<u64>(), layer in 0usize..4, x in 0.0f64..4000.0, frame in 0u64..100_000) {
        let palette = Palette::from_seed(seed);
        let t = frame as f64 * 0.01;
        let a = wave_y(palette.entry(layer), layer, x, t, 700.0);
        let b = wave_y(palette.entry(layer), layer, x, t, 700.0);
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn wave_is_continuous(seed in any::<u64>(), layer in 0usize..4, x in 0.0f64..4000.0, t in 0.0f64..1000.0) {
        // The slope is bounded by amplitude × angular frequency, so tiny steps move it only a little.
        let palette = Palette::from_seed(seed);
        let h = 700.0;
        let y = wave_y(palette.entry(layer), layer, x, t, h);
        let dx = wave_y(palette.entry(layer), layer, x + 1e-6, t, h);
        let dt = wave_y(palette.entry(layer), layer, x, t + 1e-6, h);
        prop_assert!((y - dx).abs() < 1e-3);
        prop_assert!((y - dt).abs() < 1e-3);
    }

    #[test]
    fn segments_share_end_points(seed in any::<u64>(), layer in 0usize..4, w in 1.0f64..3000.0, frame in 0u64..10_000) {
        let palette = Palette::from_seed(seed);
        let vp = Viewport::measure(Extent::new(w, 500.0), 1.0);
        let t = frame as f64 * 0.01;
        let path = ribbon_curve(palette.entry(layer), layer, t, &vp, 0.0);
        let mut prev_x = 0.0;
        for cmd in path.commands() {
            match *cmd {
                PathCommand::MoveTo { x, y } => {
                    prop_assert_eq!(x, 0.0);
                    prop_assert_eq!(y, wave_y(palette.entry(layer), layer, 0.0, t, 500.0));
                }
                PathCommand::QuadTo { cx, x, y, .. } => {
                    prop_assert!(cx > prev_x && cx < x);
                    prop_assert_eq!(y, wave_y(palette.entry(layer), layer, x, t, 500.0));
                    prev_x = x;
                }
                _ => prop_assert!(false, "unexpected command {:?}", cmd),
            }
        }
        prop_assert!(prev_x >= vp.width() as f64);
    }
}
