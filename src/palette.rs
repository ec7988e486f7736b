//! Per-session ribbon colors and motion parameters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{wrap_hue, Color};

/// Number of ribbons, and so of palette entries.
pub const LAYERS: usize = 4;

/// Range the random base hue is drawn from (cyan through blue).
pub const BASE_HUE_MIN: f64 = 180.0;
pub const BASE_HUE_MAX: f64 = 240.0;

/// Hue offset of each layer relative to the base hue.
pub const HUE_OFFSETS: [f64; LAYERS] = [0.0, 40.0, 80.0, 120.0];

struct LayerParams {
    saturation: f64,
    lightness: f64,
    alpha: f64,
    speed: f64,
    amplitude: f64,
    frequency: f64,
}

// Lower layers sit higher, move faster and ripple more tightly.
#[rustfmt::skip]
const LAYER_PARAMS: [LayerParams; LAYERS] = [
    LayerParams { saturation: 95.0, lightness: 65.0, alpha: 0.55, speed: 0.12, amplitude: 0.10, frequency: 1.6 },
    LayerParams { saturation: 95.0, lightness: 60.0, alpha: 0.45, speed: 0.10, amplitude: 0.12, frequency: 1.2 },
    LayerParams { saturation: 95.0, lightness: 58.0, alpha: 0.35, speed: 0.08, amplitude: 0.14, frequency: 0.9 },
    LayerParams { saturation: 90.0, lightness: 55.0, alpha: 0.28, speed: 0.06, amplitude: 0.16, frequency: 0.7 },
];

/// Color and motion of one ribbon. Immutable once generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    /// Degrees, [0, 360).
    pub hue: f64,
    /// Percent.
    pub saturation: f64,
    /// Percent.
    pub lightness: f64,
    pub alpha: f64,
    pub speed: f64,
    /// Wave amplitude as a fraction of surface height.
    pub amplitude: f64,
    pub frequency: f64,
}

impl PaletteEntry {
    /// Top of the ribbon fill: the ribbon color, fully transparent.
    pub fn fill_top(&self) -> Color {
        Color::hsla(self.hue, self.saturation, self.lightness, 0.0)
    }

    /// Mid-height of the ribbon fill, at full ribbon opacity.
    pub fn fill_mid(&self) -> Color {
        Color::hsla(self.hue, self.saturation, self.lightness, self.alpha)
    }

    /// Bottom of the ribbon fill: shifted 60° and darkened, transparent.
    pub fn fill_bottom(&self) -> Color {
        Color::hsla(
            self.hue + 60.0,
            self.saturation,
            (self.lightness - 10.0).max(40.0),
            0.0,
        )
    }

    /// Stroke color of the glowing crest line.
    pub fn crest(&self) -> Color {
        Color::hsla(self.hue + 20.0, self.saturation, 70.0, self.alpha * 0.6)
    }
}

/// The four ribbon entries of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    base_hue: f64,
    entries: [PaletteEntry; LAYERS],
}

impl Palette {
    /// Draws the base hue from `rng`; everything else is fixed per layer.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self::with_base_hue(rng.gen_range(BASE_HUE_MIN..BASE_HUE_MAX))
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::generate(&mut StdRng::seed_from_u64(seed))
    }

    pub fn with_base_hue(base_hue: f64) -> Self {
        let entries = std::array::from_fn(|i| {
            let p = &LAYER_PARAMS[i];
            PaletteEntry {
                hue: wrap_hue(base_hue + HUE_OFFSETS[i]),
                saturation: p.saturation,
                lightness: p.lightness,
                alpha: p.alpha,
                speed: p.speed,
                amplitude: p.amplitude,
                frequency: p.frequency,
            }
        });
        Self { base_hue, entries }
    }

    pub fn base_hue(&self) -> f64 {
        self.base_hue
    }

    pub fn entries(&self) -> &[PaletteEntry; LAYERS] {
        &self.entries
    }

    /// Entry for `layer`, wrapping past the last one.
    pub fn entry(&self, layer: usize) -> &PaletteEntry {
        &self.entries[layer % LAYERS]
    }

    pub fn len(&self) -> usize {
        LAYERS
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
