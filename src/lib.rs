//! Animated aurora-wave background for a page hero.
//!
//! Four translucent ribbons, each a sum of two sines, are painted additively
//! every display refresh. The browser glue lives in the wasm32-only `wasm`
//! module; everything else is plain Rust driven through the [`host`] traits,
//! so it runs and tests on the host as well.

pub mod color;
pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod lifecycle;
pub mod palette;
pub mod renderer;
pub mod surface;
pub mod svg;
pub mod viewport;
pub mod wave;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::AuroraHandle;

pub use config::AuroraConfig;
pub use error::AuroraError;
pub use lifecycle::{AuroraWaves, LoopState};
pub use palette::{Palette, PaletteEntry};
pub use renderer::WaveRenderer;
pub use surface::Surface;
pub use viewport::{Extent, Viewport};
