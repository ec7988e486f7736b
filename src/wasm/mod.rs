//! Browser entry points.

use std::cell::RefCell;
use std::fmt;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::AuroraConfig;
use crate::error::{settle_start_mount, AuroraError, Result};
use crate::lifecycle::AuroraWaves;
use crate::palette::Palette;

mod host;
mod render;

use host::{ElementObserver, RafScheduler};
use render::CanvasSurface;

type BrowserAurora = AuroraWaves<CanvasSurface, RafScheduler, ElementObserver>;

/// Largest integer a JS number holds exactly.
const MAX_SAFE_SEED: f64 = 9_007_199_254_740_991.0;

thread_local! {
    static DEFAULT_MOUNT: RefCell<Option<AuroraHandle>> = const { RefCell::new(None) };
}

pub(crate) fn js_error(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn dom_error(err: JsValue) -> AuroraError {
    AuroraError::Dom(js_value_to_string(&err))
}

/// Mounts onto the default hero element, if the page has one.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    if let Some(handle) = settle_start_mount(mount_with(AuroraConfig::default())) {
        DEFAULT_MOUNT.with(|slot| *slot.borrow_mut() = Some(handle));
    }
    Ok(())
}

/// Tears down the background mounted at start. Safe to call repeatedly.
#[wasm_bindgen(js_name = unmountDefault)]
pub fn unmount_default() {
    let handle = DEFAULT_MOUNT.with(|slot| slot.borrow_mut().take());
    if let Some(mut handle) = handle {
        handle.unmount();
    }
}

/// A background mounted from JS.
#[wasm_bindgen]
pub struct AuroraHandle {
    aurora: Option<BrowserAurora>,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl AuroraHandle {
    /// Mounts into `options.mountId` (default `hero-tsx-mount`).
    ///
    /// Returns `undefined` when the page has no such element.
    pub fn mount(options: JsValue) -> Result<Option<AuroraHandle>, JsValue> {
        let config = if options.is_undefined() || options.is_null() {
            AuroraConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|err| js_error(AuroraError::Config(err.to_string())))?
        };
        mount_with(config).map_err(js_error)
    }

    /// Stops the animation, releases the observer and removes the canvas.
    pub fn unmount(&mut self) {
        if let Some(mut aurora) = self.aurora.take() {
            aurora.unmount();
            self.canvas.remove();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.aurora.as_ref().is_some_and(|a| a.is_running())
    }

    #[wasm_bindgen(getter, js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.aurora.as_ref().map_or(0.0, |a| a.frame_count() as f64)
    }

    #[wasm_bindgen(getter, js_name = baseHue)]
    pub fn base_hue(&self) -> f64 {
        self.aurora.as_ref().map_or(f64::NAN, |a| a.base_hue())
    }

    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }
}

fn mount_with(config: AuroraConfig) -> Result<Option<AuroraHandle>> {
    let window = web_sys::window().ok_or(AuroraError::NoWindow)?;
    let document = window.document().ok_or(AuroraError::NoDocument)?;
    let Some(container) = document.get_element_by_id(&config.mount_id) else {
        log::debug!("no #{} on this page, aurora not mounted", config.mount_id);
        return Ok(None);
    };

    let surface = CanvasSurface::create(&document, &config.aria_label)?;
    let canvas = surface.element().clone();
    container.append_child(&canvas).map_err(dom_error)?;

    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * MAX_SAFE_SEED) as u64);
    let mounted = AuroraWaves::mount(
        surface,
        RafScheduler::new(window.clone()),
        ElementObserver::new(window, container),
        Palette::from_seed(seed),
    );
    match mounted {
        Ok(aurora) => Ok(Some(AuroraHandle {
            aurora: Some(aurora),
            canvas,
        })),
        Err(err) => {
            canvas.remove();
            Err(err)
        }
    }
}
