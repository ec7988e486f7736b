use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, ResizeObserver, Window};

use crate::error::{AuroraError, Result};
use crate::host::{FrameCallback, FrameRequest, FrameScheduler, ResizeCallback, SizeObserver};
use crate::viewport::Extent;

use super::js_value_to_string;

/// `requestAnimationFrame` scheduler.
///
/// A single JS closure is created up front and reused for every request; it
/// runs whichever callback is parked in `slot`. The frame loop keeps at most
/// one request pending, so one slot is enough.
pub struct RafScheduler {
    window: Window,
    slot: Rc<RefCell<Option<FrameCallback>>>,
    on_frame: Closure<dyn FnMut()>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let on_frame = {
            let slot = slot.clone();
            Closure::wrap(Box::new(move || {
                // take first: the callback re-parks itself through request_frame
                let callback = slot.borrow_mut().take();
                if let Some(callback) = callback {
                    callback();
                }
            }) as Box<dyn FnMut()>)
        };
        Self {
            window,
            slot,
            on_frame,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest> {
        *self.slot.borrow_mut() = Some(callback);
        let id = self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map_err(|err| AuroraError::Scheduler(js_value_to_string(&err)))?;
        Ok(FrameRequest(id))
    }

    fn cancel_frame(&self, request: FrameRequest) {
        self.window.cancel_animation_frame(request.0).ok();
        self.slot.borrow_mut().take();
    }
}

/// `ResizeObserver` on the mount element.
pub struct ElementObserver {
    window: Window,
    target: Element,
    active: RefCell<Option<(ResizeObserver, Closure<dyn FnMut()>)>>,
}

impl ElementObserver {
    pub fn new(window: Window, target: Element) -> Self {
        Self {
            window,
            target,
            active: RefCell::new(None),
        }
    }
}

impl SizeObserver for ElementObserver {
    fn measure(&self) -> Extent {
        let rect = self.target.get_bounding_client_rect();
        Extent::new(rect.width(), rect.height())
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn observe(&self, callback: ResizeCallback) -> Result<()> {
        // The entries are ignored; `measure` re-reads the box.
        let on_resize = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())
            .map_err(|err| AuroraError::Observer(js_value_to_string(&err)))?;
        observer.observe(&self.target);
        if let Some((previous, _)) = self.active.replace(Some((observer, on_resize))) {
            previous.disconnect();
        }
        Ok(())
    }

    fn disconnect(&self) {
        if let Some((observer, _on_resize)) = self.active.borrow_mut().take() {
            observer.disconnect();
        }
    }
}
