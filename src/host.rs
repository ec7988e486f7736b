//! Host collaborators the component is driven by.
//!
//! The browser supplies these as `requestAnimationFrame` and `ResizeObserver`;
//! [`crate::headless`] supplies in-memory versions that tests step by hand.

use std::rc::Rc;

use crate::error::Result;
use crate::viewport::Extent;

/// Work to run on the next display refresh.
pub type FrameCallback = Rc<dyn Fn()>;

/// Work to run whenever the observed container changes size.
pub type ResizeCallback = Rc<dyn Fn()>;

/// Handle of a pending frame request, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i32);

/// Runs a callback once on the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest>;

    /// Cancelling a request that already ran or was cancelled is a no-op.
    fn cancel_frame(&self, request: FrameRequest);
}

/// Reports the size of the container the surface fills.
pub trait SizeObserver {
    /// Current content box of the container in CSS pixels.
    fn measure(&self) -> Extent;

    /// Raw device pixel ratio; clamping is left to the caller.
    fn pixel_ratio(&self) -> f64;

    /// Starts invoking `callback` on every container resize.
    fn observe(&self, callback: ResizeCallback) -> Result<()>;

    fn disconnect(&self);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest> {
        (**self).request_frame(callback)
    }

    fn cancel_frame(&self, request: FrameRequest) {
        (**self).cancel_frame(request)
    }
}

impl<T: SizeObserver + ?Sized> SizeObserver for Rc<T> {
    fn measure(&self) -> Extent {
        (**self).measure()
    }

    fn pixel_ratio(&self) -> f64 {
        (**self).pixel_ratio()
    }

    fn observe(&self, callback: ResizeCallback) -> Result<()> {
        (**self).observe(callback)
    }

    fn disconnect(&self) {
        (**self).disconnect()
    }
}
