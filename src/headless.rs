//! In-memory host: a scheduler stepped by hand, an observer resized by hand and
//! a surface that records what it is asked to draw.
//!
//! Used by the tests and by the `snapshot` command, which renders frames
//! without a browser.

use std::cell::{Cell, RefCell};

use crate::color::Color;
use crate::error::{AuroraError, Result};
use crate::host::{FrameCallback, FrameRequest, FrameScheduler, ResizeCallback, SizeObserver};
use crate::surface::{Blend, Paint, Path, Surface};
use crate::viewport::{Extent, Viewport};

/// Frame scheduler whose refreshes happen when [`ManualScheduler::run_frame`]
/// is called.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<i32>,
    queue: RefCell<Vec<(FrameRequest, FrameCallback)>>,
    cancelled: Cell<usize>,
    closed: Cell<bool>,
}

impl ManualScheduler {
    /// Runs every callback pending right now and returns how many ran.
    ///
    /// Callbacks requested while running wait for the next call.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let ran = due.len();
        for (_, callback) in due {
            callback();
        }
        ran
    }

    /// Runs `frames` refreshes back to back.
    pub fn run_frames(&self, frames: usize) {
        for _ in 0..frames {
            self.run_frame();
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of cancel calls that removed a pending request.
    pub fn cancelled(&self) -> usize {
        self.cancelled.get()
    }

    /// Makes every later request fail.
    pub fn close(&self) {
        self.closed.set(true);
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameRequest> {
        if self.closed.get() {
            return Err(AuroraError::Scheduler("scheduler closed".into()));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let request = FrameRequest(id);
        self.queue.borrow_mut().push((request, callback));
        Ok(request)
    }

    fn cancel_frame(&self, request: FrameRequest) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(pending, _)| *pending != request);
        if queue.len() != before {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}

/// Size observer over a container whose size is set by hand.
pub struct ManualObserver {
    extent: Cell<Extent>,
    ratio: Cell<f64>,
    callbacks: RefCell<Vec<ResizeCallback>>,
    disconnects: Cell<usize>,
}

impl ManualObserver {
    pub fn new(extent: Extent, ratio: f64) -> Self {
        Self {
            extent: Cell::new(extent),
            ratio: Cell::new(ratio),
            callbacks: RefCell::new(Vec::new()),
            disconnects: Cell::new(0),
        }
    }

    /// Changes the container size and notifies every observer callback.
    pub fn resize(&self, extent: Extent, ratio: f64) {
        self.extent.set(extent);
        self.ratio.set(ratio);
        let callbacks = self.callbacks.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }

    pub fn callbacks(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.get()
    }
}

impl SizeObserver for ManualObserver {
    fn measure(&self) -> Extent {
        self.extent.get()
    }

    fn pixel_ratio(&self) -> f64 {
        self.ratio.get()
    }

    fn observe(&self, callback: ResizeCallback) -> Result<()> {
        self.callbacks.borrow_mut().push(callback);
        Ok(())
    }

    fn disconnect(&self) {
        self.callbacks.borrow_mut().clear();
        self.disconnects.set(self.disconnects.get() + 1);
    }
}

/// One call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Resize(Viewport),
    Clear { width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64, paint: Paint },
    FillPath { path: Path, paint: Paint },
    StrokePath { path: Path, color: Color, line_width: f64 },
    SetBlend(Blend),
}

impl DrawCall {
    fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCall::FillRect { .. } | DrawCall::FillPath { .. } | DrawCall::StrokePath { .. }
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    size: Option<Viewport>,
}

impl RecordingSurface {
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Viewport of the most recent resize.
    pub fn size(&self) -> Option<Viewport> {
        self.size
    }

    /// Fills and strokes issued so far.
    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|call| call.is_draw()).count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.size = Some(*viewport);
        self.calls.push(DrawCall::Resize(*viewport));
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            width,
            height,
            paint: paint.clone(),
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.calls.push(DrawCall::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64) {
        self.calls.push(DrawCall::StrokePath {
            path: path.clone(),
            color,
            line_width,
        });
    }

    fn set_blend(&mut self, blend: Blend) {
        self.calls.push(DrawCall::SetBlend(blend));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn cancelled_requests_never_run() {
        let scheduler = ManualScheduler::default();
        let hits = Rc::new(Cell::new(0));
        let request = {
            let hits = hits.clone();
            scheduler
                .request_frame(Rc::new(move || hits.set(hits.get() + 1)))
                .unwrap()
        };
        scheduler.cancel_frame(request);
        scheduler.cancel_frame(request);
        assert_eq!(scheduler.cancelled(), 1);
        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn observer_stops_notifying_after_disconnect() {
        let observer = ManualObserver::new(Extent::new(1.0, 1.0), 1.0);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            observer
                .observe(Rc::new(move || hits.set(hits.get() + 1)))
                .unwrap();
        }
        observer.resize(Extent::new(5.0, 5.0), 1.0);
        observer.disconnect();
        observer.resize(Extent::new(6.0, 6.0), 1.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(observer.measure(), Extent::new(6.0, 6.0));
    }
}
