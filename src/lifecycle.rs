//! Mounting, driving and tearing down the background.
//!
//! The frame request and the resize subscription are each owned by a guard
//! that releases its resource when dropped, so every exit path, including an
//! error halfway through [`AuroraWaves::mount`], leaves nothing scheduled.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::host::{FrameCallback, FrameRequest, FrameScheduler, SizeObserver};
use crate::palette::Palette;
use crate::renderer::WaveRenderer;
use crate::surface::Surface;
use crate::viewport::{Extent, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Final; entered on unmount or when the scheduler refuses a frame.
    Stopped,
}

struct Scene<S> {
    renderer: WaveRenderer,
    surface: S,
}

impl<S: Surface> Scene<S> {
    /// Keeps surface and renderer sized together before the next draw.
    fn fit(&mut self, extent: Extent, raw_ratio: f64) {
        let viewport = Viewport::measure(extent, raw_ratio);
        log::debug!(
            "aurora resize {}x{} @{}x",
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio()
        );
        self.surface.resize(&viewport);
        self.renderer.resize(viewport);
    }

    fn draw(&mut self) {
        self.renderer.render_frame(&mut self.surface);
    }
}

/// Self-rescheduling frame callback. Cancels the pending request on drop.
struct FrameLoop<F: FrameScheduler> {
    scheduler: Rc<F>,
    pending: Rc<Cell<Option<FrameRequest>>>,
    state: Rc<Cell<LoopState>>,
    // Sole strong owner of the tick; the tick only holds a weak link back.
    _tick: Rc<RefCell<Option<FrameCallback>>>,
}

impl<F: FrameScheduler + 'static> FrameLoop<F> {
    fn start<S: Surface + 'static>(scheduler: Rc<F>, scene: Rc<RefCell<Scene<S>>>) -> Result<Self> {
        let pending = Rc::new(Cell::new(None));
        let state = Rc::new(Cell::new(LoopState::Running));
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let tick: FrameCallback = {
            let scheduler = Rc::downgrade(&scheduler);
            let pending = pending.clone();
            let state = state.clone();
            let slot = Rc::downgrade(&slot);
            Rc::new(move || {
                pending.set(None);
                if state.get() == LoopState::Stopped {
                    return;
                }
                scene.borrow_mut().draw();

                let (Some(scheduler), Some(slot)) = (scheduler.upgrade(), slot.upgrade()) else {
                    return;
                };
                let Some(next) = slot.borrow().clone() else {
                    return;
                };
                match scheduler.request_frame(next) {
                    Ok(request) => pending.set(Some(request)),
                    Err(err) => {
                        log::warn!("aurora frame loop stopped: {err}");
                        state.set(LoopState::Stopped);
                    }
                }
            })
        };
        *slot.borrow_mut() = Some(tick.clone());

        let first = scheduler.request_frame(tick)?;
        pending.set(Some(first));
        Ok(Self {
            scheduler,
            pending,
            state,
            _tick: slot,
        })
    }

    fn state(&self) -> LoopState {
        self.state.get()
    }
}

impl<F: FrameScheduler> Drop for FrameLoop<F> {
    fn drop(&mut self) {
        self.state.set(LoopState::Stopped);
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
    }
}

/// Live resize subscription. Disconnects the observer on drop.
struct ObserverSubscription<O: SizeObserver> {
    observer: Rc<O>,
}

impl<O: SizeObserver + 'static> ObserverSubscription<O> {
    fn attach<S: Surface + 'static>(observer: Rc<O>, scene: &Rc<RefCell<Scene<S>>>) -> Result<Self> {
        let callback = {
            let scene = Rc::downgrade(scene);
            let weak_observer: Weak<O> = Rc::downgrade(&observer);
            Rc::new(move || {
                let (Some(scene), Some(observer)) = (scene.upgrade(), weak_observer.upgrade()) else {
                    return;
                };
                scene.borrow_mut().fit(observer.measure(), observer.pixel_ratio());
            })
        };
        observer.observe(callback)?;
        Ok(Self { observer })
    }
}

impl<O: SizeObserver> Drop for ObserverSubscription<O> {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// A mounted aurora background.
///
/// Dropping the handle unmounts it.
pub struct AuroraWaves<S, F, O>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
    O: SizeObserver + 'static,
{
    scene: Rc<RefCell<Scene<S>>>,
    frames: Option<FrameLoop<F>>,
    resize: Option<ObserverSubscription<O>>,
}

impl<S, F, O> AuroraWaves<S, F, O>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
    O: SizeObserver + 'static,
{
    /// Sizes `surface` to the observed container, subscribes to resizes and
    /// requests the first frame.
    pub fn mount(surface: S, scheduler: F, observer: O, palette: Palette) -> Result<Self> {
        let viewport = Viewport::measure(observer.measure(), observer.pixel_ratio());
        let mut scene = Scene {
            renderer: WaveRenderer::new(palette, viewport),
            surface,
        };
        scene.surface.resize(&viewport);
        let scene = Rc::new(RefCell::new(scene));

        let resize = ObserverSubscription::attach(Rc::new(observer), &scene)?;
        // On error `resize` drops here and disconnects.
        let frames = FrameLoop::start(Rc::new(scheduler), scene.clone())?;

        log::info!(
            "aurora mounted at {}x{} @{}x, base hue {:.1}",
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio(),
            scene.borrow().renderer.palette().base_hue()
        );
        Ok(Self {
            scene,
            frames: Some(frames),
            resize: Some(resize),
        })
    }

    /// Cancels the pending frame and disconnects the observer. Idempotent.
    pub fn unmount(&mut self) {
        let frames = self.frames.take();
        let resize = self.resize.take();
        if frames.is_some() || resize.is_some() {
            log::info!("aurora unmounted after {} frames", self.frame_count());
        }
        drop(frames);
        drop(resize);
    }

    pub fn state(&self) -> LoopState {
        self.frames
            .as_ref()
            .map_or(LoopState::Stopped, FrameLoop::state)
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    pub fn frame_count(&self) -> u64 {
        self.scene.borrow().renderer.frame_count()
    }

    pub fn viewport(&self) -> Viewport {
        *self.scene.borrow().renderer.viewport()
    }

    pub fn base_hue(&self) -> f64 {
        self.scene.borrow().renderer.palette().base_hue()
    }

    /// Borrows the surface, e.g. to read back what was drawn.
    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.scene.borrow(), |scene| &scene.surface)
    }
}

impl<S, F, O> Drop for AuroraWaves<S, F, O>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
    O: SizeObserver + 'static,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
