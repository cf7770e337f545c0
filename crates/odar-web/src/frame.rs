use crate::render::GpuState;
use instant::Instant;
use odar_core::Viewer;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const FPS_LOG_INTERVAL_FRAMES: u64 = 600;

pub struct FrameContext {
    pub viewer: Rc<RefCell<Viewer>>,
    pub gpu: GpuState,
    pub last_instant: Instant,
    pub frame_time_accum: f32,
}

impl FrameContext {
    pub fn new(viewer: Rc<RefCell<Viewer>>, gpu: GpuState) -> Self {
        Self {
            viewer,
            gpu,
            last_instant: Instant::now(),
            frame_time_accum: 0.0,
        }
    }

    /// Advance and paint one frame. Returns `false` when the loop must stop.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.frame_time_accum += dt.as_secs_f32();

        let wall_sec = js_sys::Date::now() * 0.001;
        let (snapshot, frames) = {
            let mut viewer = match self.viewer.try_borrow_mut() {
                Ok(v) => v,
                // an input handler holds the viewer; paint next frame instead
                Err(_) => return true,
            };
            match viewer.tick(wall_sec) {
                Some(s) => (s, viewer.frames()),
                None => return false,
            }
        };

        if frames % FPS_LOG_INTERVAL_FRAMES == 0 && self.frame_time_accum > 0.0 {
            log::debug!(
                "[frame] {:.1} fps over last {} frames",
                FPS_LOG_INTERVAL_FRAMES as f32 / self.frame_time_accum,
                FPS_LOG_INTERVAL_FRAMES
            );
            self.frame_time_accum = 0.0;
        }

        match self.gpu.render(&snapshot) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                self.gpu.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory, stopping render loop");
                false
            }
            Err(e) => {
                log::warn!("[gpu] frame skipped: {:?}", e);
                true
            }
        }
    }
}

struct LoopState {
    handle: Cell<Option<i32>>,
    cancelled: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopState {
    fn schedule(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.handle.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// requestAnimationFrame loop that can be cancelled; dropping it cancels too.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(ctx: FrameContext) -> Self {
        let state = Rc::new(LoopState {
            handle: Cell::new(None),
            cancelled: Cell::new(false),
            tick: RefCell::new(None),
        });
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let mut ctx = ctx;
        let closure = Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.handle.set(None);
            if state.cancelled.get() {
                return;
            }
            if !ctx.frame() {
                log::info!("[frame] loop stopped");
                return;
            }
            state.schedule();
        }) as Box<dyn FnMut()>);
        *state.tick.borrow_mut() = Some(closure);
        state.schedule();
        log::info!("[frame] loop started");
        Self { state }
    }

    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }
        if let (Some(id), Some(window)) = (self.state.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
        // releases the frame context, and with it the GPU surface
        self.state.tick.borrow_mut().take();
        log::info!("[frame] loop cancelled");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
