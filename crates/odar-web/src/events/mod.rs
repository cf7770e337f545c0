pub mod listeners;
pub mod pointer;
pub mod touch;

use crate::dom;
use odar_core::{InputEvent, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub use listeners::ListenerSet;

/// Handles shared by every input listener of one mounted viewer.
#[derive(Clone)]
pub struct InputWiring {
    pub viewer: Rc<RefCell<Viewer>>,
    pub window: web::Window,
    pub container: web::Element,
    pub canvas: web::HtmlCanvasElement,
}

impl InputWiring {
    pub(crate) fn dispatch(&self, event: InputEvent) {
        // a listener can fire re-entrantly while the frame loop holds the viewer
        match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => {
                viewer.handle(event);
            }
            Err(_) => log::warn!("[events] viewer busy, dropped {:?}", event),
        }
    }
}

/// Register all viewer input listeners into `set`.
pub fn wire_input_handlers(w: &InputWiring, set: &mut ListenerSet) -> anyhow::Result<()> {
    pointer::wire_mouse(w, set)?;
    pointer::wire_wheel(w, set)?;
    touch::wire_touch(w, set)?;
    wire_resize(w, set)?;
    log::info!("[events] wired {} listeners", set.len());
    Ok(())
}

fn wire_resize(w: &InputWiring, set: &mut ListenerSet) -> anyhow::Result<()> {
    let wiring = w.clone();
    set.listen(w.window.as_ref(), "resize", move |_: web::Event| {
        let (width, height) = dom::sync_canvas_backing_size(&wiring.container, &wiring.canvas);
        wiring.dispatch(InputEvent::Resize { width, height });
    })
}
