use super::{InputWiring, ListenerSet};
use crate::input;
use odar_core::InputEvent;
use web_sys as web;

/// Drag starts on the container; move/up go to the window so a drag that
/// leaves the canvas still tracks and ends.
pub fn wire_mouse(w: &InputWiring, set: &mut ListenerSet) -> anyhow::Result<()> {
    {
        let wiring = w.clone();
        set.listen(w.container.as_ref(), "mousedown", move |ev: web::MouseEvent| {
            let (x, y) = input::mouse_client(&ev);
            log::debug!("[mouse] down at ({}, {})", x, y);
            wiring.dispatch(InputEvent::PointerDown { x, y });
        })?;
    }
    {
        let wiring = w.clone();
        set.listen(w.window.as_ref(), "mousemove", move |ev: web::MouseEvent| {
            let (x, y) = input::mouse_client(&ev);
            wiring.dispatch(InputEvent::PointerMove { x, y });
        })?;
    }
    {
        let wiring = w.clone();
        set.listen(w.window.as_ref(), "mouseup", move |_: web::MouseEvent| {
            wiring.dispatch(InputEvent::PointerUp);
        })?;
    }
    Ok(())
}

pub fn wire_wheel(w: &InputWiring, set: &mut ListenerSet) -> anyhow::Result<()> {
    let wiring = w.clone();
    set.listen(w.container.as_ref(), "wheel", move |ev: web::WheelEvent| {
        // keep the page from scrolling under the viewer
        ev.prevent_default();
        let delta_y = input::wheel_delta(&ev);
        wiring.dispatch(InputEvent::Wheel { delta_y });
    })
}
