use super::{InputWiring, ListenerSet};
use crate::input::{self, TouchPhase};
use web_sys as web;

const TOUCH_EVENTS: [(&str, TouchPhase); 4] = [
    ("touchstart", TouchPhase::Start),
    ("touchmove", TouchPhase::Move),
    ("touchend", TouchPhase::End),
    ("touchcancel", TouchPhase::End),
];

pub fn wire_touch(w: &InputWiring, set: &mut ListenerSet) -> anyhow::Result<()> {
    for (kind, phase) in TOUCH_EVENTS {
        let wiring = w.clone();
        set.listen(w.container.as_ref(), kind, move |ev: web::TouchEvent| {
            let event = input::touch_event(&ev, phase);
            if phase != TouchPhase::Move {
                log::debug!("[touch] {:?}", event);
            }
            wiring.dispatch(event);
        })?;
    }
    Ok(())
}
