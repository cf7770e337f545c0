use odar_core::InputEvent;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// Client-space pointer position. Drag deltas are relative, so no canvas mapping is needed.
#[inline]
pub fn mouse_client(ev: &web::MouseEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}

/// Active touch count and the first active touch's client position.
pub fn touch_summary(ev: &web::TouchEvent) -> (u32, f32, f32) {
    let touches = ev.touches();
    let count = touches.length();
    let (x, y) = touches
        .get(0)
        .map(|t| (t.client_x() as f32, t.client_y() as f32))
        .unwrap_or((0.0, 0.0));
    (count, x, y)
}

pub fn touch_event(ev: &web::TouchEvent, phase: TouchPhase) -> InputEvent {
    let (touches, x, y) = touch_summary(ev);
    match phase {
        TouchPhase::Start => InputEvent::TouchStart { touches, x, y },
        TouchPhase::Move => InputEvent::TouchMove { touches, x, y },
        TouchPhase::End => InputEvent::TouchEnd { touches, x, y },
    }
}

/// Normalize wheel deltas to pixels; only the sign drives zoom.
pub fn wheel_delta(ev: &web::WheelEvent) -> f32 {
    let scale = match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => 16.0,
        web::WheelEvent::DOM_DELTA_PAGE => 800.0,
        _ => 1.0,
    };
    (ev.delta_y() * scale) as f32
}
