//! Pointer/touch/wheel state machine.
//!
//! `handle_input` takes the current `InteractionState` by value and returns the
//! next one together with the `Effect` the viewer must apply. Nothing here
//! touches the scene or the drawing surface.

use crate::camera::ViewPreset;
use crate::config::ViewerConfig;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionState {
    pub dragging: bool,
    pub last_pointer: Vec2,
    pub auto_rotate: bool,
    pub rotation_speed: f32,
    pub camera_distance: f32,
}

impl InteractionState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            dragging: false,
            last_pointer: Vec2::ZERO,
            auto_rotate: config.auto_rotate,
            rotation_speed: config.auto_rotate_speed,
            camera_distance: config.clamp_distance(config.initial_distance),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.dragging {
            Mode::Dragging
        } else if self.auto_rotate {
            Mode::AutoRotating
        } else {
            Mode::Idle
        }
    }

    /// Yaw increment for one frame, if auto-rotate is still on.
    pub fn auto_rotate_step(&self) -> Option<f32> {
        self.auto_rotate.then_some(self.rotation_speed)
    }

    fn begin_drag(mut self, at: Vec2) -> Self {
        self.dragging = true;
        self.last_pointer = at;
        // once the user grabs the model it stays where they leave it
        self.auto_rotate = false;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    AutoRotating,
    Dragging,
    Idle,
}

/// Input already reduced to the values the state machine needs.
///
/// Touch events carry the number of active touches and the position of the
/// first one (ignored when no touch remains).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    TouchStart { touches: u32, x: f32, y: f32 },
    TouchMove { touches: u32, x: f32, y: f32 },
    TouchEnd { touches: u32, x: f32, y: f32 },
    Wheel { delta_y: f32 },
    Resize { width: u32, height: u32 },
    SelectView(ViewPreset),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    None,
    /// Increment applied once to the rigid device node.
    Rotate { yaw: f32, pitch: f32 },
    Zoom { distance: f32 },
    Resize { width: u32, height: u32 },
    Frame(ViewPreset),
}

pub fn handle_input(
    state: InteractionState,
    event: InputEvent,
    config: &ViewerConfig,
) -> (InteractionState, Effect) {
    match event {
        InputEvent::PointerDown { x, y } => (state.begin_drag(Vec2::new(x, y)), Effect::None),
        InputEvent::PointerMove { x, y } => drag_to(state, Vec2::new(x, y), config),
        InputEvent::PointerUp => (
            InteractionState {
                dragging: false,
                ..state
            },
            Effect::None,
        ),
        InputEvent::TouchStart { touches, x, y } => {
            if touches == 1 || state.dragging {
                // a second finger re-anchors on the first one; its moves are ignored below
                (state.begin_drag(Vec2::new(x, y)), Effect::None)
            } else {
                let state = InteractionState {
                    auto_rotate: false,
                    ..state
                };
                (state, Effect::None)
            }
        }
        InputEvent::TouchMove { touches, x, y } => {
            if touches == 1 {
                drag_to(state, Vec2::new(x, y), config)
            } else {
                (state, Effect::None)
            }
        }
        InputEvent::TouchEnd { touches, x, y } => {
            if touches == 0 {
                (
                    InteractionState {
                        dragging: false,
                        ..state
                    },
                    Effect::None,
                )
            } else {
                (state.begin_drag(Vec2::new(x, y)), Effect::None)
            }
        }
        InputEvent::Wheel { delta_y } => zoom(state, delta_y, config),
        InputEvent::Resize { width, height } => {
            if width == 0 || height == 0 {
                (state, Effect::None)
            } else {
                (state, Effect::Resize { width, height })
            }
        }
        InputEvent::SelectView(preset) => (
            InteractionState {
                auto_rotate: false,
                ..state
            },
            Effect::Frame(preset),
        ),
    }
}

fn drag_to(
    mut state: InteractionState,
    at: Vec2,
    config: &ViewerConfig,
) -> (InteractionState, Effect) {
    if !state.dragging {
        return (state, Effect::None);
    }
    let delta = at - state.last_pointer;
    state.last_pointer = at;
    let effect = Effect::Rotate {
        yaw: delta.x * config.drag_radians_per_pixel,
        pitch: delta.y * config.drag_radians_per_pixel,
    };
    (state, effect)
}

fn zoom(mut state: InteractionState, delta_y: f32, config: &ViewerConfig) -> (InteractionState, Effect) {
    let step = if delta_y > 0.0 {
        config.zoom_step
    } else if delta_y < 0.0 {
        -config.zoom_step
    } else {
        return (state, Effect::None);
    };
    state.camera_distance = config.clamp_distance(state.camera_distance + step);
    let distance = state.camera_distance;
    (state, Effect::Zoom { distance })
}
