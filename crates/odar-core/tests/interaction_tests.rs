// Host-side tests for the pointer/touch/wheel state machine.

use odar_core::{handle_input, Effect, InputEvent, InteractionState, Mode, ViewPreset, ViewerConfig};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn run(
    config: &ViewerConfig,
    mut state: InteractionState,
    events: &[InputEvent],
) -> (InteractionState, Vec<Effect>) {
    let mut effects = Vec::new();
    for &ev in events {
        let (next, effect) = handle_input(state, ev, config);
        state = next;
        effects.push(effect);
    }
    (state, effects)
}

#[test]
fn initial_state_auto_rotates_at_default_distance() {
    let config = ViewerConfig::default();
    let state = InteractionState::new(&config);
    assert_eq!(state.mode(), Mode::AutoRotating);
    assert!(!state.dragging);
    assert!(approx(state.camera_distance, 5.0));
    assert_eq!(state.auto_rotate_step(), Some(0.003));
}

#[test]
fn drag_from_100_100_to_150_130_yields_half_and_three_tenths_radian() {
    let config = ViewerConfig::default();
    let (state, effects) = run(
        &config,
        InteractionState::new(&config),
        &[
            InputEvent::PointerDown { x: 100.0, y: 100.0 },
            InputEvent::PointerMove { x: 150.0, y: 130.0 },
        ],
    );
    assert_eq!(effects[0], Effect::None);
    match effects[1] {
        Effect::Rotate { yaw, pitch } => {
            assert!(approx(yaw, 0.5), "yaw {}", yaw);
            assert!(approx(pitch, 0.3), "pitch {}", pitch);
        }
        other => panic!("expected rotate, got {:?}", other),
    }
    assert_eq!(state.mode(), Mode::Dragging);
    assert_eq!(state.last_pointer, glam::Vec2::new(150.0, 130.0));
}

#[test]
fn consecutive_moves_rotate_by_incremental_deltas() {
    let config = ViewerConfig::default();
    let (_, effects) = run(
        &config,
        InteractionState::new(&config),
        &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 10.0, y: 0.0 },
            InputEvent::PointerMove { x: 10.0, y: -20.0 },
        ],
    );
    assert_eq!(
        effects[1],
        Effect::Rotate {
            yaw: 10.0 * config.drag_radians_per_pixel,
            pitch: 0.0
        }
    );
    assert_eq!(
        effects[2],
        Effect::Rotate {
            yaw: 0.0,
            pitch: -20.0 * config.drag_radians_per_pixel
        }
    );
}

#[test]
fn move_without_button_does_nothing() {
    let config = ViewerConfig::default();
    let start = InteractionState::new(&config);
    let (state, effect) = handle_input(start, InputEvent::PointerMove { x: 40.0, y: 40.0 }, &config);
    assert_eq!(effect, Effect::None);
    assert_eq!(state, start);
}

#[test]
fn pointer_up_ends_drag_and_keeps_auto_rotate_off() {
    let config = ViewerConfig::default();
    let (state, effects) = run(
        &config,
        InteractionState::new(&config),
        &[
            InputEvent::PointerDown { x: 5.0, y: 5.0 },
            InputEvent::PointerUp,
            InputEvent::PointerMove { x: 50.0, y: 50.0 },
        ],
    );
    assert_eq!(effects[2], Effect::None);
    assert!(!state.dragging);
    assert!(!state.auto_rotate);
    assert_eq!(state.mode(), Mode::Idle);
    assert_eq!(state.auto_rotate_step(), None);
}

#[test]
fn wheel_steps_distance_and_clamps_to_limits() {
    let config = ViewerConfig::default();
    let start = InteractionState::new(&config);

    let (state, effect) = handle_input(start, InputEvent::Wheel { delta_y: -120.0 }, &config);
    assert!(approx(state.camera_distance, 4.9));
    assert!(matches!(effect, Effect::Zoom { distance } if approx(distance, 4.9)));

    let zoom_in = vec![InputEvent::Wheel { delta_y: -1.0 }; 200];
    let (state, _) = run(&config, start, &zoom_in);
    assert_eq!(state.camera_distance, 2.0);

    let zoom_out = vec![InputEvent::Wheel { delta_y: 3.0 }; 200];
    let (state, effects) = run(&config, state, &zoom_out);
    assert_eq!(state.camera_distance, 10.0);
    assert_eq!(effects.last(), Some(&Effect::Zoom { distance: 10.0 }));
}

#[test]
fn wheel_never_leaves_limits_for_mixed_input() {
    let config = ViewerConfig::default();
    let mut state = InteractionState::new(&config);
    for i in 0..500 {
        let delta_y = if (i / 37) % 2 == 0 { 1.0 } else { -1.0 };
        state = handle_input(state, InputEvent::Wheel { delta_y }, &config).0;
        assert!((2.0..=10.0).contains(&state.camera_distance));
    }
}

#[test]
fn zero_or_nan_wheel_delta_is_ignored() {
    let config = ViewerConfig::default();
    let start = InteractionState::new(&config);
    for delta_y in [0.0, -0.0, f32::NAN] {
        let (state, effect) = handle_input(start, InputEvent::Wheel { delta_y }, &config);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.camera_distance, start.camera_distance);
    }
}

#[test]
fn wheel_does_not_stop_auto_rotate() {
    let config = ViewerConfig::default();
    let (state, _) = handle_input(
        InteractionState::new(&config),
        InputEvent::Wheel { delta_y: 1.0 },
        &config,
    );
    assert!(state.auto_rotate);
}

#[test]
fn single_touch_drags_like_a_mouse() {
    let config = ViewerConfig::default();
    let (state, effects) = run(
        &config,
        InteractionState::new(&config),
        &[
            InputEvent::TouchStart { touches: 1, x: 100.0, y: 100.0 },
            InputEvent::TouchMove { touches: 1, x: 150.0, y: 130.0 },
            InputEvent::TouchEnd { touches: 0, x: 0.0, y: 0.0 },
        ],
    );
    assert!(!state.auto_rotate);
    assert!(!state.dragging);
    match effects[1] {
        Effect::Rotate { yaw, pitch } => {
            assert!(approx(yaw, 0.5));
            assert!(approx(pitch, 0.3));
        }
        other => panic!("expected rotate, got {:?}", other),
    }
    assert_eq!(effects[2], Effect::None);
}

#[test]
fn multi_touch_moves_are_ignored_and_lift_re_anchors() {
    let config = ViewerConfig::default();
    let (state, effects) = run(
        &config,
        InteractionState::new(&config),
        &[
            InputEvent::TouchStart { touches: 1, x: 10.0, y: 10.0 },
            InputEvent::TouchStart { touches: 2, x: 10.0, y: 10.0 },
            InputEvent::TouchMove { touches: 2, x: 80.0, y: 80.0 },
            // second finger lifts; the remaining one is now at (60, 60)
            InputEvent::TouchEnd { touches: 1, x: 60.0, y: 60.0 },
            InputEvent::TouchMove { touches: 1, x: 70.0, y: 60.0 },
        ],
    );
    assert_eq!(effects[2], Effect::None);
    assert!(state.dragging);
    match effects[4] {
        Effect::Rotate { yaw, pitch } => {
            assert!(approx(yaw, 10.0 * config.drag_radians_per_pixel));
            assert!(approx(pitch, 0.0));
        }
        other => panic!("expected rotate, got {:?}", other),
    }
}

#[test]
fn multi_finger_touch_start_does_not_begin_a_drag() {
    let config = ViewerConfig::default();
    let (state, effects) = run(
        &config,
        InteractionState::new(&config),
        &[
            InputEvent::TouchStart { touches: 2, x: 5.0, y: 5.0 },
            InputEvent::TouchMove { touches: 1, x: 50.0, y: 50.0 },
        ],
    );
    assert!(!state.dragging);
    assert!(!state.auto_rotate);
    assert_eq!(effects, vec![Effect::None, Effect::None]);
}

#[test]
fn any_touch_or_drag_disables_auto_rotate_for_good() {
    let config = ViewerConfig::default();
    let starts = [
        InputEvent::PointerDown { x: 0.0, y: 0.0 },
        InputEvent::TouchStart { touches: 1, x: 0.0, y: 0.0 },
        InputEvent::TouchStart { touches: 3, x: 0.0, y: 0.0 },
    ];
    for start in starts {
        let (state, _) = run(
            &config,
            InteractionState::new(&config),
            &[
                start,
                InputEvent::PointerUp,
                InputEvent::TouchEnd { touches: 0, x: 0.0, y: 0.0 },
                InputEvent::Wheel { delta_y: 1.0 },
                InputEvent::Resize { width: 10, height: 10 },
            ],
        );
        assert!(!state.auto_rotate, "{:?}", start);
        assert_eq!(state.auto_rotate_step(), None);
    }
}

#[test]
fn resize_passes_through_and_ignores_zero_dimensions() {
    let config = ViewerConfig::default();
    let start = InteractionState::new(&config);
    let (_, effect) = handle_input(start, InputEvent::Resize { width: 800, height: 600 }, &config);
    assert_eq!(effect, Effect::Resize { width: 800, height: 600 });
    for (width, height) in [(0, 600), (800, 0), (0, 0)] {
        let (state, effect) = handle_input(start, InputEvent::Resize { width, height }, &config);
        assert_eq!(effect, Effect::None);
        assert_eq!(state, start);
    }
}

#[test]
fn select_view_frames_and_stops_auto_rotate() {
    let config = ViewerConfig::default();
    let (state, effect) = handle_input(
        InteractionState::new(&config),
        InputEvent::SelectView(ViewPreset::Top),
        &config,
    );
    assert_eq!(effect, Effect::Frame(ViewPreset::Top));
    assert!(!state.auto_rotate);
    assert!(approx(state.camera_distance, 5.0));
}

#[test]
fn auto_rotate_can_be_disabled_by_config() {
    let config = ViewerConfig {
        auto_rotate: false,
        ..ViewerConfig::default()
    };
    let state = InteractionState::new(&config);
    assert_eq!(state.mode(), Mode::Idle);
    assert_eq!(state.auto_rotate_step(), None);
}
