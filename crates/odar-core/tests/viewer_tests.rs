// Host-side tests for the viewer: rigid rotation, ticking, resize and disposal.

use glam::{Mat4, Quat, Vec3};
use odar_core::scene::SUB_ASSEMBLIES;
use odar_core::{Effect, InputEvent, ViewPreset, Viewer, ViewerConfig, ViewerError};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn viewer() -> Viewer {
    Viewer::new(ViewerConfig::default(), 800, 600).expect("default config is valid")
}

fn sub_assembly_world_matrices(v: &Viewer) -> Vec<Mat4> {
    SUB_ASSEMBLIES
        .iter()
        .map(|name| {
            let id = v.scene().sub_assembly(name).expect("sub-assembly exists");
            v.scene().graph.world_matrix(id)
        })
        .collect()
}

#[test]
fn new_viewer_starts_unrotated_and_sized() {
    let v = viewer();
    assert_eq!(v.device_rotation(), Vec3::ZERO);
    assert_eq!(v.surface_size(), (800, 600));
    assert!(approx(v.camera().aspect, 800.0 / 600.0));
    assert!(approx(v.camera().distance(), 5.0));
    assert_eq!(v.frames(), 0);
    assert!(!v.is_disposed());
}

#[test]
fn zero_sized_surface_is_clamped_to_one_pixel() {
    let v = Viewer::new(ViewerConfig::default(), 0, 0).expect("valid");
    assert_eq!(v.surface_size(), (1, 1));
    assert!(v.camera().aspect.is_finite());
}

#[test]
fn invalid_config_is_rejected() {
    let config = ViewerConfig {
        min_distance: 12.0,
        ..ViewerConfig::default()
    };
    assert!(matches!(
        Viewer::new(config, 10, 10),
        Err(ViewerError::InvalidConfig(_))
    ));
}

#[test]
fn ticks_auto_rotate_the_device_about_y() {
    let mut v = viewer();
    for i in 0..10 {
        assert!(v.tick(i as f64 / 60.0).is_some());
    }
    let rot = v.device_rotation();
    assert!(approx(rot.y, 0.03), "yaw {}", rot.y);
    assert_eq!(rot.x, 0.0);
    assert_eq!(v.frames(), 10);
}

#[test]
fn drag_scenario_rotates_every_sub_assembly_by_the_same_increment() {
    let mut v = viewer();
    let before = sub_assembly_world_matrices(&v);

    v.handle(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    let effect = v.handle(InputEvent::PointerMove { x: 150.0, y: 130.0 });
    assert!(matches!(effect, Effect::Rotate { .. }));

    let rot = v.device_rotation();
    assert!(approx(rot.y, 0.5));
    assert!(approx(rot.x, 0.3));

    // device sits at the origin, so each child moves by exactly the device rotation
    let delta = Mat4::from_quat(Quat::from_euler(glam::EulerRot::XYZ, rot.x, rot.y, rot.z));
    let after = sub_assembly_world_matrices(&v);
    for ((name, b), a) in SUB_ASSEMBLIES.iter().zip(&before).zip(&after) {
        assert!(
            a.abs_diff_eq(delta * *b, 1e-5),
            "{} diverged from the device rotation",
            name
        );
    }
}

#[test]
fn sub_assemblies_stay_rigid_over_long_input_sequences() {
    let mut v = viewer();
    let local: Vec<Mat4> = SUB_ASSEMBLIES
        .iter()
        .map(|name| {
            let id = v.scene().sub_assembly(name).expect("exists");
            v.scene().graph.node(id).transform.matrix()
        })
        .collect();

    v.tick(0.0);
    v.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    for i in 1..50 {
        let x = (i * 7 % 31) as f32 * 3.0;
        let y = (i * 5 % 17) as f32 * -2.0;
        v.handle(InputEvent::PointerMove { x, y });
        v.tick(i as f64 * 0.016);
    }
    v.handle(InputEvent::PointerUp);

    let device = v.scene().graph.world_matrix(v.scene().device);
    for ((name, l), w) in SUB_ASSEMBLIES
        .iter()
        .zip(&local)
        .zip(sub_assembly_world_matrices(&v))
    {
        assert!(w.abs_diff_eq(device * *l, 1e-5), "{} is not rigid", name);
    }
}

#[test]
fn auto_rotate_never_applies_after_a_drag() {
    let mut v = viewer();
    v.tick(0.0);
    v.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    v.handle(InputEvent::PointerUp);
    let frozen = v.device_rotation();
    for i in 0..100 {
        v.tick(i as f64);
    }
    assert_eq!(v.device_rotation(), frozen);
}

#[test]
fn indicator_follows_pulse_independent_of_rotation() {
    let mut v = viewer();
    for &t in &[0.0_f64, 0.25, 1.0, 2.5, 10.0, 1234.5] {
        let snap = v.tick(t).expect("live viewer");
        let expected = 0.5 + 0.3 * (2.0 * t).sin() as f32;
        assert!(approx(snap.indicator_intensity, expected), "t={}", t);
        assert!(approx(v.indicator_intensity(), expected));
        v.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        v.handle(InputEvent::PointerMove { x: 33.0, y: -12.0 });
        v.handle(InputEvent::PointerUp);
    }
}

#[test]
fn resize_updates_aspect_and_surface_size() {
    let mut v = viewer();
    let effect = v.handle(InputEvent::Resize { width: 1024, height: 512 });
    assert_eq!(effect, Effect::Resize { width: 1024, height: 512 });
    assert!(approx(v.camera().aspect, 2.0));
    assert_eq!(v.surface_size(), (1024, 512));
    let snap = v.tick(0.0).expect("live viewer");
    assert_eq!(snap.surface_size, (1024, 512));

    v.handle(InputEvent::Resize { width: 0, height: 300 });
    assert_eq!(v.surface_size(), (1024, 512));
}

#[test]
fn wheel_moves_camera_along_line_of_sight() {
    let mut v = viewer();
    let dir_before = v.camera().eye.normalize();
    v.handle(InputEvent::Wheel { delta_y: -100.0 });
    assert!(approx(v.camera().distance(), 4.9));
    assert!(v.camera().eye.normalize().abs_diff_eq(dir_before, 1e-5));
    for _ in 0..100 {
        v.handle(InputEvent::Wheel { delta_y: -100.0 });
    }
    assert!(approx(v.camera().distance(), 2.0));
}

#[test]
fn select_view_resets_rotation_and_keeps_zoom() {
    let mut v = viewer();
    v.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    v.handle(InputEvent::PointerMove { x: 80.0, y: 40.0 });
    v.handle(InputEvent::PointerUp);
    for _ in 0..10 {
        v.handle(InputEvent::Wheel { delta_y: 1.0 });
    }
    let effect = v.handle(InputEvent::SelectView(ViewPreset::Front));
    assert_eq!(effect, Effect::Frame(ViewPreset::Front));
    assert_eq!(v.device_rotation(), Vec3::ZERO);
    assert_eq!(v.camera().preset, ViewPreset::Front);
    assert!(v.camera().eye.abs_diff_eq(Vec3::new(0.0, 0.0, 6.0), 1e-4));
}

#[test]
fn label_anchor_moves_with_the_device() {
    let mut v = viewer();
    v.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    v.handle(InputEvent::PointerMove { x: 120.0, y: 45.0 });
    let snap = v.snapshot();
    let expected = snap.device_model.transform_point3(Vec3::new(0.0, 0.1, 0.2));
    assert!(snap.label_anchor.abs_diff_eq(expected, 1e-5));
    assert!(approx(snap.label_size.x, 0.5));
    assert!(approx(snap.label_size.y, 0.25));
}

#[test]
fn snapshot_matrices_match_camera() {
    let mut v = viewer();
    let snap = v.tick(0.0).expect("live viewer");
    assert_eq!(snap.view, v.camera().view_matrix());
    assert_eq!(snap.projection, v.camera().projection_matrix());
    assert_eq!(snap.eye, v.camera().eye);
}

#[test]
fn disposed_viewer_ignores_ticks_and_input() {
    let mut v = viewer();
    v.tick(0.0);
    v.dispose();
    assert!(v.is_disposed());
    let rotation = v.device_rotation();
    assert_eq!(v.tick(1.0), None);
    assert_eq!(
        v.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 }),
        Effect::None
    );
    assert_eq!(
        v.handle(InputEvent::PointerMove { x: 90.0, y: 90.0 }),
        Effect::None
    );
    assert_eq!(v.handle(InputEvent::Wheel { delta_y: 1.0 }), Effect::None);
    assert_eq!(v.device_rotation(), rotation);
    assert_eq!(v.frames(), 1);
    // second dispose is harmless
    v.dispose();
    assert!(v.is_disposed());
}
