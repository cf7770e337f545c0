//! Viewer state shared by the input handlers and the frame loop.

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::interaction::{handle_input, Effect, InputEvent, InteractionState};
use crate::scene::{build_device_scene, DeviceScene, Primitive};
use glam::{Mat4, Vec2, Vec3};

/// Everything the renderer needs to paint one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub device_model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub indicator_intensity: f32,
    pub label_anchor: Vec3,
    pub label_size: Vec2,
    pub surface_size: (u32, u32),
}

pub struct Viewer {
    config: ViewerConfig,
    scene: DeviceScene,
    state: InteractionState,
    camera: Camera,
    surface_size: (u32, u32),
    frames: u64,
    disposed: bool,
}

impl Viewer {
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Result<Self, ViewerError> {
        config.validate()?;
        let state = InteractionState::new(&config);
        let (width, height) = (width.max(1), height.max(1));
        let camera = Camera::new(
            Default::default(),
            state.camera_distance,
            width as f32 / height as f32,
        );
        Ok(Self {
            scene: build_device_scene(),
            config,
            state,
            camera,
            surface_size: (width, height),
            frames: 0,
            disposed: false,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &DeviceScene {
        &self.scene
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn device_rotation(&self) -> Vec3 {
        self.scene.graph.node(self.scene.device).transform.rotation
    }

    pub fn indicator_intensity(&self) -> f32 {
        self.scene
            .graph
            .node(self.scene.indicator)
            .material()
            .map(|m| m.emissive_intensity())
            .unwrap_or(0.0)
    }

    /// Run one input event through the state machine and apply its effect.
    pub fn handle(&mut self, event: InputEvent) -> Effect {
        if self.disposed {
            return Effect::None;
        }
        let (next, effect) = handle_input(self.state, event, &self.config);
        self.state = next;
        self.apply(effect);
        effect
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Rotate { yaw, pitch } => self.rotate_device(yaw, pitch),
            Effect::Zoom { distance } => self.camera.set_distance(distance),
            Effect::Resize { width, height } => {
                self.camera.set_viewport(width, height);
                self.surface_size = (width, height);
            }
            Effect::Frame(preset) => {
                self.scene.graph.node_mut(self.scene.device).transform.rotation = Vec3::ZERO;
                self.camera.frame(preset, self.state.camera_distance);
                log::info!("[viewer] framed {}", preset);
            }
        }
    }

    fn rotate_device(&mut self, yaw: f32, pitch: f32) {
        let rotation = &mut self.scene.graph.node_mut(self.scene.device).transform.rotation;
        rotation.y += yaw;
        rotation.x += pitch;
    }

    /// Advance one display frame at wall-clock time `now_sec`.
    ///
    /// Returns `None` once the viewer has been disposed.
    pub fn tick(&mut self, now_sec: f64) -> Option<FrameSnapshot> {
        if self.disposed {
            return None;
        }
        if let Some(step) = self.state.auto_rotate_step() {
            self.rotate_device(step, 0.0);
        }
        let intensity = self.config.indicator_intensity(now_sec);
        if let Some(emissive) = self
            .scene
            .graph
            .node_mut(self.scene.indicator)
            .material_mut()
            .and_then(|m| m.emissive.as_mut())
        {
            emissive.intensity = intensity;
        }
        self.frames += 1;
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let graph = &self.scene.graph;
        let label_size = match graph.node(self.scene.label).kind {
            crate::scene::NodeKind::Mesh {
                primitive: Primitive::Sprite { size },
                ..
            } => size,
            _ => Vec2::ZERO,
        };
        FrameSnapshot {
            device_model: graph.world_matrix(self.scene.device),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            eye: self.camera.eye,
            indicator_intensity: self.indicator_intensity(),
            label_anchor: graph
                .world_matrix(self.scene.label)
                .transform_point3(Vec3::ZERO),
            label_size,
            surface_size: self.surface_size,
        }
    }

    /// Stop accepting input and frames; the web shell calls this on unmount.
    pub fn dispose(&mut self) {
        if !self.disposed {
            log::info!("[viewer] disposed after {} frames", self.frames);
        }
        self.disposed = true;
        self.state = InteractionState::new(&self.config);
    }
}
