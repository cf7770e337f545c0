//! Perspective camera and the fixed framing presets offered by the view controls.

use crate::error::ViewerError;
use glam::{Mat4, Vec3};
use std::fmt;
use std::str::FromStr;

/// Camera framing selected from the view controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    #[default]
    Isometric,
    Front,
    Top,
    Side,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Isometric,
        ViewPreset::Front,
        ViewPreset::Top,
        ViewPreset::Side,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ViewPreset::Isometric => "isometric",
            ViewPreset::Front => "front",
            ViewPreset::Top => "top",
            ViewPreset::Side => "side",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewPreset::Isometric => "Isometric View",
            ViewPreset::Front => "Front View",
            ViewPreset::Top => "Top View",
            ViewPreset::Side => "Side View",
        }
    }

    /// Unit vector from the look-at target towards the eye.
    pub fn eye_direction(self) -> Vec3 {
        match self {
            // the page's opening shot, up and to the right of the front face
            ViewPreset::Isometric => Vec3::new(2.0, 2.0, 5.0).normalize(),
            ViewPreset::Front => Vec3::Z,
            ViewPreset::Top => Vec3::Y,
            ViewPreset::Side => Vec3::X,
        }
    }

    pub fn up(self) -> Vec3 {
        match self {
            // looking straight down: keep the front face at the bottom of the screen
            ViewPreset::Top => Vec3::NEG_Z,
            _ => Vec3::Y,
        }
    }
}

impl fmt::Display for ViewPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ViewPreset {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewPreset::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ViewerError::UnknownViewPreset(s.to_string()))
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub preset: ViewPreset,
}

impl Camera {
    pub fn new(preset: ViewPreset, distance: f32, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: crate::constants::CAMERA_FOVY_DEGREES.to_radians(),
            znear: crate::constants::CAMERA_ZNEAR,
            zfar: crate::constants::CAMERA_ZFAR,
            preset,
        };
        camera.frame(preset, distance);
        camera
    }

    /// Re-aim at the target along `preset`'s direction, keeping `distance`.
    pub fn frame(&mut self, preset: ViewPreset, distance: f32) {
        self.preset = preset;
        self.up = preset.up();
        self.eye = self.target + preset.eye_direction() * distance;
    }

    /// Move the eye along its current line of sight.
    pub fn set_distance(&mut self, distance: f32) {
        let dir = (self.eye - self.target).normalize_or_zero();
        let dir = if dir == Vec3::ZERO {
            self.preset.eye_direction()
        } else {
            dir
        };
        self.eye = self.target + dir * distance;
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Update the aspect ratio from surface dimensions; zero-sized surfaces are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
