// Shared tuning constants for the viewer. `ViewerConfig::default()` is built from these.

// Interaction
pub const DRAG_RADIANS_PER_PIXEL: f32 = 0.01; // pointer delta -> yaw/pitch
pub const AUTO_ROTATE_RADIANS_PER_FRAME: f32 = 0.003;
pub const ZOOM_STEP: f32 = 0.1; // camera distance change per wheel event

// Camera
pub const CAMERA_DISTANCE_MIN: f32 = 2.0;
pub const CAMERA_DISTANCE_MAX: f32 = 10.0;
pub const CAMERA_DISTANCE_INITIAL: f32 = 5.0;
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Indicator light breathing effect: base + amplitude * sin(omega * t)
pub const INDICATOR_PULSE_BASE: f32 = 0.5;
pub const INDICATOR_PULSE_AMPLITUDE: f32 = 0.3;
pub const INDICATOR_PULSE_OMEGA: f32 = 2.0; // rad/s

// Loaded notification
pub const LOADED_NOTICE_DELAY_MS: u32 = 1500;
pub const LOADED_NOTICE_DURATION_MS: u32 = 5000;
pub const LOADED_NOTICE_TITLE: &str = "3D Model loaded successfully!";
pub const LOADED_NOTICE_BODY: &str = "Click and drag to rotate. Use scroll wheel to zoom.";

// Lighting (matches the page background so the device sits on it)
pub const BACKGROUND_RGB: u32 = 0xf7fafc;
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
pub const KEY_LIGHT_INTENSITY: f32 = 1.0;
pub const BACK_LIGHT_POSITION: [f32; 3] = [-5.0, 5.0, -5.0];
pub const BACK_LIGHT_INTENSITY: f32 = 0.5;

// Geometry
pub const CYLINDER_SEGMENTS: u32 = 32;

// Label sprite
pub const LABEL_TEXT: &str = "OdAR";
pub const LABEL_FONT: &str = "Bold 24px Arial";
pub const LABEL_COLOR: &str = "#4FC3F7";
pub const LABEL_TEXTURE_SIZE: [u32; 2] = [256, 128];
pub const LABEL_WORLD_SIZE: [f32; 2] = [0.5, 0.25];

// Default DOM ids used by the web shell
pub const DEFAULT_CONTAINER_ID: &str = "odar-viewer";
