pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod info;
pub mod interaction;
pub mod mesh;
pub mod scene;
pub mod viewer;

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use interaction::*;
pub use viewer::*;

// Shaders bundled as string constants
pub static DEVICE_WGSL: &str = include_str!("../shaders/device.wgsl");
pub static LABEL_WGSL: &str = include_str!("../shaders/label.wgsl");
