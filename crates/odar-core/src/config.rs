use crate::constants::*;
use crate::error::ViewerError;

/// Tuning values for one viewer instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub drag_radians_per_pixel: f32,
    pub auto_rotate_speed: f32,
    pub auto_rotate: bool,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub initial_distance: f32,
    pub pulse_base: f32,
    pub pulse_amplitude: f32,
    pub pulse_omega: f32,
    pub loaded_notice_delay_ms: u32,
    pub loaded_notice_duration_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            drag_radians_per_pixel: DRAG_RADIANS_PER_PIXEL,
            auto_rotate_speed: AUTO_ROTATE_RADIANS_PER_FRAME,
            auto_rotate: true,
            zoom_step: ZOOM_STEP,
            min_distance: CAMERA_DISTANCE_MIN,
            max_distance: CAMERA_DISTANCE_MAX,
            initial_distance: CAMERA_DISTANCE_INITIAL,
            pulse_base: INDICATOR_PULSE_BASE,
            pulse_amplitude: INDICATOR_PULSE_AMPLITUDE,
            pulse_omega: INDICATOR_PULSE_OMEGA,
            loaded_notice_delay_ms: LOADED_NOTICE_DELAY_MS,
            loaded_notice_duration_ms: LOADED_NOTICE_DURATION_MS,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ViewerError> {
        let finite = [
            self.drag_radians_per_pixel,
            self.auto_rotate_speed,
            self.zoom_step,
            self.min_distance,
            self.max_distance,
            self.initial_distance,
            self.pulse_base,
            self.pulse_amplitude,
            self.pulse_omega,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ViewerError::InvalidConfig("values must be finite"));
        }
        if self.min_distance <= 0.0 || self.min_distance > self.max_distance {
            return Err(ViewerError::InvalidConfig(
                "distance limits must satisfy 0 < min <= max",
            ));
        }
        if self.zoom_step <= 0.0 {
            return Err(ViewerError::InvalidConfig("zoom step must be positive"));
        }
        if !(self.min_distance..=self.max_distance).contains(&self.initial_distance) {
            return Err(ViewerError::InvalidConfig(
                "initial distance must lie within the distance limits",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Indicator emissive intensity at wall-clock time `t_sec`.
    #[inline]
    pub fn indicator_intensity(&self, t_sec: f64) -> f32 {
        self.pulse_base + self.pulse_amplitude * (t_sec * self.pulse_omega as f64).sin() as f32
    }
}
