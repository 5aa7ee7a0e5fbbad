//! Spindle configuration.

use serde::Deserialize;

/// Spindle speed range and PWM mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct SpindleConfig {
    /// Minimum commanded speed in RPM (non-zero speeds are raised to this).
    #[serde(default)]
    pub min_rpm: f32,

    /// Maximum speed in RPM (maps to full duty).
    #[serde(default = "default_max_rpm")]
    pub max_rpm: f32,

    /// Laser mode: power follows the motion speed when running reversed (M4).
    #[serde(default)]
    pub laser_mode: bool,

    /// Lowest duty emitted for a running spindle.
    #[serde(default = "default_pwm_min_output")]
    pub pwm_min_output: u8,
}

fn default_max_rpm() -> f32 {
    1000.0
}

fn default_pwm_min_output() -> u8 {
    1
}

impl Default for SpindleConfig {
    fn default() -> Self {
        Self {
            min_rpm: 0.0,
            max_rpm: default_max_rpm(),
            laser_mode: false,
            pwm_min_output: default_pwm_min_output(),
        }
    }
}

impl SpindleConfig {
    /// Check the range is usable (max > 0, min <= max).
    pub fn is_valid(&self) -> bool {
        self.max_rpm > 0.0 && self.min_rpm >= 0.0 && self.min_rpm <= self.max_rpm
    }
}
