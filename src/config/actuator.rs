//! Actuator configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Acceleration, FeedRate, StepsPerMm};

/// Per-actuator machine limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ActuatorConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default)]
    pub name: String<32>,

    /// Resolution in steps per millimeter.
    pub steps_per_mm: StepsPerMm,

    /// Maximum feed rate in millimeters per minute.
    #[serde(rename = "max_feed_rate_mm_per_min")]
    pub max_feed_rate: FeedRate,

    /// Maximum acceleration in millimeters per second squared.
    #[serde(rename = "acceleration_mm_per_sec2")]
    pub acceleration: Acceleration,
}

impl ActuatorConfig {
    /// Create an actuator configuration.
    pub fn new(
        name: &str,
        steps_per_mm: StepsPerMm,
        max_feed_rate: FeedRate,
        acceleration: Acceleration,
    ) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            steps_per_mm,
            max_feed_rate,
            acceleration,
        }
    }

    /// Maximum feed rate in steps per minute.
    pub fn max_step_rate(&self) -> f32 {
        self.max_feed_rate.value() * self.steps_per_mm.value()
    }

    /// Maximum acceleration in steps per second squared.
    pub fn max_step_acceleration(&self) -> f32 {
        self.acceleration.value() * self.steps_per_mm.value()
    }
}
