//! Settings validation.

use crate::error::{ConfigError, Error, Result};

use super::{ActuatorConfig, OverrideLimits, PlannerSettings};

/// Validate planner settings.
///
/// Checks:
/// - At least one actuator, each with positive resolution, feed and acceleration
/// - Spindle range is usable
/// - Override limits bracket 100%
/// - Continuous angle factor lies within [0, 1)
pub fn validate_settings(settings: &PlannerSettings) -> Result<()> {
    if settings.actuators.is_empty() {
        return Err(Error::Config(ConfigError::NoActuators));
    }

    for (index, actuator) in settings.actuators.iter().enumerate() {
        validate_actuator(index, actuator)?;
    }

    if !settings.spindle.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSpindleRange {
            min: settings.spindle.min_rpm,
            max: settings.spindle.max_rpm,
        }));
    }

    validate_overrides(&settings.overrides)?;

    let factor = settings.junction.continuous_angle_factor;
    if !(0.0..1.0).contains(&factor) {
        return Err(Error::Config(ConfigError::InvalidAngleFactor(factor)));
    }

    Ok(())
}

fn validate_actuator(index: usize, actuator: &ActuatorConfig) -> Result<()> {
    // NaN fails every comparison, so test for the positive case
    if !(actuator.steps_per_mm.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm {
            actuator: index,
            value: actuator.steps_per_mm.0,
        }));
    }

    if !(actuator.max_feed_rate.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidMaxFeedRate {
            actuator: index,
            value: actuator.max_feed_rate.0,
        }));
    }

    if !(actuator.acceleration.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidAcceleration {
            actuator: index,
            value: actuator.acceleration.0,
        }));
    }

    Ok(())
}

fn validate_overrides(limits: &OverrideLimits) -> Result<()> {
    for (min, max) in [
        (limits.feed_min, limits.feed_max),
        (limits.spindle_min, limits.spindle_max),
    ] {
        if min == 0 || min > 100 || max < 100 {
            return Err(Error::Config(ConfigError::InvalidOverrideLimits { min, max }));
        }
    }

    let rapid_min = limits.rapid_min();
    if rapid_min == 0 || limits.rapid_presets.iter().any(|&p| p > 100) {
        return Err(Error::Config(ConfigError::InvalidOverrideLimits {
            min: rapid_min,
            max: 100,
        }));
    }

    Ok(())
}
