//! Spindle duty mapping and output.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::SpindleConfig;
use crate::error::{PlannerError, Result};

/// Full-scale duty value.
pub const DUTY_MAX: u8 = 255;

/// Spindle command resolved to a PWM duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpindleDuty {
    /// Duty on a 0..=255 scale.
    pub duty: u8,
    /// Spindle runs counter-clockwise (M4).
    pub reverse: bool,
}

impl SpindleDuty {
    /// Spindle stopped.
    pub const OFF: Self = Self {
        duty: 0,
        reverse: false,
    };

    /// Check if the spindle is stopped.
    #[inline]
    pub fn is_off(self) -> bool {
        self.duty == 0
    }

    /// Duty with the direction folded into the sign.
    #[inline]
    pub fn signed(self) -> i16 {
        if self.reverse {
            -(self.duty as i16)
        } else {
            self.duty as i16
        }
    }
}

/// Map a signed spindle speed (RPM, negative = reverse) to a duty.
///
/// `scale` is the laser-mode power factor and only applies to reversed
/// spindles when laser mode is on. `override_percent` is `None` when
/// overrides do not apply. Running speeds are clamped to the configured
/// range and the duty never drops below `pwm_min_output`.
pub fn spindle_duty(
    rpm: i32,
    scale: f32,
    override_percent: Option<u8>,
    config: &SpindleConfig,
) -> SpindleDuty {
    if rpm == 0 {
        return SpindleDuty::OFF;
    }

    let reverse = rpm < 0;
    let mut speed = rpm.unsigned_abs() as f32;

    if config.laser_mode && reverse {
        speed *= scale;
    }

    if let Some(percent) = override_percent {
        if percent != 100 {
            speed *= 0.01 * percent as f32;
        }
    }

    let speed = speed.clamp(config.min_rpm, config.max_rpm);
    let duty = (DUTY_MAX as f32 * (speed / config.max_rpm)) as u8;

    SpindleDuty {
        duty: duty.max(config.pwm_min_output),
        reverse,
    }
}

/// Spindle PWM and direction pins.
pub struct SpindleOutput<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    pwm: PWM,
    dir: DIR,
    invert_direction: bool,
}

impl<PWM, DIR> SpindleOutput<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    /// Wrap the PWM channel and direction pin.
    pub fn new(pwm: PWM, dir: DIR, invert_direction: bool) -> Self {
        Self {
            pwm,
            dir,
            invert_direction,
        }
    }

    /// Write a duty and direction to the pins.
    ///
    /// The direction pin is left alone while the spindle is off.
    pub fn apply(&mut self, duty: SpindleDuty) -> Result<()> {
        if !duty.is_off() {
            let high = duty.reverse != self.invert_direction;
            let result = if high {
                self.dir.set_high()
            } else {
                self.dir.set_low()
            };
            result.map_err(|_| PlannerError::PinError)?;
        }

        self.pwm
            .set_duty_cycle_fraction(duty.duty as u16, DUTY_MAX as u16)
            .map_err(|_| PlannerError::PinError)?;
        Ok(())
    }

    /// Release the pins.
    pub fn release(self) -> (PWM, DIR) {
        (self.pwm, self.dir)
    }
}
