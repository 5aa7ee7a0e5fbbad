//! Per-block speed profile.
//!
//! Turns the entry, top and exit speeds reported by the planner into step
//! counts for each phase of a trapezoid so an interpolator can follow it.

use libm::sqrtf;

/// Current phase of block execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Speeding up toward the top speed.
    Accelerating,
    /// Moving at constant top speed.
    Cruising,
    /// Slowing toward the top speed or the exit speed.
    Decelerating,
    /// Block complete.
    Complete,
}

/// Trapezoidal profile of one planned block.
///
/// Speeds are squared, in steps per second; acceleration is in steps per
/// second squared. When an override drops the top speed below the entry
/// speed the first ramp slows down instead of speeding up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockProfile {
    /// Total steps of the dominant actuator.
    pub total_steps: u32,

    /// Acceleration rate in steps/sec².
    pub acceleration: f32,

    /// Squared entry speed.
    pub entry_sqr: f32,

    /// Squared top speed.
    pub top_sqr: f32,

    /// Squared exit speed.
    pub exit_sqr: f32,

    /// Steps in the first ramp (entry to top).
    pub accel_steps: u32,

    /// Steps at top speed.
    pub cruise_steps: u32,

    /// Steps in the final ramp (top to exit).
    pub decel_steps: u32,
}

impl BlockProfile {
    /// Build a profile from planner speeds.
    ///
    /// Ramps are truncated so the phases never exceed `total_steps`.
    pub fn from_speeds(
        total_steps: u32,
        acceleration: f32,
        entry_sqr: f32,
        top_sqr: f32,
        exit_sqr: f32,
    ) -> Self {
        if total_steps == 0 || !(acceleration > 0.0) {
            return Self {
                total_steps,
                ..Self::zero()
            };
        }

        let entry_sqr = entry_sqr.max(0.0);
        let exit_sqr = exit_sqr.max(0.0);
        let top_sqr = top_sqr.max(exit_sqr).max(0.0);

        let two_a = 2.0 * acceleration;
        let accel_steps = ((top_sqr - entry_sqr).abs() / two_a) as u32;
        let decel_steps = ((top_sqr - exit_sqr) / two_a) as u32;

        let accel_steps = accel_steps.min(total_steps);
        let decel_steps = decel_steps.min(total_steps - accel_steps);
        let cruise_steps = total_steps - accel_steps - decel_steps;

        Self {
            total_steps,
            acceleration,
            entry_sqr,
            top_sqr,
            exit_sqr,
            accel_steps,
            cruise_steps,
            decel_steps,
        }
    }

    /// Create a zero-length profile (no motion).
    pub fn zero() -> Self {
        Self {
            total_steps: 0,
            acceleration: 0.0,
            entry_sqr: 0.0,
            top_sqr: 0.0,
            exit_sqr: 0.0,
            accel_steps: 0,
            cruise_steps: 0,
            decel_steps: 0,
        }
    }

    /// Check if this is a zero-length profile.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// Check if the first ramp slows down.
    #[inline]
    pub fn enters_above_top(&self) -> bool {
        self.entry_sqr > self.top_sqr
    }

    /// Get the phase at a given step number.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            MotionPhase::Complete
        } else if step < self.accel_steps {
            if self.enters_above_top() {
                MotionPhase::Decelerating
            } else {
                MotionPhase::Accelerating
            }
        } else if step < self.accel_steps + self.cruise_steps {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Squared speed at a given step number.
    pub fn speed_sqr_at(&self, step: u32) -> f32 {
        let two_a = 2.0 * self.acceleration;
        match self.phase_at(step) {
            MotionPhase::Complete => self.exit_sqr,
            MotionPhase::Cruising => self.top_sqr,
            _ if step < self.accel_steps => {
                let delta = two_a * step as f32;
                if self.enters_above_top() {
                    (self.entry_sqr - delta).max(self.top_sqr)
                } else {
                    (self.entry_sqr + delta).min(self.top_sqr)
                }
            }
            _ => {
                let remaining = self.total_steps - step;
                (self.exit_sqr + two_a * remaining as f32).min(self.top_sqr)
            }
        }
    }

    /// Estimate the time to run the block in seconds.
    ///
    /// Each phase is timed at its average speed.
    pub fn estimated_duration_secs(&self) -> f32 {
        if self.total_steps == 0 {
            return 0.0;
        }

        let entry = sqrtf(self.entry_sqr);
        let top = sqrtf(self.top_sqr);
        let exit = sqrtf(self.exit_sqr);

        phase_time(self.accel_steps, 0.5 * (entry + top))
            + phase_time(self.cruise_steps, top)
            + phase_time(self.decel_steps, 0.5 * (top + exit))
    }
}

fn phase_time(steps: u32, speed: f32) -> f32 {
    if steps == 0 || !(speed > 0.0) {
        0.0
    } else {
        steps as f32 / speed
    }
}
