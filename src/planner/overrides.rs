//! Runtime feed, rapid, spindle and coolant overrides.
//!
//! Overrides never touch planned block data; they scale speeds at read time.

use crate::config::OverrideLimits;
use crate::tools::CoolantMask;

/// Percent value meaning "no override".
pub const OVERRIDE_NEUTRAL: u8 = 100;

/// Override values handed to a status reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OverrideSnapshot {
    /// Feed override percent.
    pub feed: u8,
    /// Rapid override percent.
    pub rapid: u8,
    /// Spindle override percent.
    pub spindle: u8,
}

/// Override state.
///
/// Increments and preset selection only take effect while overrides are
/// enabled; resets always apply. Mutators return `true` when a value that
/// feeds the planned speed profile changed.
#[derive(Debug, Clone)]
pub struct Overrides {
    feed: u8,
    rapid: u8,
    spindle: u8,
    coolant: CoolantMask,
    enabled: bool,
    report_countdown: u8,
    limits: OverrideLimits,
}

impl Overrides {
    /// Create overrides at 100% and enabled.
    pub fn new(limits: OverrideLimits) -> Self {
        Self {
            feed: OVERRIDE_NEUTRAL,
            rapid: OVERRIDE_NEUTRAL,
            spindle: OVERRIDE_NEUTRAL,
            coolant: CoolantMask::NONE,
            enabled: true,
            report_countdown: 0,
            limits,
        }
    }

    /// Feed override percent.
    pub fn feed(&self) -> u8 {
        self.feed
    }

    /// Rapid override percent.
    pub fn rapid(&self) -> u8 {
        self.rapid
    }

    /// Spindle override percent.
    pub fn spindle(&self) -> u8 {
        self.spindle
    }

    /// Coolant toggle mask.
    pub fn coolant(&self) -> CoolantMask {
        self.coolant
    }

    /// Check if overrides are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Configured limits.
    pub fn limits(&self) -> &OverrideLimits {
        &self.limits
    }

    /// Flip the global enable switch.
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.report_countdown = 0;
        self.enabled
    }

    /// Add a signed delta to the feed override.
    pub fn feed_inc(&mut self, delta: i8) -> bool {
        let value = step(self.feed, delta, self.limits.feed_min, self.limits.feed_max);
        self.apply_enabled(value, |o| &mut o.feed)
    }

    /// Restore the feed override to 100%.
    pub fn feed_reset(&mut self) -> bool {
        let changed = self.enabled && self.feed != OVERRIDE_NEUTRAL;
        self.feed = OVERRIDE_NEUTRAL;
        self.report_countdown = 0;
        changed
    }

    /// Select a rapid override percent, clamped to the configured presets.
    pub fn set_rapid(&mut self, percent: u8) -> bool {
        let value = percent.clamp(self.limits.rapid_min(), OVERRIDE_NEUTRAL);
        self.apply_enabled(value, |o| &mut o.rapid)
    }

    /// Add a signed delta to the rapid override.
    pub fn rapid_inc(&mut self, delta: i8) -> bool {
        let value = step(self.rapid, delta, self.limits.rapid_min(), OVERRIDE_NEUTRAL);
        self.apply_enabled(value, |o| &mut o.rapid)
    }

    /// Restore the rapid override to 100%.
    pub fn rapid_reset(&mut self) -> bool {
        let changed = self.enabled && self.rapid != OVERRIDE_NEUTRAL;
        self.rapid = OVERRIDE_NEUTRAL;
        self.report_countdown = 0;
        changed
    }

    /// Add a signed delta to the spindle override.
    pub fn spindle_inc(&mut self, delta: i8) -> bool {
        let value = step(self.spindle, delta, self.limits.spindle_min, self.limits.spindle_max);
        self.apply_enabled(value, |o| &mut o.spindle)
    }

    /// Signed coarse or fine increment from the configured step sizes.
    pub fn increment(&self, coarse: bool, up: bool) -> i8 {
        let size = if coarse { self.limits.coarse_step } else { self.limits.fine_step };
        let size = size.min(i8::MAX as u8) as i8;
        if up {
            size
        } else {
            -size
        }
    }

    /// Restore the spindle override to 100%.
    pub fn spindle_reset(&mut self) {
        self.spindle = OVERRIDE_NEUTRAL;
        self.report_countdown = 0;
    }

    /// XOR channels into the coolant toggle mask and return the new mask.
    pub fn coolant_toggle(&mut self, mask: CoolantMask) -> CoolantMask {
        self.coolant = self.coolant ^ mask;
        self.coolant
    }

    /// Clear the coolant toggle mask.
    pub fn coolant_reset(&mut self) {
        self.coolant = CoolantMask::NONE;
    }

    /// Squared feed after applying the feed override.
    pub fn feed_scaled_sqr(&self, feed_sqr: f32, block_allows: bool) -> f32 {
        self.scaled_sqr(feed_sqr, self.feed, block_allows)
    }

    /// Squared rapid ceiling after applying the rapid override.
    pub fn rapid_scaled_sqr(&self, rapid_sqr: f32, block_allows: bool) -> f32 {
        self.scaled_sqr(rapid_sqr, self.rapid, block_allows)
    }

    /// Spindle override percent to apply, if any.
    pub fn spindle_percent(&self, block_allows: bool) -> Option<u8> {
        (self.enabled && block_allows).then_some(self.spindle)
    }

    /// Release a snapshot once every `report_interval` polls.
    ///
    /// Any override change resets the throttle so the next poll reports.
    pub fn poll_report(&mut self) -> Option<OverrideSnapshot> {
        if self.report_countdown == 0 {
            self.report_countdown = self.limits.report_interval;
            return Some(self.snapshot());
        }
        self.report_countdown -= 1;
        None
    }

    /// Current override values.
    pub fn snapshot(&self) -> OverrideSnapshot {
        OverrideSnapshot {
            feed: self.feed,
            rapid: self.rapid,
            spindle: self.spindle,
        }
    }

    fn scaled_sqr(&self, value_sqr: f32, percent: u8, block_allows: bool) -> f32 {
        if self.enabled && block_allows {
            let scale = percent as f32 * 0.01;
            value_sqr * scale * scale
        } else {
            value_sqr
        }
    }

    fn apply_enabled(&mut self, value: u8, field: impl FnOnce(&mut Self) -> &mut u8) -> bool {
        if !self.enabled {
            return false;
        }
        let slot = field(self);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.report_countdown = 0;
        debug!("override changed to {}", value);
        true
    }
}

fn step(current: u8, delta: i8, min: u8, max: u8) -> u8 {
    let value = (current as i16 + delta as i16).clamp(min as i16, max as i16);
    value as u8
}
