//! Incoming move requests from the motion-control layer.

use core::ops::BitOr;

use crate::tools::CoolantMask;

/// Motion-mode flags carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionMode(u8);

impl MotionMode {
    /// Plain feed move.
    pub const FEED: Self = Self(0);
    /// No travel: placeholder for dwells and tool updates.
    pub const NO_MOTION: Self = Self(1);
    /// Backlash take-up move (always stops at its junction).
    pub const BACKLASH_COMPENSATION: Self = Self(2);
    /// Exact stop (G61.1): full stop at the junction.
    pub const EXACT_STOP: Self = Self(4);
    /// Continuous path blending (G64).
    pub const CONTINUOUS: Self = Self(8);

    /// Get the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every flag in `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether any flag in `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for MotionMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// A move handed to [`Planner::add_line`](super::Planner::add_line).
///
/// `feed` is the requested speed of the dominant actuator in steps per
/// minute. Step counts are signed; direction bits are derived from the signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRequest<const N: usize> {
    /// Absolute target; `None` leaves the committed position unchanged.
    pub target: Option<[i32; N]>,
    /// Signed per-actuator step counts.
    pub steps: [i32; N],
    /// Cartesian unit direction, used for per-axis junction vectors.
    pub direction: Option<[f32; N]>,
    /// Requested feed in dominant-actuator steps per minute.
    pub feed: f32,
    /// Motion-mode flags.
    pub mode: MotionMode,
    /// Signed spindle speed.
    pub spindle: i32,
    /// Coolant channels.
    pub coolant: CoolantMask,
    /// Dwell duration in milliseconds.
    pub dwell_ms: u16,
    /// Source line number.
    pub line: Option<u32>,
    /// Whether runtime overrides may scale this move.
    pub feed_override: bool,
}

impl<const N: usize> MotionRequest<N> {
    /// A linear move with the given signed step counts.
    pub fn line(steps: [i32; N]) -> Self {
        Self {
            target: None,
            steps,
            direction: None,
            feed: 0.0,
            mode: MotionMode::FEED,
            spindle: 0,
            coolant: CoolantMask::NONE,
            dwell_ms: 0,
            line: None,
            feed_override: true,
        }
    }

    /// A linear move from `from` to `to`, recording `to` as the new position.
    pub fn between(from: [i32; N], to: [i32; N]) -> Self {
        let mut steps = [0; N];
        for (delta, (a, b)) in steps.iter_mut().zip(from.iter().zip(to.iter())) {
            *delta = b - a;
        }
        Self::line(steps).target(to)
    }

    /// A motionless pause.
    pub fn dwell(dwell_ms: u16) -> Self {
        let mut request = Self::line([0; N]).mode(MotionMode::NO_MOTION);
        request.dwell_ms = dwell_ms;
        request
    }

    /// A motionless spindle/coolant update.
    pub fn tools(spindle: i32, coolant: CoolantMask) -> Self {
        Self::line([0; N])
            .mode(MotionMode::NO_MOTION)
            .spindle(spindle)
            .coolant(coolant)
    }

    /// Set the requested feed (dominant-actuator steps per minute).
    pub fn feed(mut self, feed: f32) -> Self {
        self.feed = feed;
        self
    }

    /// Set the absolute target position.
    pub fn target(mut self, target: [i32; N]) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the cartesian direction vector.
    pub fn direction(mut self, direction: [f32; N]) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Add motion-mode flags.
    pub fn mode(mut self, mode: MotionMode) -> Self {
        self.mode = self.mode | mode;
        self
    }

    /// Set the spindle speed.
    pub fn spindle(mut self, rpm: i32) -> Self {
        self.spindle = rpm;
        self
    }

    /// Set the coolant channels.
    pub fn coolant(mut self, coolant: CoolantMask) -> Self {
        self.coolant = coolant;
        self
    }

    /// Attach a source line number.
    pub fn line_number(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Exclude this move from runtime overrides.
    pub fn without_overrides(mut self) -> Self {
        self.feed_override = false;
        self
    }

    /// Step count of the dominant actuator.
    pub fn total_steps(&self) -> u32 {
        self.steps.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
    }

    /// Index of the dominant actuator (first on ties).
    pub fn main_stepper(&self) -> u8 {
        let mut main = 0;
        let mut best = 0;
        for (i, s) in self.steps.iter().enumerate() {
            if s.unsigned_abs() > best {
                best = s.unsigned_abs();
                main = i;
            }
        }
        main as u8
    }

    /// Direction bits derived from step signs.
    pub fn dirbits(&self) -> u8 {
        self.steps
            .iter()
            .enumerate()
            .take(8)
            .filter(|(_, s)| **s < 0)
            .fold(0u8, |bits, (i, _)| bits | (1 << i))
    }
}
