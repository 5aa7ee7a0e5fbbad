//! Motion blocks stored in the planner buffer.

use crate::tools::CoolantMask;

/// A planned linear move (or a zero-step placeholder for dwells and tool changes).
///
/// Speeds are squared and expressed in dominant-actuator steps per second;
/// acceleration is in steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionBlock<const N: usize> {
    /// Source line number, when line tracking is enabled.
    pub line: Option<u32>,
    /// Bit `i` set when actuator `i` moves in the negative direction.
    pub dirbits: u8,
    /// Unsigned step count per actuator.
    pub steps: [u32; N],
    /// Step count of the dominant actuator.
    pub total_steps: u32,
    /// Index of the dominant actuator.
    pub main_stepper: u8,
    /// Squared entry speed assigned by recalculation.
    pub entry_feed_sqr: f32,
    /// Squared junction cap on the entry speed.
    pub entry_max_feed_sqr: f32,
    /// Squared requested cruise speed.
    pub feed_sqr: f32,
    /// Squared machine-limited speed for this direction.
    pub rapid_feed_sqr: f32,
    /// Acceleration limit for this direction.
    pub acceleration: f32,
    /// Dwell duration in milliseconds.
    pub dwell_ms: u16,
    /// Signed spindle speed (negative = reverse).
    pub spindle: i32,
    /// Coolant channels active during this block.
    pub coolant: CoolantMask,
    /// Move only takes up mechanical backlash.
    pub backlash_comp: bool,
    /// Runtime feed/rapid/spindle overrides apply to this block.
    pub feed_override: bool,
    /// Entry speed is final and will not be revisited.
    pub optimal: bool,
}

impl<const N: usize> Default for MotionBlock<N> {
    fn default() -> Self {
        Self {
            line: None,
            dirbits: 0,
            steps: [0; N],
            total_steps: 0,
            main_stepper: 0,
            entry_feed_sqr: 0.0,
            entry_max_feed_sqr: 0.0,
            feed_sqr: 0.0,
            rapid_feed_sqr: 0.0,
            acceleration: 0.0,
            dwell_ms: 0,
            spindle: 0,
            coolant: CoolantMask::NONE,
            backlash_comp: false,
            feed_override: true,
            optimal: false,
        }
    }
}

impl<const N: usize> MotionBlock<N> {
    /// Check if this block pauses motion.
    #[inline]
    pub fn is_dwell(&self) -> bool {
        self.dwell_ms != 0
    }

    /// Squared speed change available over the whole block: `2·a·d`.
    #[inline]
    pub fn speed_change_sqr(&self) -> f32 {
        2.0 * self.total_steps as f32 * self.acceleration
    }
}
