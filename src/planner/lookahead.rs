//! Look-ahead planner.
//!
//! Owns the block buffer, override state and committed tool/position state.
//! The motion-control layer is the single producer ([`Planner::add_line`],
//! override mutators); the interpolator is the single consumer
//! ([`Planner::block`], [`Planner::discard_block`] and the speed getters).

use crate::config::units::MIN_SEC_MULT;
use crate::config::{validate_settings, JunctionVectors, PlannerSettings};
use crate::error::{PlannerError, Result};
use crate::motion::BlockProfile;
use crate::tools::{self, CoolantMask, SpindleDuty};

use super::block::MotionBlock;
use super::buffer::BlockRing;
use super::hooks::InterpolatorHooks;
use super::junction::{self, DirectionVector};
use super::overrides::{OverrideSnapshot, Overrides};
use super::position::StepPosition;
use super::recalc::recalculate;
use super::request::{MotionMode, MotionRequest};

/// Default number of buffered blocks.
pub const DEFAULT_CAPACITY: usize = 15;

/// Look-ahead trajectory planner for `N` actuators with `CAP` buffer slots.
pub struct Planner<H, const N: usize, const CAP: usize = DEFAULT_CAPACITY>
where
    H: InterpolatorHooks<N>,
{
    settings: PlannerSettings,
    ring: BlockRing<MotionBlock<N>, CAP>,
    overrides: Overrides,
    position: StepPosition<N>,
    /// Direction of the newest moving block.
    last_dir: DirectionVector<N>,
    spindle: i32,
    coolant: CoolantMask,
    hooks: H,
}

impl<H, const N: usize, const CAP: usize> Planner<H, N, CAP>
where
    H: InterpolatorHooks<N>,
{
    /// Create a planner with an empty buffer and overrides at 100%.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings fail validation, or
    /// `PlannerError::ActuatorCountMismatch` if they do not describe exactly
    /// `N` actuators.
    pub fn new(settings: PlannerSettings, hooks: H) -> Result<Self> {
        validate_settings(&settings)?;
        let found = settings.actuator_count();
        if found != N {
            return Err(PlannerError::ActuatorCountMismatch { expected: N, found }.into());
        }

        let overrides = Overrides::new(settings.overrides.clone());
        info!("planner ready: {} actuators, {} slots", N, CAP);

        Ok(Self {
            settings,
            ring: BlockRing::new(),
            overrides,
            position: StepPosition::default(),
            last_dir: DirectionVector::default(),
            spindle: 0,
            coolant: CoolantMask::NONE,
            hooks,
        })
    }

    /// Settings the planner was built with.
    #[inline]
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Interpolator hooks.
    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable interpolator hooks.
    #[inline]
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Number of buffered blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check if no blocks are buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Check if the buffer has no free slot.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Plan a move and append it to the buffer.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::BufferFull` without touching any state when no
    /// slot is free, and `PlannerError::InvalidFeed` when a move that travels
    /// has a feed that is not positive.
    pub fn add_line(&mut self, request: &MotionRequest<N>) -> Result<()> {
        if self.ring.is_full() {
            warn!("planner buffer full, move rejected");
            return Err(PlannerError::BufferFull.into());
        }

        let total_steps = request.total_steps();
        let moving = !request.mode.contains(MotionMode::NO_MOTION) && total_steps != 0;
        if moving && !(request.feed > 0.0) {
            warn!("move with non-positive feed rejected");
            return Err(PlannerError::InvalidFeed.into());
        }

        let caps = self.settings.capabilities;
        let was_empty = self.ring.is_empty();
        let prev = self.ring.prev(self.ring.write_index());

        let mut block = MotionBlock::<N> {
            dwell_ms: request.dwell_ms,
            feed_override: request.feed_override,
            ..Default::default()
        };
        if caps.spindle {
            block.spindle = request.spindle;
            self.spindle = request.spindle;
        }
        if caps.coolant {
            block.coolant = request.coolant;
            self.coolant = request.coolant;
        }
        if caps.line_numbers {
            block.line = request.line;
        }
        if caps.backlash_compensation && request.mode.contains(MotionMode::BACKLASH_COMPENSATION) {
            block.backlash_comp = true;
        }

        if !moving {
            *self.ring.pending_mut() = block;
            self.ring.advance_write()?;
            trace!("add_line: placeholder, dwell {} ms", request.dwell_ms);
            return Ok(());
        }

        let mut rapid = f32::MAX;
        let mut acceleration = f32::MAX;
        for (i, (steps, actuator)) in request.steps.iter().zip(self.settings.actuators.iter()).enumerate() {
            block.steps[i] = steps.unsigned_abs();
            if *steps == 0 {
                continue;
            }
            let distance = steps.unsigned_abs() as f32;
            rapid = rapid.min(actuator.max_step_rate() / distance);
            acceleration = acceleration.min(actuator.max_step_acceleration() / distance);
        }

        let total = total_steps as f32;
        let rapid = rapid * MIN_SEC_MULT * total;
        let feed = (request.feed * MIN_SEC_MULT).min(rapid);

        block.total_steps = total_steps;
        block.main_stepper = request.main_stepper();
        block.dirbits = request.dirbits();
        block.acceleration = acceleration * total;
        block.feed_sqr = feed * feed;
        block.rapid_feed_sqr = rapid * rapid;

        let dir = match (caps.junction_vectors, request.direction) {
            (JunctionVectors::PerAxis, Some(direction)) => DirectionVector::normalized(direction),
            _ => DirectionVector::from_steps(&request.steps),
        };
        let mut cos_theta = dir.dot(&self.last_dir);
        self.last_dir = dir;

        if was_empty || (caps.cold_start && self.ring.slot(prev).dirbits != block.dirbits) {
            cos_theta = 0.0;
        }
        let cos_theta = cos_theta.clamp(0.0, 1.0);

        let full_stop = request
            .mode
            .intersects(MotionMode::EXACT_STOP | MotionMode::BACKLASH_COMPENSATION);

        if cos_theta > 0.0 && !full_stop {
            let relaxation = if request.mode.contains(MotionMode::CONTINUOUS) {
                self.settings.junction.continuous_angle_factor
            } else {
                0.0
            };
            block.entry_max_feed_sqr = junction::max_entry_feed_sqr(
                cos_theta,
                block.feed_sqr,
                self.ring.slot(prev).feed_sqr,
                relaxation,
            );
            *self.ring.pending_mut() = block;

            let last = self.ring.write_index();
            if recalculate(&mut self.ring, last) {
                self.hooks.update();
            }
        } else {
            *self.ring.pending_mut() = block;
        }

        self.ring.advance_write()?;
        if let Some(target) = request.target {
            self.position.set(target);
        }

        trace!(
            "add_line: {} steps, feed_sqr {}, entry_max_sqr {}",
            total_steps,
            block.feed_sqr,
            block.entry_max_feed_sqr
        );
        Ok(())
    }

    /// Re-run recalculation over the buffered blocks.
    ///
    /// Produces no change when nothing was added since the last pass.
    pub fn recalculate(&mut self) {
        if self.ring.is_empty() {
            return;
        }
        let last = self.ring.prev(self.ring.write_index());
        if recalculate(&mut self.ring, last) {
            self.hooks.update();
        }
    }

    /// Oldest (executing) block.
    #[inline]
    pub fn block(&self) -> Option<&MotionBlock<N>> {
        self.ring.head()
    }

    /// Buffered blocks, oldest first.
    pub fn blocks(&self) -> impl Iterator<Item = &MotionBlock<N>> + '_ {
        self.ring.iter()
    }

    /// Squared speed the executing block must end at.
    ///
    /// This is the next block's entry speed with the feed override applied,
    /// capped by its overridden rapid ceiling; 0 with fewer than two blocks.
    pub fn block_exit_speed_sqr(&self) -> f32 {
        match self.ring.second() {
            Some(next) => {
                let exit = self
                    .overrides
                    .feed_scaled_sqr(next.entry_feed_sqr, next.feed_override);
                let rapid = self
                    .overrides
                    .rapid_scaled_sqr(next.rapid_feed_sqr, next.feed_override);
                exit.min(rapid)
            }
            None => 0.0,
        }
    }

    /// Squared peak speed the executing block can reach.
    ///
    /// Shares the block's distance between acceleration from the entry speed
    /// and deceleration to the exit speed, capped by the overridden feed and
    /// rapid ceiling. Returns 0 when the buffer is empty.
    pub fn block_top_speed_sqr(&self) -> f32 {
        let Some(block) = self.ring.head() else {
            return 0.0;
        };
        let entry = block.entry_feed_sqr;
        let exit = self.block_exit_speed_sqr();
        let change = block.speed_change_sqr();

        // a block that cannot shed its entry speed in time cruises at entry
        let reachable = if change >= (exit - entry).abs() {
            0.5 * (entry + exit + change)
        } else if exit > entry {
            entry + change
        } else {
            entry
        };

        let target = self
            .overrides
            .feed_scaled_sqr(block.feed_sqr, block.feed_override)
            .min(self.overrides.rapid_scaled_sqr(block.rapid_feed_sqr, block.feed_override));
        reachable.min(target)
    }

    /// Trapezoid for the executing block, or `None` when the buffer is empty.
    pub fn block_profile(&self) -> Option<BlockProfile> {
        let block = self.ring.head()?;
        Some(BlockProfile::from_speeds(
            block.total_steps,
            block.acceleration,
            block.entry_feed_sqr,
            self.block_top_speed_sqr(),
            self.block_exit_speed_sqr(),
        ))
    }

    /// Release the executing block once its motion has finished.
    ///
    /// Returns `false` if the buffer was already empty.
    pub fn discard_block(&mut self) -> bool {
        let released = self.ring.advance_read();
        if released {
            trace!("discard_block: {} left", self.ring.len());
        }
        released
    }

    /// Signed spindle speed of the executing block, or the committed speed
    /// when the buffer is empty.
    pub fn spindle_speed(&self) -> i32 {
        self.ring.head().map_or(self.spindle, |b| b.spindle)
    }

    /// Spindle duty for the executing block.
    ///
    /// `scale` is the laser power factor, applied only in laser mode with the
    /// spindle reversed.
    pub fn spindle_duty(&self, scale: f32) -> SpindleDuty {
        let allows = self.ring.head().map_or(true, |b| b.feed_override);
        tools::spindle_duty(
            self.spindle_speed(),
            scale,
            self.overrides.spindle_percent(allows),
            &self.settings.spindle,
        )
    }

    /// Spindle speed of the newest planned block.
    #[inline]
    pub fn previous_spindle_speed(&self) -> i32 {
        self.spindle
    }

    /// Coolant channels of the executing block with the override toggles applied.
    pub fn coolant(&self) -> CoolantMask {
        let coolant = self.ring.head().map_or(self.coolant, |b| b.coolant);
        if self.overrides.is_enabled() {
            coolant ^ self.overrides.coolant()
        } else {
            coolant
        }
    }

    /// Coolant channels of the newest planned block.
    #[inline]
    pub fn previous_coolant(&self) -> CoolantMask {
        self.coolant
    }

    /// Overwrite the committed spindle and coolant state.
    pub fn sync_tools(&mut self, spindle: i32, coolant: CoolantMask) {
        self.spindle = spindle;
        self.coolant = coolant;
    }

    /// Override state.
    #[inline]
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Check if overrides are enabled.
    #[inline]
    pub fn overrides_enabled(&self) -> bool {
        self.overrides.is_enabled()
    }

    /// Flip the overrides switch and return the new state.
    pub fn toggle_overrides(&mut self) -> bool {
        let enabled = self.overrides.toggle_enabled();
        self.hooks.update();
        info!("overrides enabled: {}", enabled);
        enabled
    }

    /// Adjust the feed override by a signed percent delta.
    pub fn feed_override_inc(&mut self, delta: i8) {
        if self.overrides.feed_inc(delta) {
            self.hooks.update();
        }
    }

    /// Restore the feed override to 100%.
    pub fn feed_override_reset(&mut self) {
        if self.overrides.feed_reset() {
            self.hooks.update();
        }
    }

    /// Select a rapid override percent.
    pub fn set_rapid_override(&mut self, percent: u8) {
        if self.overrides.set_rapid(percent) {
            self.hooks.update();
        }
    }

    /// Adjust the rapid override by a signed percent delta.
    pub fn rapid_override_inc(&mut self, delta: i8) {
        if self.overrides.rapid_inc(delta) {
            self.hooks.update();
        }
    }

    /// Restore the rapid override to 100%.
    pub fn rapid_override_reset(&mut self) {
        if self.overrides.rapid_reset() {
            self.hooks.update();
        }
    }

    /// Adjust the spindle override by a signed percent delta.
    pub fn spindle_override_inc(&mut self, delta: i8) {
        self.overrides.spindle_inc(delta);
    }

    /// Step the feed override by the configured coarse increment.
    pub fn feed_override_coarse(&mut self, up: bool) {
        self.feed_override_inc(self.overrides.increment(true, up));
    }

    /// Step the feed override by the configured fine increment.
    pub fn feed_override_fine(&mut self, up: bool) {
        self.feed_override_inc(self.overrides.increment(false, up));
    }

    /// Step the spindle override by the configured coarse increment.
    pub fn spindle_override_coarse(&mut self, up: bool) {
        self.spindle_override_inc(self.overrides.increment(true, up));
    }

    /// Step the spindle override by the configured fine increment.
    pub fn spindle_override_fine(&mut self, up: bool) {
        self.spindle_override_inc(self.overrides.increment(false, up));
    }

    /// Restore the spindle override to 100%.
    pub fn spindle_override_reset(&mut self) {
        self.overrides.spindle_reset();
    }

    /// Toggle coolant channels and return the resulting toggle mask.
    pub fn coolant_override_toggle(&mut self, mask: CoolantMask) -> CoolantMask {
        self.overrides.coolant_toggle(mask)
    }

    /// Clear the coolant toggles and the committed coolant state.
    pub fn coolant_override_reset(&mut self) {
        self.coolant = CoolantMask::NONE;
        self.overrides.coolant_reset();
    }

    /// Throttled override snapshot for status reports.
    #[inline]
    pub fn poll_override_report(&mut self) -> Option<OverrideSnapshot> {
        self.overrides.poll_report()
    }

    /// Position at the end of the newest planned move.
    #[inline]
    pub fn position(&self) -> [i32; N] {
        self.position.steps()
    }

    /// Overwrite the committed position.
    #[inline]
    pub fn set_position(&mut self, steps: [i32; N]) {
        self.position.set(steps);
    }

    /// Take the committed position from the interpolator.
    pub fn resync_position(&mut self) {
        self.position.set(self.hooks.rt_position());
    }

    /// Drop every buffered block and resynchronize with the interpolator.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.spindle = 0;
        self.coolant = CoolantMask::NONE;
        self.resync_position();
        self.hooks.resync();
        info!("planner cleared");
    }
}
