//! Integration tests for cnc-planner.
//!
//! These tests drive the planner from a TOML machine description through
//! complete motion scenarios the way a motion-control layer and an
//! interpolator would.

use cnc_planner::config::parse_settings;
use cnc_planner::error::{ConfigError, Error, PlannerError};
use cnc_planner::{
    CoolantMask, InterpolatorHooks, MotionMode, MotionPhase, MotionRequest, NoopHooks, Planner,
    PlannerSettings,
};

// =============================================================================
// Test configuration data
// =============================================================================

/// X/Y: 100 steps/mm, 6000 mm/min, 100 mm/s². Z: 400 steps/mm, 600 mm/min, 50 mm/s².
const MILL_CONFIG: &str = r#"
[[actuators]]
name = "X"
steps_per_mm = 100.0
max_feed_rate_mm_per_min = 6000.0
acceleration_mm_per_sec2 = 100.0

[[actuators]]
name = "Y"
steps_per_mm = 100.0
max_feed_rate_mm_per_min = 6000.0
acceleration_mm_per_sec2 = 100.0

[[actuators]]
name = "Z"
steps_per_mm = 400.0
max_feed_rate_mm_per_min = 600.0
acceleration_mm_per_sec2 = 50.0

[spindle]
min_rpm = 100.0
max_rpm = 10000.0

[capabilities]
line_numbers = true
"#;

const LASER_CONFIG: &str = r#"
[[actuators]]
name = "X"
steps_per_mm = 80.0
max_feed_rate_mm_per_min = 3000.0
acceleration_mm_per_sec2 = 200.0

[[actuators]]
name = "Y"
steps_per_mm = 80.0
max_feed_rate_mm_per_min = 3000.0
acceleration_mm_per_sec2 = 200.0

[[actuators]]
name = "Z"
steps_per_mm = 400.0
max_feed_rate_mm_per_min = 600.0
acceleration_mm_per_sec2 = 50.0

[spindle]
max_rpm = 1000.0
laser_mode = true

[capabilities]
junction_vectors = "per_axis"
"#;

/// 2000 steps/s on the dominant actuator.
const FEED: f32 = 120_000.0;
const FEED_SQR: f32 = 4.0e6;

fn mill_settings() -> PlannerSettings {
    parse_settings(MILL_CONFIG).expect("mill config should parse")
}

fn mill() -> Planner<NoopHooks, 3, 8> {
    Planner::new(mill_settings(), NoopHooks).expect("planner should build")
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * b.abs().max(1.0)
}

/// Interpolator stand-in recording planner callbacks.
#[derive(Default)]
struct RecordingInterpolator {
    updates: usize,
    resyncs: usize,
    position: [i32; 3],
}

impl InterpolatorHooks<3> for RecordingInterpolator {
    fn update(&mut self) {
        self.updates += 1;
    }

    fn rt_position(&self) -> [i32; 3] {
        self.position
    }

    fn resync(&mut self) {
        self.resyncs += 1;
    }
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_settings_build_planner() {
    let settings = mill_settings();
    assert_eq!(settings.actuator_count(), 3);
    assert!(settings.capabilities.line_numbers);
    assert!(settings.capabilities.spindle);

    let planner = mill();
    assert!(planner.is_empty());
    assert!(planner.overrides_enabled());
    assert_eq!(planner.position(), [0, 0, 0]);
}

#[test]
fn test_settings_rejects_invalid_toml() {
    let result = parse_settings("[[actuators]]\nname = 3");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

#[test]
fn test_settings_rejects_zero_acceleration() {
    let toml = MILL_CONFIG.replace("acceleration_mm_per_sec2 = 50.0", "acceleration_mm_per_sec2 = 0.0");
    let result = parse_settings(&toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidAcceleration { actuator: 2, .. }))
    ));
}

#[test]
fn test_planner_rejects_wrong_actuator_count() {
    let result = Planner::<NoopHooks, 2>::new(mill_settings(), NoopHooks);
    assert!(matches!(
        result,
        Err(Error::Planner(PlannerError::ActuatorCountMismatch { expected: 2, found: 3 }))
    ));
}

// =============================================================================
// Junction scenarios
// =============================================================================

#[test]
fn test_collinear_blocks_plan_at_full_feed() {
    let mut planner = mill();
    for _ in 0..3 {
        planner
            .add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED))
            .unwrap();
    }

    let entries: Vec<f32> = planner.blocks().map(|b| b.entry_feed_sqr).collect();
    assert_eq!(entries[0], 0.0);
    assert!(close(entries[1], FEED_SQR));
    assert!(close(entries[2], FEED_SQR));
    assert!(planner.blocks().all(|b| !b.optimal));
    assert!(close(planner.block_exit_speed_sqr(), FEED_SQR));
}

#[test]
fn test_right_angle_corner_caps_entry() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner.add_line(&MotionRequest::line([0, 1000, 0]).feed(FEED)).unwrap();

    let corner = planner.blocks().nth(1).unwrap();
    assert!(corner.entry_max_feed_sqr < corner.feed_sqr);
    assert_eq!(planner.block_exit_speed_sqr(), 0.0);
}

#[test]
fn test_shallow_corner_slows_but_does_not_stop() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner.add_line(&MotionRequest::line([1000, 1000, 0]).feed(FEED)).unwrap();

    let corner = planner.blocks().nth(1).unwrap();
    assert!(corner.entry_max_feed_sqr > 0.0);
    assert!(corner.entry_max_feed_sqr < corner.feed_sqr);
    assert!(close(corner.entry_feed_sqr, corner.entry_max_feed_sqr));
}

#[test]
fn test_reversal_forces_full_stop() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner.add_line(&MotionRequest::line([-1000, 0, 0]).feed(FEED)).unwrap();

    let reversal = planner.blocks().nth(1).unwrap();
    assert_eq!(reversal.entry_feed_sqr, 0.0);
    assert_eq!(reversal.dirbits, 0b001);
}

#[test]
fn test_continuous_mode_relaxes_corner() {
    let corner = |mode: MotionMode| {
        let mut planner = mill();
        planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
        planner
            .add_line(&MotionRequest::line([1000, 1000, 0]).feed(FEED).mode(mode))
            .unwrap();
        let x = planner.blocks().nth(1).unwrap().entry_max_feed_sqr;
        x
    };

    assert!(corner(MotionMode::CONTINUOUS) > corner(MotionMode::FEED));
}

#[test]
fn test_backlash_move_stops_at_junction() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner
        .add_line(
            &MotionRequest::line([10, 0, 0])
                .feed(FEED)
                .mode(MotionMode::BACKLASH_COMPENSATION),
        )
        .unwrap();

    assert_eq!(planner.block_exit_speed_sqr(), 0.0);
}

#[test]
fn test_dwell_stops_motion() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner.add_line(&MotionRequest::dwell(500)).unwrap();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();

    let blocks: Vec<_> = planner.blocks().copied().collect();
    assert!(blocks[1].is_dwell());
    assert_eq!(blocks[1].total_steps, 0);
    assert_eq!(blocks[2].entry_feed_sqr, 0.0);
    assert_eq!(planner.block_exit_speed_sqr(), 0.0);
}

#[test]
fn test_slow_axis_limits_rapid_and_acceleration() {
    let mut planner = mill();
    // Z: 600 mm/min * 400 steps/mm / 60 = 4000 steps/s
    planner
        .add_line(&MotionRequest::line([0, 0, 4000]).feed(1.0e9))
        .unwrap();
    let block = planner.block().unwrap();
    assert_eq!(block.main_stepper, 2);
    assert!(close(block.rapid_feed_sqr, 4000.0 * 4000.0));
    // 50 mm/s² * 400 steps/mm
    assert!(close(block.acceleration, 20_000.0));
}

// =============================================================================
// Consumer interface
// =============================================================================

#[test]
fn test_consume_blocks_in_order() {
    let mut planner = mill();
    for line in 1..=3 {
        planner
            .add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED).line_number(line))
            .unwrap();
    }

    let mut seen = Vec::new();
    while let Some(block) = planner.block() {
        seen.push(block.line);
        let profile = planner.block_profile().unwrap();
        assert_eq!(profile.phase_at(block.total_steps), MotionPhase::Complete);
        planner.discard_block();
    }
    assert_eq!(seen, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(planner.block_top_speed_sqr(), 0.0);
}

#[test]
fn test_top_speed_limited_by_short_block() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([100, 0, 0]).feed(FEED)).unwrap();
    // 2a·d = 2 * 10000 * 100 shared between accel and decel
    assert!(close(planner.block_top_speed_sqr(), 1.0e6));

    let profile = planner.block_profile().unwrap();
    assert_eq!(profile.cruise_steps, 0);
    assert_eq!(profile.accel_steps + profile.decel_steps, 100);
}

#[test]
fn test_feed_override_half_quarters_exit_speed() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    let full = planner.block_exit_speed_sqr();

    planner.feed_override_inc(-50);
    assert_eq!(planner.overrides().feed(), 50);
    assert!(close(planner.block_exit_speed_sqr(), full * 0.25));

    planner.feed_override_reset();
    assert!(close(planner.block_exit_speed_sqr(), full));
}

#[test]
fn test_overrides_skip_opted_out_blocks() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner
        .add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED).without_overrides())
        .unwrap();
    let full = planner.block_exit_speed_sqr();

    planner.feed_override_inc(-50);
    assert!(close(planner.block_exit_speed_sqr(), full));
}

#[test]
fn test_disabled_overrides_restore_planned_speed() {
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED)).unwrap();
    let full = planner.block_exit_speed_sqr();

    planner.feed_override_inc(-50);
    assert!(close(planner.block_exit_speed_sqr(), full * 0.25));
    assert!(!planner.toggle_overrides());
    assert!(close(planner.block_exit_speed_sqr(), full));
}

#[test]
fn test_rapid_override_caps_exit_and_top_speed() {
    // 10000 steps/s, the X rapid ceiling
    let rapid_feed = 600_000.0;
    let mut planner = mill();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(rapid_feed)).unwrap();
    planner.add_line(&MotionRequest::line([1000, 0, 0]).feed(rapid_feed)).unwrap();

    let next = *planner.blocks().nth(1).unwrap();
    assert!(close(next.feed_sqr, next.rapid_feed_sqr));
    // next block entry limited by the first block's 2·a·d from rest
    assert!(close(planner.block_exit_speed_sqr(), 2.0e7));
    let limited = next.rapid_feed_sqr * 0.0625;
    assert!(limited < 2.0e7);

    planner.set_rapid_override(25);
    assert_eq!(planner.overrides().rapid(), 25);
    assert!(close(planner.block_exit_speed_sqr(), limited));
    let top = planner.block_top_speed_sqr();
    assert!(top <= limited * (1.0 + 1e-4));
    assert!(top >= planner.block_exit_speed_sqr() * (1.0 - 1e-4));

    planner.rapid_override_reset();
    assert!(close(planner.block_exit_speed_sqr(), 2.0e7));
}

#[test]
fn test_override_report_throttle() {
    let mut planner = mill();
    let first = planner.poll_override_report().unwrap();
    assert_eq!((first.feed, first.rapid, first.spindle), (100, 100, 100));

    for _ in 0..30 {
        assert!(planner.poll_override_report().is_none());
    }
    assert!(planner.poll_override_report().is_some());

    planner.spindle_override_inc(10);
    assert_eq!(planner.poll_override_report().map(|s| s.spindle), Some(110));
}

// =============================================================================
// Tools
// =============================================================================

#[test]
fn test_coolant_toggle_twice_restores_state() {
    let mut planner = mill();
    planner
        .add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED).coolant(CoolantMask::FLOOD))
        .unwrap();
    let original = planner.coolant();
    assert_eq!(original, CoolantMask::FLOOD);

    planner.coolant_override_toggle(CoolantMask::MIST);
    assert_eq!(planner.coolant(), CoolantMask::ALL);
    planner.coolant_override_toggle(CoolantMask::MIST);
    assert_eq!(planner.coolant(), original);
}

#[test]
fn test_spindle_follows_executing_block() {
    let mut planner = mill();
    planner
        .add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED).spindle(5000))
        .unwrap();
    planner
        .add_line(&MotionRequest::line([1000, 0, 0]).feed(FEED).spindle(10000))
        .unwrap();

    assert_eq!(planner.spindle_speed(), 5000);
    assert_eq!(planner.previous_spindle_speed(), 10000);
    assert_eq!(planner.spindle_duty(1.0).duty, 127);

    planner.spindle_override_inc(-50);
    assert_eq!(planner.spindle_duty(1.0).duty, 63);

    planner.discard_block();
    planner.spindle_override_reset();
    assert_eq!(planner.spindle_duty(1.0).duty, 255);
}

#[test]
fn test_laser_power_scales_when_reversed() {
    let settings = parse_settings(LASER_CONFIG).unwrap();
    let mut planner: Planner<NoopHooks, 3> = Planner::new(settings, NoopHooks).unwrap();
    planner.add_line(&MotionRequest::tools(-1000, CoolantMask::NONE)).unwrap();

    let duty = planner.spindle_duty(0.5);
    assert!(duty.reverse);
    assert_eq!(duty.duty, 127);
}

#[test]
fn test_per_axis_vectors_use_supplied_direction() {
    let settings = parse_settings(LASER_CONFIG).unwrap();
    let mut planner: Planner<NoopHooks, 3> = Planner::new(settings, NoopHooks).unwrap();
    // Step counts disagree in direction but the cartesian path is straight
    planner
        .add_line(&MotionRequest::line([800, 0, 0]).feed(FEED).direction([1.0, 0.0, 0.0]))
        .unwrap();
    planner
        .add_line(&MotionRequest::line([0, 800, 0]).feed(FEED).direction([1.0, 0.0, 0.0]))
        .unwrap();

    let second = planner.blocks().nth(1).unwrap();
    assert!(second.entry_max_feed_sqr > 0.0);
}

// =============================================================================
// Buffer and lifecycle
// =============================================================================

#[test]
fn test_full_buffer_rejects_then_recovers() {
    let mut planner: Planner<NoopHooks, 3, 4> = Planner::new(mill_settings(), NoopHooks).unwrap();
    for i in 0..4 {
        planner
            .add_line(&MotionRequest::between([i * 100, 0, 0], [(i + 1) * 100, 0, 0]).feed(FEED))
            .unwrap();
    }
    assert!(planner.is_full());
    assert_eq!(planner.position(), [400, 0, 0]);

    let rejected = planner.add_line(&MotionRequest::between([400, 0, 0], [500, 0, 0]).feed(FEED));
    assert_eq!(rejected, Err(Error::Planner(PlannerError::BufferFull)));
    assert_eq!(planner.position(), [400, 0, 0]);

    assert!(planner.discard_block());
    planner
        .add_line(&MotionRequest::between([400, 0, 0], [500, 0, 0]).feed(FEED))
        .unwrap();
    assert_eq!(planner.len(), 4);
    assert_eq!(planner.position(), [500, 0, 0]);
}

#[test]
fn test_clear_resyncs_with_interpolator() {
    let mut planner: Planner<RecordingInterpolator, 3> =
        Planner::new(mill_settings(), RecordingInterpolator::default()).unwrap();
    planner
        .add_line(
            &MotionRequest::between([0, 0, 0], [1000, 0, 0])
                .feed(FEED)
                .spindle(3000)
                .coolant(CoolantMask::MIST),
        )
        .unwrap();
    planner
        .add_line(&MotionRequest::between([1000, 0, 0], [2000, 0, 0]).feed(FEED))
        .unwrap();
    assert_eq!(planner.hooks().updates, 1);

    planner.hooks_mut().position = [640, 0, 0];
    planner.clear();

    assert!(planner.is_empty());
    assert_eq!(planner.position(), [640, 0, 0]);
    assert_eq!(planner.spindle_speed(), 0);
    assert_eq!(planner.coolant(), CoolantMask::NONE);
    assert_eq!(planner.hooks().resyncs, 1);

    // First move after a clear starts from rest again
    planner
        .add_line(&MotionRequest::between([640, 0, 0], [1640, 0, 0]).feed(FEED))
        .unwrap();
    assert_eq!(planner.block().unwrap().entry_feed_sqr, 0.0);
}

#[test]
fn test_sync_tools_sets_committed_state() {
    let mut planner = mill();
    planner.sync_tools(-2000, CoolantMask::FLOOD);
    assert_eq!(planner.spindle_speed(), -2000);
    assert_eq!(planner.previous_coolant(), CoolantMask::FLOOD);
    assert!(planner.spindle_duty(1.0).reverse);

    planner.coolant_override_reset();
    assert_eq!(planner.coolant(), CoolantMask::NONE);
}
