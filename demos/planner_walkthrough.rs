//! Example: Planning a short toolpath from a TOML machine description.
//!
//! This example demonstrates how to:
//! - Load machine settings from TOML
//! - Feed moves into the look-ahead planner
//! - Consume blocks the way an interpolator would, with overrides applied
//!
//! Run with: `cargo run --example planner_walkthrough --features std`

use cnc_planner::{
    config::parse_settings, error::Result, CoolantMask, InterpolatorHooks, MotionMode, MotionRequest,
    Planner,
};

/// Interpolator stand-in that only counts profile updates.
#[derive(Default)]
struct SimInterpolator {
    updates: u32,
    position: [i32; 3],
}

impl InterpolatorHooks<3> for SimInterpolator {
    fn update(&mut self) {
        self.updates += 1;
    }

    fn rt_position(&self) -> [i32; 3] {
        self.position
    }

    fn resync(&mut self) {}
}

fn main() -> Result<()> {
    println!("=== Look-ahead Planner Walkthrough ===\n");

    let toml_content = r#"
[[actuators]]
name = "X"
steps_per_mm = 80.0
max_feed_rate_mm_per_min = 5000.0
acceleration_mm_per_sec2 = 150.0

[[actuators]]
name = "Y"
steps_per_mm = 80.0
max_feed_rate_mm_per_min = 5000.0
acceleration_mm_per_sec2 = 150.0

[[actuators]]
name = "Z"
steps_per_mm = 400.0
max_feed_rate_mm_per_min = 600.0
acceleration_mm_per_sec2 = 50.0

[spindle]
max_rpm = 12000.0

[capabilities]
line_numbers = true
"#;

    let settings = parse_settings(toml_content)?;
    println!("Actuators:");
    for actuator in settings.actuators.iter() {
        println!(
            "  {}: {} steps/mm, {} mm/min, {} mm/s²",
            actuator.name,
            actuator.steps_per_mm.value(),
            actuator.max_feed_rate.value(),
            actuator.acceleration.value()
        );
    }
    println!();

    let mut planner: Planner<SimInterpolator, 3> = Planner::new(settings, SimInterpolator::default())?;

    // 1200 mm/min on an 80 steps/mm axis, expressed in dominant steps per minute
    let feed = 1200.0 * 80.0;
    let path: [[i32; 3]; 6] = [
        [0, 0, 0],
        [1600, 0, 0],
        [3200, 0, 0],
        [4800, 800, 0],
        [4800, 2400, 0],
        [0, 2400, 0],
    ];

    planner.add_line(&MotionRequest::tools(9000, CoolantMask::FLOOD).line_number(10))?;
    for (line, pair) in path.windows(2).enumerate() {
        let mode = if line == 3 { MotionMode::CONTINUOUS } else { MotionMode::FEED };
        planner.add_line(
            &MotionRequest::between(pair[0], pair[1])
                .feed(feed)
                .mode(mode)
                .spindle(9000)
                .coolant(CoolantMask::FLOOD)
                .line_number(20 + line as u32 * 10),
        )?;
    }
    planner.add_line(&MotionRequest::dwell(250).line_number(80))?;

    println!("Planned {} blocks, position {:?}", planner.len(), planner.position());
    println!("Interpolator updates during planning: {}\n", planner.hooks().updates);

    println!("{:<6} {:>7} {:>12} {:>12} {:>12} {:>9}", "line", "steps", "entry", "top", "exit", "time (s)");
    println!("{}", "-".repeat(64));

    let mut executed = 0;
    while let Some(block) = planner.block() {
        let line = block.line.unwrap_or(0);
        let profile = planner.block_profile().unwrap_or_else(cnc_planner::BlockProfile::zero);
        println!(
            "{:<6} {:>7} {:>12.1} {:>12.1} {:>12.1} {:>9.3}",
            line,
            profile.total_steps,
            libm::sqrtf(profile.entry_sqr),
            libm::sqrtf(profile.top_sqr),
            libm::sqrtf(profile.exit_sqr),
            profile.estimated_duration_secs()
        );

        executed += 1;
        if executed == 2 {
            // operator turns the feed down mid-job
            planner.feed_override_inc(-50);
            println!("  -- feed override now {}%", planner.overrides().feed());
        }
        planner.discard_block();
    }

    println!();
    println!("Spindle duty after the job: {:?}", planner.spindle_duty(1.0));
    println!("Coolant after the job: {:?}", planner.coolant());
    if let Some(report) = planner.poll_override_report() {
        println!("Override report: {:?}", report);
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
