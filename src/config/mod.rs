//! Configuration module for cnc-planner.
//!
//! Provides types for loading and validating machine settings
//! from TOML files (with `std` feature) or pre-built data.

mod actuator;
mod capabilities;
#[cfg(feature = "std")]
mod loader;
mod overrides;
mod settings;
mod spindle;
pub mod units;
mod validation;

pub use actuator::ActuatorConfig;
pub use capabilities::{Capabilities, JunctionConfig, JunctionVectors};
pub use overrides::OverrideLimits;
pub use settings::{PlannerSettings, MAX_ACTUATORS};
pub use spindle::SpindleConfig;
pub use validation::validate_settings;

#[cfg(feature = "std")]
pub use loader::{load_settings, parse_settings};

// Re-export unit types at config level
pub use units::{Acceleration, FeedRate, StepsPerMm};
