//! # cnc-planner
//!
//! Look-ahead trajectory planner for CNC motion-control firmware.
//!
//! ## Features
//!
//! - **Look-ahead**: Ring buffer of motion blocks with backward/forward entry speed reconciliation
//! - **Junction model**: Corner speed caps from the angle between consecutive moves
//! - **Runtime overrides**: Feed, rapid, spindle and coolant scaling applied at read time
//! - **Configuration-driven**: Machine limits loaded from TOML files
//! - **embedded-hal 1.0**: Spindle PWM/direction and coolant output pins
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cnc_planner::{MotionRequest, NoopHooks, Planner};
//!
//! let settings = cnc_planner::load_settings("machine.toml")?;
//! let mut planner: Planner<_, 3> = Planner::new(settings, NoopHooks)?;
//!
//! planner.add_line(&MotionRequest::line([800, 800, 0]).feed(96_000.0))?;
//!
//! // interpolator side
//! if let Some(profile) = planner.block_profile() {
//!     // step through `profile`, then
//!     planner.discard_block();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod planner;
pub mod tools;

// Re-exports for ergonomic API
pub use config::{validate_settings, Capabilities, JunctionVectors, PlannerSettings};
pub use error::{Error, Result};
pub use motion::{BlockProfile, MotionPhase};
pub use planner::{
    InterpolatorHooks, MotionBlock, MotionMode, MotionRequest, NoopHooks, OverrideSnapshot,
    Planner, DEFAULT_CAPACITY,
};
pub use tools::{CoolantMask, SpindleDuty};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_settings, parse_settings};

// Unit types
pub use config::units::{Acceleration, FeedRate, StepsPerMm, UnitExt};
