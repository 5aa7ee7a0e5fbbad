//! Motion module for cnc-planner.
//!
//! Speed profile helpers for the consumer side of the planner.

mod profile;

pub use profile::{BlockProfile, MotionPhase};
