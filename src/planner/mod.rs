//! Look-ahead planner module.
//!
//! Ring buffer of motion blocks, junction speed model, backward/forward
//! recalculation and the runtime override layer.

mod block;
mod buffer;
mod hooks;
pub mod junction;
mod lookahead;
mod overrides;
mod position;
mod recalc;
mod request;

pub use block::MotionBlock;
pub use buffer::BlockRing;
pub use hooks::{InterpolatorHooks, NoopHooks};
pub use junction::DirectionVector;
pub use lookahead::{Planner, DEFAULT_CAPACITY};
pub use overrides::{OverrideSnapshot, Overrides, OVERRIDE_NEUTRAL};
pub use position::StepPosition;
pub use request::{MotionMode, MotionRequest};
