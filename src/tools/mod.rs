//! Tool state helpers: spindle duty mapping and coolant masks, plus
//! embedded-hal output wrappers for driving them.

mod coolant;
mod spindle;

pub use coolant::{CoolantMask, CoolantOutputs};
pub use spindle::{spindle_duty, SpindleDuty, SpindleOutput, DUTY_MAX};
