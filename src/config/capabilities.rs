//! Optional planner capabilities and junction tuning.

use serde::Deserialize;

/// Which vector space junction angles are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JunctionVectors {
    /// Derive direction from per-actuator step counts.
    #[default]
    PerActuator,
    /// Use the cartesian direction vector supplied with each move.
    PerAxis,
}

/// Optional features selected when the planner is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Junction vector source.
    #[serde(default)]
    pub junction_vectors: JunctionVectors,

    /// Force a full stop whenever any actuator changes direction.
    #[serde(default)]
    pub cold_start: bool,

    /// Track spindle speed per block.
    #[serde(default = "enabled")]
    pub spindle: bool,

    /// Track coolant state per block.
    #[serde(default = "enabled")]
    pub coolant: bool,

    /// Honor backlash-compensation moves.
    #[serde(default)]
    pub backlash_compensation: bool,

    /// Store source line numbers with each block.
    #[serde(default)]
    pub line_numbers: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            junction_vectors: JunctionVectors::PerActuator,
            cold_start: false,
            spindle: true,
            coolant: true,
            backlash_compensation: false,
            line_numbers: false,
        }
    }
}

/// Junction speed tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct JunctionConfig {
    /// Relaxation subtracted from the angle factor for continuous (G64) moves.
    #[serde(default = "default_continuous_angle_factor")]
    pub continuous_angle_factor: f32,
}

fn default_continuous_angle_factor() -> f32 {
    0.2
}

impl Default for JunctionConfig {
    fn default() -> Self {
        Self {
            continuous_angle_factor: default_continuous_angle_factor(),
        }
    }
}
