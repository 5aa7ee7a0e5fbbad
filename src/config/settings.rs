//! Planner settings - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::actuator::ActuatorConfig;
use super::capabilities::{Capabilities, JunctionConfig};
use super::overrides::OverrideLimits;
use super::spindle::SpindleConfig;

/// Maximum number of actuators a settings file may describe.
pub const MAX_ACTUATORS: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerSettings {
    /// Actuators in step-channel order.
    pub actuators: Vec<ActuatorConfig, MAX_ACTUATORS>,

    /// Spindle range and PWM mapping.
    #[serde(default)]
    pub spindle: SpindleConfig,

    /// Override bounds and report cadence.
    #[serde(default)]
    pub overrides: OverrideLimits,

    /// Junction speed tuning.
    #[serde(default)]
    pub junction: JunctionConfig,

    /// Optional planner capabilities.
    #[serde(default)]
    pub capabilities: Capabilities,
}

impl PlannerSettings {
    /// Create settings from a list of actuators with default everything else.
    pub fn with_actuators(actuators: &[ActuatorConfig]) -> Self {
        let mut list = Vec::new();
        for actuator in actuators.iter().take(MAX_ACTUATORS) {
            let _ = list.push(actuator.clone());
        }
        Self {
            actuators: list,
            ..Self::default()
        }
    }

    /// Get an actuator configuration by index.
    pub fn actuator(&self, index: usize) -> Option<&ActuatorConfig> {
        self.actuators.get(index)
    }

    /// Get an actuator configuration by name.
    pub fn actuator_by_name(&self, name: &str) -> Option<&ActuatorConfig> {
        self.actuators.iter().find(|a| a.name.as_str() == name)
    }

    /// Number of configured actuators.
    pub fn actuator_count(&self) -> usize {
        self.actuators.len()
    }

    /// List all actuator names.
    pub fn actuator_names(&self) -> impl Iterator<Item = &str> {
        self.actuators.iter().map(|a| a.name.as_str())
    }
}
