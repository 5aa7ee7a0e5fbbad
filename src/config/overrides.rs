//! Override limits and reporting cadence.

use serde::Deserialize;

/// Bounds and presets for runtime overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideLimits {
    /// Lowest feed override percent.
    #[serde(default = "default_min")]
    pub feed_min: u8,
    /// Highest feed override percent.
    #[serde(default = "default_max")]
    pub feed_max: u8,
    /// Lowest spindle override percent.
    #[serde(default = "default_min")]
    pub spindle_min: u8,
    /// Highest spindle override percent.
    #[serde(default = "default_max")]
    pub spindle_max: u8,
    /// Rapid override presets (full, medium, low).
    #[serde(default = "default_rapid_presets")]
    pub rapid_presets: [u8; 3],
    /// Coarse increment step.
    #[serde(default = "default_coarse")]
    pub coarse_step: u8,
    /// Fine increment step.
    #[serde(default = "default_fine")]
    pub fine_step: u8,
    /// Override snapshots are released once every this many polls.
    #[serde(default = "default_report_interval")]
    pub report_interval: u8,
}

fn default_min() -> u8 {
    10
}

fn default_max() -> u8 {
    200
}

fn default_rapid_presets() -> [u8; 3] {
    [100, 50, 25]
}

fn default_coarse() -> u8 {
    10
}

fn default_fine() -> u8 {
    1
}

fn default_report_interval() -> u8 {
    30
}

impl Default for OverrideLimits {
    fn default() -> Self {
        Self {
            feed_min: default_min(),
            feed_max: default_max(),
            spindle_min: default_min(),
            spindle_max: default_max(),
            rapid_presets: default_rapid_presets(),
            coarse_step: default_coarse(),
            fine_step: default_fine(),
            report_interval: default_report_interval(),
        }
    }
}

impl OverrideLimits {
    /// Lowest rapid override percent (smallest preset).
    pub fn rapid_min(&self) -> u8 {
        self.rapid_presets.iter().copied().min().unwrap_or(100)
    }
}
