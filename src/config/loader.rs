//! Settings loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::PlannerSettings;

/// Load planner settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use cnc_planner::load_settings;
///
/// let settings = load_settings("machine.toml")?;
/// ```
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<PlannerSettings> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_settings(&content)
}

/// Parse planner settings from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_settings(content: &str) -> Result<PlannerSettings> {
    let settings: PlannerSettings = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_settings(&settings)?;

    Ok(settings)
}
