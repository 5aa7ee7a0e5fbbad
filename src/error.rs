//! Error types for cnc-planner.
//!
//! Provides unified error handling across settings loading and planner operation.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all planner operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Settings parsing or validation error
    Config(ConfigError),
    /// Planner operation error
    Planner(PlannerError),
}

/// Settings-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML settings
    ParseError(heapless::String<128>),
    /// No actuators configured
    NoActuators,
    /// Invalid steps per millimeter for an actuator (must be > 0)
    InvalidStepsPerMm {
        /// Actuator index
        actuator: usize,
        /// Offending value
        value: f32,
    },
    /// Invalid max feed rate for an actuator (must be > 0)
    InvalidMaxFeedRate {
        /// Actuator index
        actuator: usize,
        /// Offending value
        value: f32,
    },
    /// Invalid acceleration for an actuator (must be > 0)
    InvalidAcceleration {
        /// Actuator index
        actuator: usize,
        /// Offending value
        value: f32,
    },
    /// Invalid spindle range (max must be > 0 and >= min)
    InvalidSpindleRange {
        /// Minimum RPM
        min: f32,
        /// Maximum RPM
        max: f32,
    },
    /// Override limits must satisfy 0 < min <= 100 <= max
    InvalidOverrideLimits {
        /// Minimum percent
        min: u8,
        /// Maximum percent
        max: u8,
    },
    /// Continuous-motion angle factor must be within [0, 1)
    InvalidAngleFactor(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Planner operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlannerError {
    /// Block buffer has no free slot
    BufferFull,
    /// Settings describe a different number of actuators than the planner holds
    ActuatorCountMismatch {
        /// Actuators the planner was built for
        expected: usize,
        /// Actuators present in the settings
        found: usize,
    },
    /// Moving block requested with a feed that is not positive
    InvalidFeed,
    /// Tool output pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Planner(e) => write!(f, "Planner error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoActuators => write!(f, "At least one actuator must be configured"),
            ConfigError::InvalidStepsPerMm { actuator, value } => {
                write!(f, "Actuator {}: invalid steps per mm {}. Must be > 0", actuator, value)
            }
            ConfigError::InvalidMaxFeedRate { actuator, value } => {
                write!(f, "Actuator {}: invalid max feed rate {}. Must be > 0", actuator, value)
            }
            ConfigError::InvalidAcceleration { actuator, value } => {
                write!(f, "Actuator {}: invalid acceleration {}. Must be > 0", actuator, value)
            }
            ConfigError::InvalidSpindleRange { min, max } => {
                write!(f, "Invalid spindle range: min ({}) must be <= max ({}) and max > 0", min, max)
            }
            ConfigError::InvalidOverrideLimits { min, max } => {
                write!(f, "Invalid override limits [{}, {}]: must bracket 100", min, max)
            }
            ConfigError::InvalidAngleFactor(v) => {
                write!(f, "Invalid continuous angle factor: {}. Must be within [0, 1)", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::BufferFull => write!(f, "Planner buffer is full"),
            PlannerError::ActuatorCountMismatch { expected, found } => {
                write!(f, "Planner expects {} actuators, settings define {}", expected, found)
            }
            PlannerError::InvalidFeed => write!(f, "Moving block needs a positive feed"),
            PlannerError::PinError => write!(f, "Tool output pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PlannerError> for Error {
    fn from(e: PlannerError) -> Self {
        Error::Planner(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PlannerError {}
