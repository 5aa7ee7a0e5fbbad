//! Unit types for physical quantities.
//!
//! Provides type-safe representations of feed rates, accelerations and
//! resolutions to prevent unit confusion at compile time.

use serde::Deserialize;

/// Seconds-per-minute conversion factor (feed rates are configured per minute).
pub const MIN_SEC_MULT: f32 = 1.0 / 60.0;

/// Linear feed rate in millimeters per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct FeedRate(pub f32);

impl FeedRate {
    /// Create a new FeedRate value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Linear acceleration in millimeters per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Acceleration(pub f32);

impl Acceleration {
    /// Create a new Acceleration value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Actuator resolution in steps per millimeter.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerMm(pub f32);

impl StepsPerMm {
    /// Create a new StepsPerMm value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to FeedRate (mm/min).
    fn mm_per_min(self) -> FeedRate;
    /// Convert to Acceleration (mm/s²).
    fn mm_per_sec2(self) -> Acceleration;
    /// Convert to StepsPerMm.
    fn steps_per_mm(self) -> StepsPerMm;
}

impl UnitExt for f32 {
    #[inline]
    fn mm_per_min(self) -> FeedRate {
        FeedRate(self)
    }

    #[inline]
    fn mm_per_sec2(self) -> Acceleration {
        Acceleration(self)
    }

    #[inline]
    fn steps_per_mm(self) -> StepsPerMm {
        StepsPerMm(self)
    }
}
