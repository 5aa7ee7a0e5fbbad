//! Coolant state and output pins.

use core::ops::{BitOr, BitXor};

use embedded_hal::digital::OutputPin;

use crate::error::{PlannerError, Result};

/// Coolant channels as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoolantMask(u8);

impl CoolantMask {
    /// All channels off.
    pub const NONE: Self = Self(0);
    /// Flood coolant (M8).
    pub const FLOOD: Self = Self(1);
    /// Mist coolant (M7).
    pub const MIST: Self = Self(2);
    /// Every defined channel.
    pub const ALL: Self = Self(3);

    /// Create a mask from raw bits, dropping undefined channels.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Get the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every channel in `other` is on.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether all channels are off.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CoolantMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for CoolantMask {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

/// Flood and mist output pins driven from a [`CoolantMask`].
pub struct CoolantOutputs<FLOOD, MIST>
where
    FLOOD: OutputPin,
    MIST: OutputPin,
{
    flood: FLOOD,
    mist: MIST,
    state: Option<CoolantMask>,
}

impl<FLOOD, MIST> CoolantOutputs<FLOOD, MIST>
where
    FLOOD: OutputPin,
    MIST: OutputPin,
{
    /// Wrap the two coolant pins. Nothing is written until the first [`apply`](Self::apply).
    pub fn new(flood: FLOOD, mist: MIST) -> Self {
        Self {
            flood,
            mist,
            state: None,
        }
    }

    /// Drive the pins to match `mask`. Pins are only written when the state changes.
    pub fn apply(&mut self, mask: CoolantMask) -> Result<()> {
        if self.state == Some(mask) {
            return Ok(());
        }

        set_pin(&mut self.flood, mask.contains(CoolantMask::FLOOD))?;
        set_pin(&mut self.mist, mask.contains(CoolantMask::MIST))?;

        self.state = Some(mask);
        Ok(())
    }

    /// Last mask written to the pins.
    pub fn state(&self) -> Option<CoolantMask> {
        self.state
    }

    /// Release the pins.
    pub fn release(self) -> (FLOOD, MIST) {
        (self.flood, self.mist)
    }
}

fn set_pin<P: OutputPin>(pin: &mut P, on: bool) -> Result<()> {
    let result = if on { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| PlannerError::PinError.into())
}
