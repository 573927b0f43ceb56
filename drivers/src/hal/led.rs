//! Logical LED state and how it maps onto a pin level.

use super::gpio::PinLevel;
use common::Error;

/// Logical state of the LED.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LedState {
    On,
    Off,
}

impl TryFrom<u8> for LedState {
    type Error = Error;

    /// Decode the device file protocol: `0x00` is off, `0x01` is on.
    fn try_from(byte: u8) -> Result<Self, Error> {
        match byte {
            0x00 => Ok(LedState::Off),
            0x01 => Ok(LedState::On),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Which pin level lights the LED.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Polarity {
    /// LED lights while the pin is high.
    ActiveHigh,
    /// LED lights while the pin is low (LED wired between VDD and the pin).
    ActiveLow,
}

impl Polarity {
    /// Pin level producing `state`.
    pub fn level(self, state: LedState) -> PinLevel {
        let lit = match self {
            Polarity::ActiveHigh => PinLevel::High,
            Polarity::ActiveLow => PinLevel::Low,
        };
        match state {
            LedState::On => lit,
            LedState::Off => lit.inverted(),
        }
    }

    /// LED state shown while the pin is at `level`.
    pub fn state(self, level: PinLevel) -> LedState {
        if self.level(LedState::On) == level {
            LedState::On
        } else {
            LedState::Off
        }
    }
}
