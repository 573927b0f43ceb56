//! Hardware Driver Subsystem
//!
//! Layered access to the LED pin of the board:
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent pin and LED traits
//! - [`hw`]: Register addresses and bit fields of the supported SoCs
//! - [`regmap`]: Ownership of the mapped control registers
//! - [`platform`]: Platform-specific bring-up and pin control
//!
//! # Usage Example
//!
//! ```ignore
//! use drivers::platform::{CurrentPlatform, GpioController, Platform};
//! use drivers::LedState;
//!
//! let gpio = GpioController::bring_up(mapper, &CurrentPlatform::led_wiring())?;
//! gpio.set_pin(LedState::On);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod hal;
pub mod hw;
pub mod platform;
pub mod regmap;

// Re-export commonly used types
pub use hal::gpio::{OutputPin, PinLevel, StatefulOutputPin};
pub use hal::led::{LedState, Polarity};
pub use platform::{CurrentPlatform, GpioController, LedWiring, Platform};
pub use regmap::{Register, RegisterLayout, RegisterMap};

extern crate alloc;
