//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! # Available Interfaces
//!
//! - [`gpio`]: Output pin control
//! - [`led`]: Logical LED state on top of a pin

pub mod gpio;
pub mod led;
