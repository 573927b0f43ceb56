//! Shared definitions for the LED character device crates.
//!
//! - [`errno`]: kernel error numbers returned to the host
//! - [`error`]: the driver's error taxonomy
//! - [`host`]: capability traits for the services the host kernel provides
//!   (register mapping, device numbers, classes and nodes, user copies)

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod errno;
pub mod error;
pub mod host;

pub use errno::Errno;
pub use error::{Error, MapError, RegistrationError, RegistrationStage};
