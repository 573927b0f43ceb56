//! LED character device.
//!
//! Exposes the board LED as the device file `/dev/newchrdev`: writing the
//! byte `1` turns it on, `0` turns it off.
//!
//! - [`config`]: module parameters
//! - [`lifecycle`]: device number, cdev, class and node registration
//! - [`fs::dev`]: the device file handlers
//! - [`kcore`]: load/unload entry points and the log backend

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod fs;
pub mod kcore;
pub mod lifecycle;

pub use config::ModuleConfig;
pub use kcore::init::{module_exit, module_init, with_device};
pub use lifecycle::{ChrLed, DeviceIdentity, LifecycleState};
