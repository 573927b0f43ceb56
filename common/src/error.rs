//! Error taxonomy of the LED driver.
//!
//! Load-time failures ([`MapError`], [`RegistrationError`]) abort the load
//! and are reported from the init entry point. Per-call failures
//! ([`Error::CopyFault`], [`Error::InvalidArgument`]) are returned to the
//! writer and leave the device untouched.

use crate::errno::Errno;
use crate::host::io::PhysAddr;
use core::fmt;

/// A register range could not be mapped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MapError {
    /// Physical address that was refused.
    pub phys: PhysAddr,
    /// Error reported by the mapping service.
    pub errno: Errno,
}

/// Step of the device registration sequence, in acquisition order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrationStage {
    /// Device number region (static or dynamic).
    DeviceNumber,
    /// Character device entry bound to the file operations.
    Cdev,
    /// Device class.
    Class,
    /// Device node under the class.
    Node,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegistrationStage::DeviceNumber => "device number",
            RegistrationStage::Cdev => "cdev",
            RegistrationStage::Class => "class",
            RegistrationStage::Node => "device node",
        })
    }
}

/// A registration step failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegistrationError {
    pub stage: RegistrationStage,
    pub errno: Errno,
}

impl RegistrationError {
    pub const fn new(stage: RegistrationStage, errno: Errno) -> Self {
        Self { stage, errno }
    }
}

/// Driver errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Register mapping failed during bring-up.
    Map(MapError),
    /// Device number, cdev, class or node creation failed.
    Registration(RegistrationError),
    /// The byte could not be copied from the caller's buffer.
    CopyFault,
    /// Value outside of the accepted protocol.
    InvalidArgument,
    /// No device is attached to the open file.
    NoDevice,
    /// The driver is already loaded.
    Busy,
}

impl Error {
    /// Error number reported to the host.
    pub fn to_errno(self) -> Errno {
        match self {
            Error::Map(err) => err.errno,
            Error::Registration(err) => err.errno,
            Error::CopyFault => Errno::EFAULT,
            Error::InvalidArgument => Errno::EINVAL,
            Error::NoDevice => Errno::ENODEV,
            Error::Busy => Errno::EBUSY,
        }
    }
}

impl From<MapError> for Error {
    fn from(err: MapError) -> Self {
        Error::Map(err)
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Error::Registration(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Map(err) => write!(f, "ioremap of {} failed: {}", err.phys, err.errno),
            Error::Registration(err) => {
                write!(f, "{} registration failed: {}", err.stage, err.errno)
            }
            Error::CopyFault => write!(f, "bad address"),
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::NoDevice => write!(f, "no such device"),
            Error::Busy => write!(f, "device busy"),
        }
    }
}
