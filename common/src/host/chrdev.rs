//! Character device registration services.

use super::file::FileOperations;
use crate::errno::Errno;
use alloc::sync::Arc;
use core::fmt;

/// Device number: 12-bit major, 20-bit minor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DevT(u32);

impl DevT {
    pub const MINOR_BITS: u32 = 20;
    pub const MINOR_MASK: u32 = (1 << Self::MINOR_BITS) - 1;
    /// Largest major number that fits.
    pub const MAX_MAJOR: u32 = (1 << (32 - Self::MINOR_BITS)) - 1;

    pub const fn new(major: u32, minor: u32) -> Self {
        Self((major << Self::MINOR_BITS) | (minor & Self::MINOR_MASK))
    }

    /// Like [`DevT::new`], but `None` when either part does not fit.
    pub const fn checked(major: u32, minor: u32) -> Option<Self> {
        if major > Self::MAX_MAJOR || minor > Self::MINOR_MASK {
            None
        } else {
            Some(Self::new(major, minor))
        }
    }

    pub const fn major(self) -> u32 {
        self.0 >> Self::MINOR_BITS
    }

    pub const fn minor(self) -> u32 {
        self.0 & Self::MINOR_MASK
    }

    /// Whether `other` lies in the `count` numbers starting at `self`.
    pub fn contains(self, count: u32, other: DevT) -> bool {
        other.0 >= self.0 && other.0 - self.0 < count
    }
}

impl fmt::Display for DevT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major(), self.minor())
    }
}

/// Handle of a registered cdev entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CdevId(pub usize);

/// Handle of a device class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// Handle of a device node created under a class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Device number, cdev, class and node management of the host.
///
/// Release operations cannot fail; callers only release what they
/// successfully acquired.
pub trait CharDevRegistry: Send + Sync {
    /// Claim the fixed range `first..first + count`.
    fn register_chrdev_region(&self, first: DevT, count: u32, name: &str) -> Result<(), Errno>;

    /// Allocate a range with a dynamically chosen major.
    fn alloc_chrdev_region(&self, first_minor: u32, count: u32, name: &str)
    -> Result<DevT, Errno>;

    fn unregister_chrdev_region(&self, first: DevT, count: u32);

    /// Bind `fops` to the device numbers and make them live.
    fn cdev_add(
        &self,
        first: DevT,
        count: u32,
        fops: Arc<dyn FileOperations>,
    ) -> Result<CdevId, Errno>;

    fn cdev_del(&self, cdev: CdevId);

    fn class_create(&self, name: &str) -> Result<ClassId, Errno>;

    fn class_destroy(&self, class: ClassId);

    /// Create the device node `name` for `devt` under `class`.
    fn device_create(&self, class: ClassId, devt: DevT, name: &str) -> Result<NodeId, Errno>;

    fn device_destroy(&self, class: ClassId, devt: DevT);
}
