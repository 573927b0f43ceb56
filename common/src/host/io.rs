use crate::errno::Errno;
use core::fmt;
use core::ptr::NonNull;

/// Physical address of a hardware register.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhysAddr(pub usize);

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Mapping service for memory-mapped I/O ranges (`ioremap`/`iounmap`).
///
/// # Safety
///
/// A pointer returned by [`IoMapper::ioremap`] must be valid for volatile
/// reads and writes of `len` bytes, suitably aligned for `u32`, until it is
/// passed to [`IoMapper::iounmap`].
pub unsafe trait IoMapper: Send + Sync {
    /// Map `len` bytes starting at `phys`.
    fn ioremap(&self, phys: PhysAddr, len: usize) -> Result<NonNull<u8>, Errno>;

    /// Release a mapping.
    ///
    /// # Safety
    ///
    /// `virt` and `len` must come from a single successful `ioremap` call,
    /// and the range must not be accessed afterwards.
    unsafe fn iounmap(&self, virt: NonNull<u8>, len: usize);
}
