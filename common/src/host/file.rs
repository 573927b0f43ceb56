//! Per-open file context and the device file handler table.

use super::chrdev::DevT;
use crate::errno::Errno;
use crate::error::Error;
use alloc::sync::Arc;
use core::any::Any;

/// Caller-supplied buffer living in user space.
pub trait UserBuffer {
    /// Length passed by the caller.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `dst.len()` bytes from the start of the buffer
    /// (`copy_from_user`). Fails with `EFAULT` when the caller's memory
    /// cannot be read.
    fn copy_from_user(&self, dst: &mut [u8]) -> Result<(), Errno>;
}

/// State attached to one open of a device file.
pub struct File {
    devt: DevT,
    private_data: Option<Arc<dyn Any + Send + Sync>>,
}

impl File {
    pub fn new(devt: DevT) -> Self {
        Self {
            devt,
            private_data: None,
        }
    }

    /// Device number the file was opened through.
    pub fn devt(&self) -> DevT {
        self.devt
    }

    pub fn set_private_data(&mut self, data: Arc<dyn Any + Send + Sync>) {
        self.private_data = Some(data);
    }

    /// Attached data, if it is a `T`.
    pub fn private_data<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.private_data.clone()?.downcast::<T>().ok()
    }

    pub fn has_private_data(&self) -> bool {
        self.private_data.is_some()
    }

    pub fn clear_private_data(&mut self) {
        self.private_data = None;
    }
}

/// Handler table bound to a cdev entry.
///
/// Reads are not part of the table; the host rejects them.
pub trait FileOperations: Send + Sync {
    fn open(&self, file: &mut File) -> Result<(), Error>;

    /// Returns the number of bytes consumed.
    fn write(&self, file: &mut File, buf: &dyn UserBuffer, offset: &mut u64)
    -> Result<usize, Error>;

    fn release(&self, file: &mut File) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Descriptor(u32);

    #[test]
    fn private_data_downcasts_to_attached_type() {
        let mut file = File::new(DevT::new(240, 0));
        assert!(file.private_data::<Descriptor>().is_none());

        file.set_private_data(Arc::new(Descriptor(7)));
        assert_eq!(file.private_data::<Descriptor>().map(|d| d.0), Some(7));
        assert!(file.private_data::<u64>().is_none());

        file.clear_private_data();
        assert!(!file.has_private_data());
    }
}
