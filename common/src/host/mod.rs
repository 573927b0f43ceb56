//! Host kernel services consumed by the driver.
//!
//! The driver never touches the host directly; every service it needs is
//! reached through one of these traits:
//!
//! - [`io`]: mapping physical register ranges
//! - [`chrdev`]: device numbers, cdev entries, classes and device nodes
//! - [`file`]: per-open file context, user buffers and the handler table
//! - [`console`]: sink for log output

pub mod chrdev;
pub mod console;
pub mod file;
pub mod io;

pub use chrdev::{CdevId, CharDevRegistry, ClassId, DevT, NodeId};
pub use console::Console;
pub use file::{File, FileOperations, UserBuffer};
pub use io::{IoMapper, PhysAddr};

cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "sim"))] {
        pub mod sim;
    }
}
