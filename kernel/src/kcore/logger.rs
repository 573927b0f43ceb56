//! `log` backend writing to the host console.
//!
//! Records are formatted as `[LEVEL] target: message` and written as one
//! line each, the way `printk` output reads.

use alloc::format;
use common::host::Console;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

struct KernelLogger {
    console: Once<&'static dyn Console>,
}

static LOGGER: KernelLogger = KernelLogger {
    console: Once::new(),
};

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.is_completed() && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(console) = self.console.get() {
            let line = format!(
                "[{}] {}: {}\n",
                record.level(),
                record.target(),
                record.args()
            );
            console.write_str(&line);
        }
    }

    fn flush(&self) {}
}

/// Install the logger, sending output to `console`.
///
/// Only the first call installs; later calls return the `log` error.
pub fn init(console: &'static dyn Console, level: LevelFilter) -> Result<(), SetLoggerError> {
    LOGGER.console.call_once(|| console);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
