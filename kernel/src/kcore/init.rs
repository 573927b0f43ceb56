use crate::config::ModuleConfig;
use crate::lifecycle::ChrLed;
use alloc::sync::Arc;
use common::Error;
use common::host::{CharDevRegistry, IoMapper};
use log::{error, warn};
use spin::Mutex;

// ============================================================================
// Module State
// ============================================================================

/// The loaded driver; present between `module_init` and `module_exit`.
static MODULE: Mutex<Option<ChrLed>> = Mutex::new(None);

// ============================================================================
// Entry Points
// ============================================================================

/// Load the driver.
///
/// Returns 0 on success or a negative errno. On failure nothing stays
/// registered or mapped.
pub fn module_init<K>(kernel: Arc<K>, params: &str) -> i32
where
    K: IoMapper + CharDevRegistry + 'static,
{
    match try_init(kernel, params) {
        Ok(()) => 0,
        Err(err) => {
            error!("newchrled load failed: {}", err);
            err.to_errno().to_status()
        }
    }
}

fn try_init<K>(kernel: Arc<K>, params: &str) -> Result<(), Error>
where
    K: IoMapper + CharDevRegistry + 'static,
{
    let config = ModuleConfig::parse(params)?;

    let mut slot = MODULE.lock();
    if slot.is_some() {
        return Err(Error::Busy);
    }
    *slot = Some(ChrLed::load(kernel, config)?);
    Ok(())
}

/// Unload the driver: LED off, device node and numbers released.
pub fn module_exit() {
    let module = MODULE.lock().take();
    match module {
        Some(module) => module.unload(),
        None => warn!("newchrled exit without a loaded device"),
    }
}

/// Run `f` on the loaded driver, if any.
///
/// `f` runs with the module slot locked: it must not call `with_device`,
/// `module_init` or `module_exit`, or it spins forever.
pub fn with_device<R>(f: impl FnOnce(&ChrLed) -> R) -> Option<R> {
    MODULE.lock().as_ref().map(f)
}
