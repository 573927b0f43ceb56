//! Platform Abstraction Layer
//!
//! Each supported SoC implements [`Platform`], describing how the LED is
//! wired: which registers control the pin and which values bring it up.
//!
//! # Usage
//!
//! ```ignore
//! use drivers::platform::{CurrentPlatform, Platform};
//!
//! let wiring = CurrentPlatform::led_wiring();
//! ```

use crate::hal::led::Polarity;
use crate::regmap::RegisterLayout;

/// Board wiring of the LED pin.
#[derive(Debug, Clone, Copy)]
pub struct LedWiring {
    /// Control registers of the pin.
    pub layout: RegisterLayout,
    /// Field set in the clock gate register to clock the GPIO bank.
    pub clock_gate: u32,
    /// Value written to the mux select register.
    pub mux_mode: u32,
    /// Value written to the pad config register.
    pub pad_config: u32,
    /// Pin number inside its GPIO bank.
    pub pin: u8,
    /// Level that lights the LED.
    pub polarity: Polarity,
}

/// Platform trait - implemented by each supported platform
pub trait Platform {
    /// Platform name for debugging
    fn name() -> &'static str;

    /// Wiring of the board LED.
    fn led_wiring() -> LedWiring;
}

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "imx6ull")] {
        pub mod imx6ull;
        pub use imx6ull::Imx6ullPlatform as CurrentPlatform;
        pub use imx6ull::GpioController;
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features imx6ull"
        );
    }
}
