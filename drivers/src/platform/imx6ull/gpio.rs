//! i.MX6ULL GPIO controller for the board LED.
//!
//! Brings the pad from its reset state to a driven output and switches it.
//! All writers of the data register go through one lock, since the other 31
//! pins of the bank share that register.

use crate::hal::gpio::{OutputPin, PinLevel, StatefulOutputPin};
use crate::hal::led::{LedState, Polarity};
use crate::hw::imx6ull::gpio::pin_mask;
use crate::platform::LedWiring;
use crate::regmap::{Register, RegisterMap};
use alloc::sync::Arc;
use common::MapError;
use common::host::IoMapper;
use core::convert::Infallible;
use log::{debug, trace};
use spin::Mutex;

/// GPIO controller driving a single LED pin.
pub struct GpioController {
    regs: Mutex<RegisterMap>,
    mask: u32,
    polarity: Polarity,
}

impl GpioController {
    /// Map the control registers and run the bring-up sequence:
    ///
    /// 1. Ungate the GPIO bank clock (read-modify-write).
    /// 2. Select the GPIO function in the pin mux.
    /// 3. Program the pad attributes.
    /// 4. Make the pin an output (read-modify-write).
    /// 5. Turn the LED off.
    ///
    /// Nothing is programmed unless every register could be mapped.
    pub fn bring_up(mapper: Arc<dyn IoMapper>, wiring: &LedWiring) -> Result<Self, MapError> {
        let regs = RegisterMap::map(mapper, &wiring.layout)?;
        let mask = pin_mask(wiring.pin);

        regs.modify(Register::ClockGate, |val| val | wiring.clock_gate);
        regs.write(Register::MuxSelect, wiring.mux_mode);
        regs.write(Register::PadConfig, wiring.pad_config);
        regs.modify(Register::Direction, |val| val | mask);
        debug!(
            "gpio pin {} configured as output (mux {:#x}, pad {:#x})",
            wiring.pin, wiring.mux_mode, wiring.pad_config
        );

        let gpio = Self {
            regs: Mutex::new(regs),
            mask,
            polarity: wiring.polarity,
        };
        gpio.set_pin(LedState::Off);
        Ok(gpio)
    }

    /// Switch the LED.
    pub fn set_pin(&self, state: LedState) {
        let level = self.polarity.level(state);
        let Ok(()) = self.set_level(level);
        trace!("led {:?} (pin {:?})", state, level);
    }

    /// LED state read back from the data register.
    pub fn state(&self) -> LedState {
        let Ok(level) = self.read();
        self.polarity.state(level)
    }

    fn drive(&self, level: PinLevel) {
        let regs = self.regs.lock();
        regs.modify(Register::Data, |val| match level {
            PinLevel::High => val | self.mask,
            PinLevel::Low => val & !self.mask,
        });
    }
}

impl OutputPin for GpioController {
    type Error = Infallible;

    fn set_high(&self) -> Result<(), Self::Error> {
        self.drive(PinLevel::High);
        Ok(())
    }

    fn set_low(&self) -> Result<(), Self::Error> {
        self.drive(PinLevel::Low);
        Ok(())
    }
}

impl StatefulOutputPin for GpioController {
    fn read(&self) -> Result<PinLevel, Self::Error> {
        let regs = self.regs.lock();
        Ok(PinLevel::from(regs.read(Register::Data) & self.mask != 0))
    }
}
