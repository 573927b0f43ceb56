mod gpio;

pub use gpio::GpioController;

use super::{LedWiring, Platform};
use crate::hal::led::Polarity;
use crate::hw::imx6ull::ccm::{CCM_CCGR1, Ccgr1};
use crate::hw::imx6ull::gpio::{GPIO1_DR, GPIO1_GDIR};
use crate::hw::imx6ull::iomuxc::{
    Gpio1Io03Mux, PadCtl, SW_MUX_CTL_PAD_GPIO1_IO03, SW_PAD_CTL_PAD_GPIO1_IO03,
};
use crate::regmap::RegisterLayout;
use common::host::PhysAddr;

/// Pin of the board LED in GPIO bank 1.
pub const LED_PIN: u8 = 3;

pub struct Imx6ullPlatform;

impl Platform for Imx6ullPlatform {
    fn name() -> &'static str {
        "i.MX6ULL"
    }

    fn led_wiring() -> LedWiring {
        LedWiring {
            layout: RegisterLayout {
                clock_gate: PhysAddr(CCM_CCGR1),
                mux_select: PhysAddr(SW_MUX_CTL_PAD_GPIO1_IO03),
                pad_config: PhysAddr(SW_PAD_CTL_PAD_GPIO1_IO03),
                direction: PhysAddr(GPIO1_GDIR),
                data: PhysAddr(GPIO1_DR),
            },
            clock_gate: Ccgr1::CG13_GPIO1.bits(),
            mux_mode: Gpio1Io03Mux::Gpio1Io03 as u32,
            pad_config: (PadCtl::DSE_R0_6 | PadCtl::SPEED_MEDIUM | PadCtl::PKE).bits(),
            pin: LED_PIN,
            // LED sits between VDD and the pin.
            polarity: Polarity::ActiveLow,
        }
    }
}
