use bitflags::bitflags;

/// Base physical address of the IOMUX controller.
pub const IOMUXC_BASE: usize = 0x020E_0000;

/// Mux control of pad GPIO1_IO03.
pub const SW_MUX_CTL_PAD_GPIO1_IO03: usize = IOMUXC_BASE + 0x68;

/// Pad control of pad GPIO1_IO03.
pub const SW_PAD_CTL_PAD_GPIO1_IO03: usize = IOMUXC_BASE + 0x2F4;

/// `MUX_MODE` values of pad GPIO1_IO03.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gpio1Io03Mux {
    I2c1Sda = 0,
    GptCompare3 = 1,
    Usb2Oc = 2,
    UsdhcCd = 4,
    /// GPIO1_IO03 (ALT5).
    Gpio1Io03 = 5,
    CcmDiSelectIn = 6,
    SrcTesterAck = 7,
    UartRxData = 8,
}

bitflags! {
    /// Pad control attributes (`SW_PAD_CTL_PAD_*`).
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PadCtl: u32 {
        /// Fast slew rate (slow when clear).
        const SRE_FAST = 1 << 0;
        const DSE_R0 = 0b001 << 3;
        const DSE_R0_2 = 0b010 << 3;
        const DSE_R0_3 = 0b011 << 3;
        const DSE_R0_4 = 0b100 << 3;
        const DSE_R0_5 = 0b101 << 3;
        /// R0/6 drive strength.
        const DSE_R0_6 = 0b110 << 3;
        const DSE_R0_7 = 0b111 << 3;
        /// 100MHz.
        const SPEED_MEDIUM = 0b10 << 6;
        /// 200MHz.
        const SPEED_MAX = 0b11 << 6;
        /// Open drain.
        const ODE = 1 << 11;
        /// Pull/keeper enabled.
        const PKE = 1 << 12;
        /// Pull selected instead of keeper.
        const PUE = 1 << 13;
        const PUS_47K_UP = 0b01 << 14;
        const PUS_100K_UP = 0b10 << 14;
        const PUS_22K_UP = 0b11 << 14;
        /// Hysteresis.
        const HYS = 1 << 16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_pad_attributes_encode_to_reference_word() {
        let pad = PadCtl::DSE_R0_6 | PadCtl::SPEED_MEDIUM | PadCtl::PKE;
        assert_eq!(pad.bits(), 0x10B0);
        assert!(!pad.contains(PadCtl::SRE_FAST));
    }

    #[test]
    fn gpio_function_is_alt5() {
        assert_eq!(Gpio1Io03Mux::Gpio1Io03 as u32, 0x5);
        assert_eq!(SW_MUX_CTL_PAD_GPIO1_IO03, 0x020E_0068);
        assert_eq!(SW_PAD_CTL_PAD_GPIO1_IO03, 0x020E_02F4);
    }
}
