use bitflags::bitflags;

/// Base physical address of the Clock Controller Module.
pub const CCM_BASE: usize = 0x020C_4000;

/// CCM Clock Gating Register 1.
pub const CCM_CCGR1: usize = CCM_BASE + 0x6C;

bitflags! {
    /// Clock gate fields of `CCM_CCGR1`.
    ///
    /// Every gate is a 2-bit field; `0b11` keeps the clock running in all
    /// modes except STOP.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Ccgr1: u32 {
        const CG0_ECSPI1 = 0b11 << 0;
        const CG1_ECSPI2 = 0b11 << 2;
        const CG2_ECSPI3 = 0b11 << 4;
        const CG3_ECSPI4 = 0b11 << 6;
        const CG5_UART3 = 0b11 << 10;
        const CG12_UART4 = 0b11 << 24;
        /// gpio1_clk_enable
        const CG13_GPIO1 = 0b11 << 26;
        /// gpio5_clk_enable
        const CG15_GPIO5 = 0b11 << 30;
    }
}
