/// Base physical address of GPIO bank 1.
pub const GPIO1_BASE: usize = 0x0209_C000;

/// Data register offset.
pub const DR: usize = 0x00;
/// Direction register offset (1 = output).
pub const GDIR: usize = 0x04;
/// Pad status register offset.
pub const PSR: usize = 0x08;

pub const GPIO1_DR: usize = GPIO1_BASE + DR;
pub const GPIO1_GDIR: usize = GPIO1_BASE + GDIR;
pub const GPIO1_PSR: usize = GPIO1_BASE + PSR;

/// Pins per bank; one bit each in DR and GDIR.
pub const PINS_PER_BANK: u8 = 32;

/// Bit of `pin` in the bank's DR/GDIR registers.
///
/// `pin` must be below [`PINS_PER_BANK`].
pub const fn pin_mask(pin: u8) -> u32 {
    debug_assert!(pin < PINS_PER_BANK, "gpio pin out of bank range");
    1 << pin
}
