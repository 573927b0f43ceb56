//! i.MX6ULL register definitions used by the LED driver.
//!
//! Addresses and fields follow the i.MX 6ULL Applications Processor
//! Reference Manual.

pub mod ccm;
pub mod gpio;
pub mod iomuxc;
