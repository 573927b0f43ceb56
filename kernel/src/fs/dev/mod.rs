pub mod led_file;

pub use led_file::{LedDevice, LedFile};
