use alloc::string::String;
use alloc::sync::Arc;
use common::Error;
use common::host::{File, FileOperations, UserBuffer};
use drivers::{GpioController, LedState};
use log::{error, info};

/// The single LED device, shared by every open file.
pub struct LedDevice {
    name: String,
    gpio: GpioController,
}

impl LedDevice {
    pub fn new(name: impl Into<String>, gpio: GpioController) -> Self {
        Self {
            name: name.into(),
            gpio,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gpio(&self) -> &GpioController {
        &self.gpio
    }
}

/// Handler table of the LED device file.
pub struct LedFile {
    device: Arc<LedDevice>,
}

impl LedFile {
    pub fn new(device: Arc<LedDevice>) -> Self {
        Self { device }
    }
}

impl FileOperations for LedFile {
    fn open(&self, file: &mut File) -> Result<(), Error> {
        info!("led open! ({})", file.devt());
        file.set_private_data(self.device.clone());
        Ok(())
    }

    /// Consume one byte: `0` turns the LED off, `1` turns it on.
    fn write(
        &self,
        file: &mut File,
        buf: &dyn UserBuffer,
        _offset: &mut u64,
    ) -> Result<usize, Error> {
        let device = file.private_data::<LedDevice>().ok_or(Error::NoDevice)?;
        if buf.is_empty() {
            return Err(Error::InvalidArgument);
        }

        let mut byte = [0u8; 1];
        buf.copy_from_user(&mut byte).map_err(|errno| {
            error!("kernel write failed! ({})", errno);
            Error::CopyFault
        })?;

        let state = LedState::try_from(byte[0])?;
        device.gpio().set_pin(state);
        Ok(byte.len())
    }

    fn release(&self, file: &mut File) -> Result<(), Error> {
        info!("led release!");
        file.clear_private_data();
        Ok(())
    }
}
