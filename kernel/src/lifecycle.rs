//! Device registration state machine.
//!
//! ```text
//! Unregistered -> NumberAllocated -> CdevRegistered -> ClassCreated
//!              -> NodeCreated -> Active
//! ```
//!
//! Any failure, and unload, unwinds the completed steps in reverse order
//! and ends in `TornDown`. Each step is undone exactly once; steps that
//! never completed are never undone.

use crate::config::ModuleConfig;
use crate::fs::dev::{LedDevice, LedFile};
use alloc::string::String;
use alloc::sync::Arc;
use common::host::{CdevId, CharDevRegistry, ClassId, DevT, FileOperations, IoMapper, NodeId};
use common::{Error, RegistrationError, RegistrationStage};
use drivers::{CurrentPlatform, GpioController, LedState, LedWiring, Platform};
use log::{error, info};

/// Registration progress of the device identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Unregistered,
    NumberAllocated,
    CdevRegistered,
    ClassCreated,
    NodeCreated,
    Active,
    /// Terminal; reached after a failed load or after unload.
    TornDown,
}

/// Device number, cdev, class and node of the LED device.
///
/// Dropping an identity that is not torn down unwinds it.
pub struct DeviceIdentity {
    registry: Arc<dyn CharDevRegistry>,
    name: String,
    count: u32,
    state: LifecycleState,
    devt: Option<DevT>,
    cdev: Option<CdevId>,
    class: Option<ClassId>,
    node: Option<NodeId>,
}

impl DeviceIdentity {
    /// Register the device with `fops` as its handler table.
    ///
    /// On failure everything registered so far is released before the
    /// error is returned.
    pub fn register(
        registry: Arc<dyn CharDevRegistry>,
        config: &ModuleConfig,
        fops: Arc<dyn FileOperations>,
    ) -> Result<Self, Error> {
        let mut identity = Self {
            registry,
            name: config.name.clone(),
            count: config.count,
            state: LifecycleState::Unregistered,
            devt: None,
            cdev: None,
            class: None,
            node: None,
        };

        match identity.acquire(config, fops) {
            Ok(()) => Ok(identity),
            Err(err) => {
                error!("{} init failed at {:?}: {}", identity.name, identity.state, err);
                identity.unwind();
                Err(err)
            }
        }
    }

    fn acquire(&mut self, config: &ModuleConfig, fops: Arc<dyn FileOperations>) -> Result<(), Error> {
        use RegistrationStage::*;

        let devt = match config.major {
            Some(major) => {
                let devt =
                    DevT::checked(major, config.first_minor).ok_or(Error::InvalidArgument)?;
                self.registry
                    .register_chrdev_region(devt, self.count, &self.name)
                    .map_err(|e| RegistrationError::new(DeviceNumber, e))?;
                devt
            }
            None => self
                .registry
                .alloc_chrdev_region(config.first_minor, self.count, &self.name)
                .map_err(|e| RegistrationError::new(DeviceNumber, e))?,
        };
        self.devt = Some(devt);
        self.state = LifecycleState::NumberAllocated;
        info!("major:{} minor:{}", devt.major(), devt.minor());

        let cdev = self
            .registry
            .cdev_add(devt, self.count, fops)
            .map_err(|e| RegistrationError::new(Cdev, e))?;
        self.cdev = Some(cdev);
        self.state = LifecycleState::CdevRegistered;

        let class = self
            .registry
            .class_create(&self.name)
            .map_err(|e| RegistrationError::new(Class, e))?;
        self.class = Some(class);
        self.state = LifecycleState::ClassCreated;

        let node = self
            .registry
            .device_create(class, devt, &self.name)
            .map_err(|e| RegistrationError::new(Node, e))?;
        self.node = Some(node);
        self.state = LifecycleState::NodeCreated;

        self.state = LifecycleState::Active;
        Ok(())
    }

    /// Undo the completed steps, last one first.
    fn unwind(&mut self) {
        if self.node.take().is_some() {
            if let (Some(class), Some(devt)) = (self.class, self.devt) {
                self.registry.device_destroy(class, devt);
            }
        }
        if let Some(class) = self.class.take() {
            self.registry.class_destroy(class);
        }
        if let Some(cdev) = self.cdev.take() {
            self.registry.cdev_del(cdev);
        }
        if let Some(devt) = self.devt.take() {
            self.registry.unregister_chrdev_region(devt, self.count);
        }
        self.state = LifecycleState::TornDown;
    }

    /// Remove the node, class, cdev and device number.
    pub fn teardown(mut self) {
        self.unwind();
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn devt(&self) -> Option<DevT> {
        self.devt
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether all four sub-resources are held.
    pub fn is_complete(&self) -> bool {
        self.devt.is_some() && self.cdev.is_some() && self.class.is_some() && self.node.is_some()
    }
}

impl Drop for DeviceIdentity {
    fn drop(&mut self) {
        if self.state != LifecycleState::TornDown {
            self.unwind();
        }
    }
}

/// The loaded driver: brought-up LED plus its registered device file.
pub struct ChrLed {
    device: Arc<LedDevice>,
    identity: DeviceIdentity,
}

impl ChrLed {
    /// Bring up the LED of the current platform and register the device.
    pub fn load<K>(kernel: Arc<K>, config: ModuleConfig) -> Result<Self, Error>
    where
        K: IoMapper + CharDevRegistry + 'static,
    {
        Self::load_with(kernel, config, &CurrentPlatform::led_wiring())
    }

    /// Like [`ChrLed::load`] with explicit board wiring.
    pub fn load_with<K>(kernel: Arc<K>, config: ModuleConfig, wiring: &LedWiring) -> Result<Self, Error>
    where
        K: IoMapper + CharDevRegistry + 'static,
    {
        info!("newchrled init! ({})", CurrentPlatform::name());

        let mapper: Arc<dyn IoMapper> = kernel.clone();
        let gpio = GpioController::bring_up(mapper, wiring).inspect_err(|err| {
            error!("{} gpio bring-up failed: {}", config.name, Error::from(*err));
        })?;

        let device = Arc::new(LedDevice::new(config.name.clone(), gpio));
        let fops: Arc<dyn FileOperations> = Arc::new(LedFile::new(device.clone()));
        let identity = DeviceIdentity::register(kernel, &config, fops)?;

        Ok(Self { device, identity })
    }

    /// Turn the LED off and release the device.
    pub fn unload(self) {
        info!("newchrled exit!");
        self.device.gpio().set_pin(LedState::Off);
        self.identity.teardown();
    }

    pub fn state(&self) -> LifecycleState {
        self.identity.state()
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn devt(&self) -> Option<DevT> {
        self.identity.devt()
    }

    pub fn led_state(&self) -> LedState {
        self.device.gpio().state()
    }
}
