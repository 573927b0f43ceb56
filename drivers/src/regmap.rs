//! Mapped control registers of the LED pin.
//!
//! [`RegisterMap`] maps the five registers the driver programs through the
//! host [`IoMapper`], each exactly once, and unmaps all of them together when
//! it is dropped. Register contents are only reachable through the map, by
//! [`Register`] name; nothing outside this module sees an address.

use alloc::sync::Arc;
use alloc::vec::Vec;
use common::MapError;
use common::host::{IoMapper, PhysAddr};
use core::fmt;
use core::ptr::{NonNull, read_volatile, write_volatile};
use log::{debug, error};

/// Width of every control register, in bytes.
pub const REGISTER_WIDTH: usize = core::mem::size_of::<u32>();

/// Control registers touched by the driver, in mapping order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Register {
    /// Clock gate control of the GPIO bank.
    ClockGate = 0,
    /// Pin multiplexer select.
    MuxSelect = 1,
    /// Pad electrical attributes.
    PadConfig = 2,
    /// GPIO direction.
    Direction = 3,
    /// GPIO data.
    Data = 4,
}

impl Register {
    pub const ALL: [Register; 5] = [
        Register::ClockGate,
        Register::MuxSelect,
        Register::PadConfig,
        Register::Direction,
        Register::Data,
    ];
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Register::ClockGate => "clock gate",
            Register::MuxSelect => "mux select",
            Register::PadConfig => "pad config",
            Register::Direction => "direction",
            Register::Data => "data",
        })
    }
}

/// Physical addresses of the control registers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisterLayout {
    pub clock_gate: PhysAddr,
    pub mux_select: PhysAddr,
    pub pad_config: PhysAddr,
    pub direction: PhysAddr,
    pub data: PhysAddr,
}

impl RegisterLayout {
    pub fn address(&self, reg: Register) -> PhysAddr {
        match reg {
            Register::ClockGate => self.clock_gate,
            Register::MuxSelect => self.mux_select,
            Register::PadConfig => self.pad_config,
            Register::Direction => self.direction,
            Register::Data => self.data,
        }
    }
}

/// One mapped 32-bit register.
struct RegisterHandle {
    phys: PhysAddr,
    virt: NonNull<u32>,
}

// SAFETY: the mapping is owned by exactly one handle and all accesses are
// volatile word accesses; writers of the data register are serialized by
// the GPIO controller.
unsafe impl Send for RegisterHandle {}
unsafe impl Sync for RegisterHandle {}

impl RegisterHandle {
    fn acquire(mapper: &dyn IoMapper, phys: PhysAddr) -> Result<Self, MapError> {
        let virt = mapper
            .ioremap(phys, REGISTER_WIDTH)
            .map_err(|errno| MapError { phys, errno })?;
        Ok(Self {
            phys,
            virt: virt.cast(),
        })
    }

    /// # Safety
    ///
    /// `mapper` must be the mapper the handle was acquired from.
    unsafe fn release(self, mapper: &dyn IoMapper) {
        unsafe { mapper.iounmap(self.virt.cast(), REGISTER_WIDTH) }
    }

    #[inline(always)]
    fn read_word(&self) -> u32 {
        unsafe { read_volatile(self.virt.as_ptr()) }
    }

    #[inline(always)]
    fn write_word(&self, value: u32) {
        unsafe { write_volatile(self.virt.as_ptr(), value) }
    }
}

/// The mapped control registers.
pub struct RegisterMap {
    mapper: Arc<dyn IoMapper>,
    /// Indexed by `Register as usize`.
    handles: Vec<RegisterHandle>,
}

impl RegisterMap {
    /// Map every register of `layout`.
    ///
    /// If one mapping fails, the registers mapped before it are unmapped in
    /// reverse order and the failure is returned.
    pub fn map(mapper: Arc<dyn IoMapper>, layout: &RegisterLayout) -> Result<Self, MapError> {
        let mut handles = Vec::with_capacity(Register::ALL.len());

        for reg in Register::ALL {
            match RegisterHandle::acquire(&*mapper, layout.address(reg)) {
                Ok(handle) => {
                    debug!("mapped {} register at {}", reg, handle.phys);
                    handles.push(handle);
                }
                Err(err) => {
                    error!("ioremap of {} register at {} failed: {}", reg, err.phys, err.errno);
                    while let Some(handle) = handles.pop() {
                        unsafe { handle.release(&*mapper) };
                    }
                    return Err(err);
                }
            }
        }

        Ok(Self { mapper, handles })
    }

    fn handle(&self, reg: Register) -> &RegisterHandle {
        &self.handles[reg as usize]
    }

    /// Physical address `reg` is mapped from.
    pub fn phys(&self, reg: Register) -> PhysAddr {
        self.handle(reg).phys
    }

    pub fn read(&self, reg: Register) -> u32 {
        self.handle(reg).read_word()
    }

    pub fn write(&self, reg: Register, value: u32) {
        self.handle(reg).write_word(value)
    }

    /// Read-modify-write of `reg`.
    ///
    /// Not atomic: callers sharing the register must hold a lock.
    pub fn modify<F>(&self, reg: Register, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let handle = self.handle(reg);
        let value = handle.read_word();
        handle.write_word(f(value));
    }
}

impl Drop for RegisterMap {
    fn drop(&mut self) {
        while let Some(handle) = self.handles.pop() {
            debug!("unmapping register at {}", handle.phys);
            unsafe { handle.release(&*self.mapper) };
        }
    }
}
