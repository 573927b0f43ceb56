//! In-memory host kernel for tests.
//!
//! [`SimKernel`] backs every mapped register with a heap word, keeps the
//! device number, cdev, class and node tables, records every successful call
//! as a [`SimEvent`] and fails any call named with [`SimKernel::fail`].
//! Device nodes can be opened and written through [`SimKernel::open`].

use super::chrdev::{CdevId, CharDevRegistry, ClassId, DevT, NodeId};
use super::console::Console;
use super::file::{File, FileOperations, UserBuffer};
use super::io::{IoMapper, PhysAddr};
use crate::errno::Errno;
use crate::error::Error;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::UnsafeCell;
use core::ptr::{NonNull, read_volatile, write_volatile};
use spin::Mutex;

/// First major handed out by `alloc_chrdev_region`, counting down.
pub const DYNAMIC_MAJOR_START: u32 = 254;

/// Host calls that can be made to fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimOp {
    Ioremap(PhysAddr),
    RegisterRegion,
    AllocRegion,
    CdevAdd,
    ClassCreate,
    DeviceCreate,
}

/// Successful host call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Ioremap(PhysAddr),
    Iounmap(PhysAddr),
    RegionRegistered(DevT),
    RegionUnregistered(DevT),
    CdevAdded(DevT),
    CdevDeleted(DevT),
    ClassCreated(String),
    ClassDestroyed(String),
    NodeCreated(String),
    NodeDestroyed(String),
}

struct Region {
    first: DevT,
    count: u32,
}

struct Cdev {
    first: DevT,
    count: u32,
    fops: Arc<dyn FileOperations>,
}

struct Node {
    class: ClassId,
    devt: DevT,
    name: String,
}

struct State {
    memory: BTreeMap<PhysAddr, Box<UnsafeCell<u32>>>,
    /// Virtual address -> (physical address, length).
    mappings: BTreeMap<usize, (PhysAddr, usize)>,
    regions: Vec<Region>,
    cdevs: BTreeMap<CdevId, Cdev>,
    classes: BTreeMap<ClassId, String>,
    nodes: Vec<Node>,
    faults: BTreeMap<SimOp, Errno>,
    events: Vec<SimEvent>,
    next_id: usize,
    next_major: u32,
}

impl State {
    fn check(&self, op: SimOp) -> Result<(), Errno> {
        match self.faults.get(&op) {
            Some(&errno) => Err(errno),
            None => Ok(()),
        }
    }

    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn region_overlaps(&self, first: DevT, count: u32) -> bool {
        self.regions.iter().any(|r| {
            r.first.contains(r.count, first) || first.contains(count, r.first)
        })
    }

    fn cell(&mut self, phys: PhysAddr) -> *mut u32 {
        self.memory
            .entry(phys)
            .or_insert_with(|| Box::new(UnsafeCell::new(0)))
            .get()
    }
}

/// Simulated host kernel.
pub struct SimKernel {
    state: Mutex<State>,
}

impl SimKernel {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                memory: BTreeMap::new(),
                mappings: BTreeMap::new(),
                regions: Vec::new(),
                cdevs: BTreeMap::new(),
                classes: BTreeMap::new(),
                nodes: Vec::new(),
                faults: BTreeMap::new(),
                events: Vec::new(),
                next_id: 0,
                next_major: DYNAMIC_MAJOR_START,
            }),
        }
    }

    /// Make every future `op` fail with `errno`.
    pub fn fail(&self, op: SimOp, errno: Errno) {
        self.state.lock().faults.insert(op, errno);
    }

    pub fn clear_faults(&self) {
        self.state.lock().faults.clear();
    }

    /// Current contents of the register at `phys`, as the hardware sees it.
    pub fn read_register(&self, phys: PhysAddr) -> u32 {
        let mut state = self.state.lock();
        let cell = state.cell(phys);
        unsafe { read_volatile(cell) }
    }

    /// Set the register at `phys`, e.g. to model its reset value.
    pub fn write_register(&self, phys: PhysAddr, value: u32) {
        let mut state = self.state.lock();
        let cell = state.cell(phys);
        unsafe { write_volatile(cell, value) }
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.state.lock().events.clone()
    }

    /// Number of live register mappings.
    pub fn mapped_count(&self) -> usize {
        self.state.lock().mappings.len()
    }

    pub fn region_count(&self) -> usize {
        self.state.lock().regions.len()
    }

    pub fn cdev_count(&self) -> usize {
        self.state.lock().cdevs.len()
    }

    pub fn class_count(&self) -> usize {
        self.state.lock().classes.len()
    }

    pub fn node_count(&self) -> usize {
        self.state.lock().nodes.len()
    }

    /// Regions, cdevs, classes and nodes still registered.
    pub fn live_resources(&self) -> usize {
        let state = self.state.lock();
        state.regions.len() + state.cdevs.len() + state.classes.len() + state.nodes.len()
    }

    pub fn node_exists(&self, name: &str) -> bool {
        self.node_devt(name).is_some()
    }

    pub fn node_devt(&self, name: &str) -> Option<DevT> {
        self.state
            .lock()
            .nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.devt)
    }

    /// Open the device node `name` and run the driver's `open` handler.
    pub fn open(&self, name: &str) -> Result<SimFile, Error> {
        let (devt, fops) = {
            let state = self.state.lock();
            let node = state
                .nodes
                .iter()
                .find(|n| n.name == name)
                .ok_or(Error::NoDevice)?;
            let cdev = state
                .cdevs
                .values()
                .find(|c| c.first.contains(c.count, node.devt))
                .ok_or(Error::NoDevice)?;
            (node.devt, cdev.fops.clone())
        };

        let mut file = File::new(devt);
        fops.open(&mut file)?;
        Ok(SimFile {
            fops,
            file,
            offset: 0,
            released: false,
        })
    }
}

impl Default for SimKernel {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: every mapping points into a boxed word owned by `memory`, which is
// never freed while the kernel lives.
unsafe impl IoMapper for SimKernel {
    fn ioremap(&self, phys: PhysAddr, len: usize) -> Result<NonNull<u8>, Errno> {
        let mut state = self.state.lock();
        state.check(SimOp::Ioremap(phys))?;
        if len != core::mem::size_of::<u32>() {
            return Err(Errno::EINVAL);
        }
        if state.mappings.values().any(|&(p, _)| p == phys) {
            return Err(Errno::EBUSY);
        }

        let virt = NonNull::new(state.cell(phys).cast::<u8>()).ok_or(Errno::ENOMEM)?;
        state.mappings.insert(virt.as_ptr() as usize, (phys, len));
        state.events.push(SimEvent::Ioremap(phys));
        Ok(virt)
    }

    unsafe fn iounmap(&self, virt: NonNull<u8>, len: usize) {
        let mut state = self.state.lock();
        let (phys, mapped_len) = state
            .mappings
            .remove(&(virt.as_ptr() as usize))
            .expect("iounmap of an address that is not mapped");
        assert_eq!(mapped_len, len, "iounmap length mismatch");
        state.events.push(SimEvent::Iounmap(phys));
    }
}

impl CharDevRegistry for SimKernel {
    fn register_chrdev_region(&self, first: DevT, count: u32, _name: &str) -> Result<(), Errno> {
        let mut state = self.state.lock();
        state.check(SimOp::RegisterRegion)?;
        if state.region_overlaps(first, count) {
            return Err(Errno::EBUSY);
        }
        state.regions.push(Region { first, count });
        state.events.push(SimEvent::RegionRegistered(first));
        Ok(())
    }

    fn alloc_chrdev_region(
        &self,
        first_minor: u32,
        count: u32,
        _name: &str,
    ) -> Result<DevT, Errno> {
        let mut state = self.state.lock();
        state.check(SimOp::AllocRegion)?;
        if state.next_major == 0 {
            return Err(Errno::EBUSY);
        }
        let first = DevT::new(state.next_major, first_minor);
        state.next_major -= 1;
        state.regions.push(Region { first, count });
        state.events.push(SimEvent::RegionRegistered(first));
        Ok(first)
    }

    fn unregister_chrdev_region(&self, first: DevT, count: u32) {
        let mut state = self.state.lock();
        let idx = state
            .regions
            .iter()
            .position(|r| r.first == first && r.count == count)
            .expect("unregister of a region that is not registered");
        state.regions.remove(idx);
        state.events.push(SimEvent::RegionUnregistered(first));
    }

    fn cdev_add(
        &self,
        first: DevT,
        count: u32,
        fops: Arc<dyn FileOperations>,
    ) -> Result<CdevId, Errno> {
        let mut state = self.state.lock();
        state.check(SimOp::CdevAdd)?;
        let id = CdevId(state.next_id());
        state.cdevs.insert(id, Cdev { first, count, fops });
        state.events.push(SimEvent::CdevAdded(first));
        Ok(id)
    }

    fn cdev_del(&self, cdev: CdevId) {
        // Dropped outside of the lock: the handler table may own mappings.
        let removed = {
            let mut state = self.state.lock();
            let removed = state
                .cdevs
                .remove(&cdev)
                .expect("cdev_del of a cdev that is not registered");
            state.events.push(SimEvent::CdevDeleted(removed.first));
            removed
        };
        drop(removed);
    }

    fn class_create(&self, name: &str) -> Result<ClassId, Errno> {
        let mut state = self.state.lock();
        state.check(SimOp::ClassCreate)?;
        if state.classes.values().any(|c| c == name) {
            return Err(Errno::EEXIST);
        }
        let id = ClassId(state.next_id());
        state.classes.insert(id, name.to_string());
        state.events.push(SimEvent::ClassCreated(name.to_string()));
        Ok(id)
    }

    fn class_destroy(&self, class: ClassId) {
        let mut state = self.state.lock();
        let name = state
            .classes
            .remove(&class)
            .expect("class_destroy of a class that does not exist");
        state.events.push(SimEvent::ClassDestroyed(name));
    }

    fn device_create(&self, class: ClassId, devt: DevT, name: &str) -> Result<NodeId, Errno> {
        let mut state = self.state.lock();
        state.check(SimOp::DeviceCreate)?;
        if !state.classes.contains_key(&class) {
            return Err(Errno::ENODEV);
        }
        if state.nodes.iter().any(|n| n.name == name) {
            return Err(Errno::EEXIST);
        }
        state.nodes.push(Node {
            class,
            devt,
            name: name.to_string(),
        });
        state.events.push(SimEvent::NodeCreated(name.to_string()));
        Ok(NodeId(state.next_id()))
    }

    fn device_destroy(&self, class: ClassId, devt: DevT) {
        let mut state = self.state.lock();
        let idx = state
            .nodes
            .iter()
            .position(|n| n.class == class && n.devt == devt)
            .expect("device_destroy of a node that does not exist");
        let node = state.nodes.remove(idx);
        state.events.push(SimEvent::NodeDestroyed(node.name));
    }
}

/// Buffer handed to a write handler.
pub struct SimUserBuf<'a> {
    bytes: Option<&'a [u8]>,
    len: usize,
}

impl<'a> SimUserBuf<'a> {
    /// Readable caller memory.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Some(bytes),
            len: bytes.len(),
        }
    }

    /// A `len` byte range the caller cannot actually read.
    pub fn unmapped(len: usize) -> Self {
        Self { bytes: None, len }
    }
}

impl UserBuffer for SimUserBuf<'_> {
    fn len(&self) -> usize {
        self.len
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<(), Errno> {
        match self.bytes {
            Some(src) if src.len() >= dst.len() => {
                dst.copy_from_slice(&src[..dst.len()]);
                Ok(())
            }
            _ => Err(Errno::EFAULT),
        }
    }
}

/// A device file opened through [`SimKernel::open`].
///
/// The driver's `release` handler runs on [`SimFile::close`] or drop.
pub struct SimFile {
    fops: Arc<dyn FileOperations>,
    file: File,
    offset: u64,
    released: bool,
}

impl SimFile {
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        self.fops
            .write(&mut self.file, &SimUserBuf::new(bytes), &mut self.offset)
    }

    /// Write from a `len` byte buffer that faults on access.
    pub fn write_unmapped(&mut self, len: usize) -> Result<usize, Error> {
        self.fops
            .write(&mut self.file, &SimUserBuf::unmapped(len), &mut self.offset)
    }

    pub fn close(mut self) -> Result<(), Error> {
        self.released = true;
        self.fops.release(&mut self.file)
    }
}

impl Drop for SimFile {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.fops.release(&mut self.file);
        }
    }
}

/// Console that keeps everything written to it.
pub struct SimConsole {
    output: Mutex<String>,
}

impl SimConsole {
    pub const fn new() -> Self {
        Self {
            output: Mutex::new(String::new()),
        }
    }

    pub fn contents(&self) -> String {
        self.output.lock().clone()
    }
}

impl Default for SimConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for SimConsole {
    fn write_str(&self, s: &str) {
        self.output.lock().push_str(s);
    }
}
