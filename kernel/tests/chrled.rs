use chrled::{ChrLed, LifecycleState, ModuleConfig};
use common::host::PhysAddr;
use common::host::sim::{SimEvent, SimKernel, SimOp};
use common::{Errno, Error, RegistrationStage};
use drivers::hw::imx6ull::gpio::GPIO1_DR;
use drivers::{CurrentPlatform, LedState, Platform, Register};
use std::sync::Arc;
use std::thread;

const DR: PhysAddr = PhysAddr(GPIO1_DR);
const LED_BIT: u32 = 1 << 3;

fn load(kernel: &Arc<SimKernel>) -> ChrLed {
    ChrLed::load(kernel.clone(), ModuleConfig::default()).unwrap()
}

fn led_bit(kernel: &SimKernel) -> u32 {
    kernel.read_register(DR) & LED_BIT
}

#[test]
fn load_registers_every_resource() {
    let kernel = Arc::new(SimKernel::new());
    let led = load(&kernel);

    assert_eq!(led.state(), LifecycleState::Active);
    assert!(led.identity().is_complete());
    assert!(kernel.node_exists("newchrdev"));
    assert_eq!(kernel.region_count(), 1);
    assert_eq!(kernel.cdev_count(), 1);
    assert_eq!(kernel.class_count(), 1);
    assert_eq!(kernel.node_count(), 1);
    assert_eq!(kernel.mapped_count(), 5);
    assert_eq!(led.led_state(), LedState::Off);
}

#[test]
fn mapping_failure_registers_nothing() {
    let layout = CurrentPlatform::led_wiring().layout;

    for reg in Register::ALL {
        let kernel = Arc::new(SimKernel::new());
        let phys = layout.address(reg);
        kernel.fail(SimOp::Ioremap(phys), Errno::ENOMEM);

        let err = ChrLed::load(kernel.clone(), ModuleConfig::default()).err();
        assert!(matches!(err, Some(Error::Map(e)) if e.phys == phys), "{reg}");
        assert_eq!(kernel.live_resources(), 0);
        assert_eq!(kernel.mapped_count(), 0);
        assert!(
            !kernel
                .events()
                .iter()
                .any(|e| matches!(e, SimEvent::RegionRegistered(_)))
        );
    }
}

#[test]
fn registration_failure_releases_registers_too() {
    for op in [
        SimOp::AllocRegion,
        SimOp::CdevAdd,
        SimOp::ClassCreate,
        SimOp::DeviceCreate,
    ] {
        let kernel = Arc::new(SimKernel::new());
        kernel.fail(op, Errno::ENOMEM);

        let err = ChrLed::load(kernel.clone(), ModuleConfig::default()).err();
        assert!(matches!(err, Some(Error::Registration(_))), "{op:?}");
        assert_eq!(kernel.live_resources(), 0, "{op:?}");
        assert_eq!(kernel.mapped_count(), 0, "{op:?}");
        assert!(!kernel.node_exists("newchrdev"));
    }
}

#[test]
fn class_failure_reports_the_stage() {
    let kernel = Arc::new(SimKernel::new());
    kernel.fail(SimOp::ClassCreate, Errno::ENOMEM);

    match ChrLed::load(kernel.clone(), ModuleConfig::default()) {
        Err(Error::Registration(err)) => {
            assert_eq!(err.stage, RegistrationStage::Class);
            assert_eq!(err.errno, Errno::ENOMEM);
        }
        _ => panic!("expected a class registration error"),
    }
}

#[test]
fn one_is_on_and_zero_is_off() {
    let kernel = Arc::new(SimKernel::new());
    let _led = load(&kernel);
    let mut file = kernel.open("newchrdev").unwrap();

    assert_eq!(file.write(&[0x01]), Ok(1));
    assert_eq!(led_bit(&kernel), 0);

    assert_eq!(file.write(&[0x00]), Ok(1));
    assert_eq!(led_bit(&kernel), LED_BIT);
}

#[test]
fn invalid_bytes_are_rejected_without_effect() {
    let kernel = Arc::new(SimKernel::new());
    kernel.write_register(DR, 0x5A00_0000);
    let led = load(&kernel);
    let mut file = kernel.open("newchrdev").unwrap();
    file.write(&[0x01]).unwrap();
    let before = kernel.read_register(DR);

    for byte in 0x02..=0xFFu8 {
        assert_eq!(file.write(&[byte]), Err(Error::InvalidArgument));
    }
    assert_eq!(kernel.read_register(DR), before);
    assert_eq!(led.led_state(), LedState::On);
}

#[test]
fn copy_fault_is_reported_without_effect() {
    let kernel = Arc::new(SimKernel::new());
    let led = load(&kernel);
    let mut file = kernel.open("newchrdev").unwrap();

    assert_eq!(file.write_unmapped(1), Err(Error::CopyFault));
    assert_eq!(Error::CopyFault.to_errno(), Errno::EFAULT);
    assert_eq!(led.led_state(), LedState::Off);
    assert_eq!(led.state(), LifecycleState::Active);
}

#[test]
fn writing_on_twice_equals_once() {
    let kernel = Arc::new(SimKernel::new());
    kernel.write_register(DR, 0x0000_0101);
    let _led = load(&kernel);
    let mut file = kernel.open("newchrdev").unwrap();

    file.write(&[0x01]).unwrap();
    let once = kernel.read_register(DR);
    file.write(&[0x01]).unwrap();
    assert_eq!(kernel.read_register(DR), once);
}

#[test]
fn on_off_on_ends_on() {
    let kernel = Arc::new(SimKernel::new());
    let led = load(&kernel);
    let mut file = kernel.open("newchrdev").unwrap();

    for byte in [0x01, 0x00, 0x01] {
        file.write(&[byte]).unwrap();
    }
    assert_eq!(led.led_state(), LedState::On);
    assert_eq!(led_bit(&kernel), 0);
}

#[test]
fn load_write_reject_unload() {
    let kernel = Arc::new(SimKernel::new());
    let led = load(&kernel);

    let mut file = kernel.open("newchrdev").unwrap();
    assert_eq!(file.write(&[0x01]), Ok(1));
    assert_eq!(led.led_state(), LedState::On);

    assert_eq!(file.write(&[0x02]), Err(Error::InvalidArgument));
    assert_eq!(led.led_state(), LedState::On);
    file.close().unwrap();

    led.unload();
    assert_eq!(led_bit(&kernel), LED_BIT);
    assert!(!kernel.node_exists("newchrdev"));
    assert_eq!(kernel.live_resources(), 0);
    assert_eq!(kernel.mapped_count(), 0);
}

#[test]
fn unload_tears_down_in_reverse_then_unmaps() {
    let kernel = Arc::new(SimKernel::new());
    let led = load(&kernel);
    let devt = led.devt().unwrap();
    let start = kernel.events().len();

    led.unload();

    let events = kernel.events();
    let name = String::from("newchrdev");
    assert_eq!(
        events[start..start + 4],
        [
            SimEvent::NodeDestroyed(name.clone()),
            SimEvent::ClassDestroyed(name),
            SimEvent::CdevDeleted(devt),
            SimEvent::RegionUnregistered(devt),
        ]
    );
    let unmaps = events[start + 4..]
        .iter()
        .filter(|e| matches!(e, SimEvent::Iounmap(_)))
        .count();
    assert_eq!(unmaps, 5);
}

#[test]
fn static_major_is_used_for_the_node() {
    let kernel = Arc::new(SimKernel::new());
    let led = ChrLed::load(kernel.clone(), ModuleConfig::default().with_major(200)).unwrap();

    let devt = led.devt().unwrap();
    assert_eq!((devt.major(), devt.minor()), (200, 0));
    assert_eq!(kernel.node_devt("newchrdev"), Some(devt));
}

#[test]
fn oversized_static_major_fails_the_load() {
    let kernel = Arc::new(SimKernel::new());
    let config = ModuleConfig::default().with_major(4096 + 200);

    let err = ChrLed::load(kernel.clone(), config).err();
    assert!(matches!(err, Some(Error::InvalidArgument)));
    assert_eq!(kernel.region_count(), 0);
    assert_eq!(kernel.live_resources(), 0);
    assert_eq!(kernel.mapped_count(), 0);
}

#[test]
fn concurrent_writers_keep_other_pins() {
    let kernel = Arc::new(SimKernel::new());
    kernel.write_register(DR, 0xFFFF_0000);
    let led = load(&kernel);

    let writers: Vec<_> = (0..4u8)
        .map(|i| {
            let kernel = kernel.clone();
            thread::spawn(move || {
                let mut file = kernel.open("newchrdev").unwrap();
                for n in 0..500u32 {
                    let byte = ((n + u32::from(i)) % 2) as u8;
                    file.write(&[byte]).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(kernel.read_register(DR) & !LED_BIT, 0xFFFF_0000);
    led.unload();
    assert_eq!(kernel.read_register(DR), 0xFFFF_0000 | LED_BIT);
}
