use chrled::{LifecycleState, module_exit, module_init, with_device};
use common::Errno;
use common::host::PhysAddr;
use common::host::sim::{SimKernel, SimOp};
use drivers::hw::imx6ull::gpio::GPIO1_DR;
use drivers::LedState;
use std::sync::Arc;

// The entry points share one global slot, so the whole sequence runs in a
// single test.
#[test]
fn entry_points_manage_the_global_device() {
    // Malformed parameters.
    let kernel = Arc::new(SimKernel::new());
    assert_eq!(module_init(kernel.clone(), "major=abc"), Errno::EINVAL.to_status());
    assert_eq!(kernel.mapped_count(), 0);
    assert!(with_device(|_| ()).is_none());

    // Failing node creation leaves nothing behind.
    kernel.fail(SimOp::DeviceCreate, Errno::EEXIST);
    assert_eq!(module_init(kernel.clone(), ""), Errno::EEXIST.to_status());
    assert_eq!(kernel.live_resources(), 0);
    assert_eq!(kernel.mapped_count(), 0);
    assert!(with_device(|_| ()).is_none());
    kernel.clear_faults();

    // Successful load.
    assert_eq!(module_init(kernel.clone(), "major=231"), 0);
    assert_eq!(
        with_device(|led| (led.state(), led.devt().map(|d| d.major()))),
        Some((LifecycleState::Active, Some(231)))
    );

    // Second load is refused and does not disturb the first.
    let other = Arc::new(SimKernel::new());
    assert_eq!(module_init(other.clone(), ""), Errno::EBUSY.to_status());
    assert_eq!(other.live_resources(), 0);
    assert_eq!(kernel.live_resources(), 4);

    let mut file = kernel.open("newchrdev").unwrap();
    file.write(&[0x01]).unwrap();
    assert_eq!(with_device(|led| led.led_state()), Some(LedState::On));
    drop(file);

    module_exit();
    assert!(with_device(|_| ()).is_none());
    assert!(!kernel.node_exists("newchrdev"));
    assert_eq!(kernel.live_resources(), 0);
    assert_eq!(kernel.read_register(PhysAddr(GPIO1_DR)) & (1 << 3), 1 << 3);

    // Unloading twice is harmless.
    module_exit();
}
