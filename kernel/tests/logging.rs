use chrled::kcore::logger;
use chrled::{ChrLed, ModuleConfig};
use common::Errno;
use common::host::sim::{SimConsole, SimKernel, SimOp};
use log::LevelFilter;
use std::sync::Arc;

static CONSOLE: SimConsole = SimConsole::new();

// The logger is process-wide, so everything runs in one test.
#[test]
fn driver_messages_reach_the_console() {
    logger::init(&CONSOLE, LevelFilter::Info).unwrap();
    assert!(logger::init(&CONSOLE, LevelFilter::Info).is_err());

    let kernel = Arc::new(SimKernel::new());
    let led = ChrLed::load(kernel.clone(), ModuleConfig::default()).unwrap();
    let file = kernel.open("newchrdev").unwrap();
    file.close().unwrap();
    led.unload();

    let output = CONSOLE.contents();
    assert!(output.contains("[INFO] chrled::lifecycle: newchrled init!"));
    assert!(output.contains("major:254 minor:0"));
    assert!(output.contains("led open! (254:0)"));
    assert!(output.contains("led release!"));
    assert!(output.contains("newchrled exit!"));
    // Debug output is filtered at Info.
    assert!(!output.contains("mapped"));

    let failing = Arc::new(SimKernel::new());
    failing.fail(SimOp::ClassCreate, Errno::ENOMEM);
    assert!(ChrLed::load(failing, ModuleConfig::default()).is_err());
    assert!(
        CONSOLE
            .contents()
            .contains("class registration failed: ENOMEM")
    );
}
