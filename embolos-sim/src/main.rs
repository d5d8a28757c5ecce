//! Host simulator for the dispenser firmware
//!
//! Runs the core's cooperative loop against host stand-ins: wall-clock
//! time, a directory for flat storage, a TCP listener for HTTP, stdin
//! for the serial console. Buttons and the RFID reader are driven from
//! console commands (`help` lists them).
//!
//! Usage: `embolos-sim [data-dir] [bind-addr]`
//! (defaults: `./embolos-data`, `127.0.0.1:8080`)

mod commands;
mod fs;
mod http;
mod hw;
mod rfid;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{info, warn};

use embolos_core::config::PulseConfig;
use embolos_core::input::InputArbiter;
use embolos_core::pulse::PulseActuator;
use embolos_core::router::RequestRouter;
use embolos_core::scheduler::Dispenser;
use embolos_core::store::MetadataStore;
use embolos_core::tag::TagTracker;

use crate::commands::SimCommands;
use crate::fs::DirFs;
use crate::http::TcpTransport;
use crate::hw::{SimButton, SimPin, StdSerial, SystemClock};
use crate::rfid::{PresentedTag, SimTagReader};

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| String::from("embolos-data"));
    let bind_addr = args.next().unwrap_or_else(|| String::from("127.0.0.1:8080"));

    let mut store = MetadataStore::new(DirFs::new(&data_dir));
    if let Err(err) = store.init() {
        // The device keeps dispensing without its metadata; so do we
        warn!("metadata store unavailable ({err:?}), continuing without it");
    } else {
        info!("metadata store at {data_dir}/");
    }

    let transport = TcpTransport::bind(&bind_addr)?;
    info!("http on http://{}", transport.local_addr()?);

    let presented: PresentedTag = Arc::new(Mutex::new(None));
    let withdraw = SimButton::new();
    let dispense = SimButton::new();
    let mut console_commands = SimCommands::new(
        presented.clone(),
        withdraw.handle(),
        dispense.handle(),
    );

    let mut dispenser = Dispenser::new(
        SystemClock::new(),
        TagTracker::new(SimTagReader::new(presented)),
        InputArbiter::new(withdraw, dispense),
        PulseActuator::new(SimPin::new(), SimPin::new(), PulseConfig::default()),
        RequestRouter::new(store),
        transport,
        StdSerial::new(),
    );

    info!("ready; type 'help' for console commands");
    loop {
        if let Some(tag) = dispenser.poll(&mut console_commands) {
            info!("tag latched: {tag:08X}");
        }
        // Keep the loop honest without pegging a host core; still far
        // finer than the 800 us step interval
        std::thread::sleep(Duration::from_micros(200));
    }
}
