//! The cooperative loop
//!
//! One logical thread, no executor. [`Dispenser::poll`] is one iteration;
//! the host calls it as fast as it can. Iteration order, every pass:
//!
//! 1. drain serial command input (at most one complete line)
//! 2. on the 200 ms cadence, poll the tag tracker and mirror its latch
//!    into the router
//! 3. sample the buttons, arbitrate, drive the actuator
//! 4. update the actuator (at most one pulse)
//! 5. service one bounded batch of pending HTTP requests
//!
//! No step blocks longer than the pulse width except the deliberately
//! bounded RFID read; anything slower would starve pulse timing and
//! button responsiveness.

use embolos_hal::fs::FlatStorage;
use embolos_hal::gpio::{InputPin, OutputPin};
use embolos_hal::serial::{SerialRead, SerialWrite};
use embolos_hal::time::Clock;

use crate::config::{HTTP_BATCH_PER_ITERATION, RFID_POLL_INTERVAL_MS};
use crate::console::{CommandHandler, SerialConsole};
use crate::input::InputArbiter;
use crate::pulse::PulseActuator;
use crate::router::RequestRouter;
use crate::tag::TagTracker;
use crate::traits::http::HttpTransport;
use crate::traits::rfid::TagReader;

/// The whole device: every component, one `poll` entry point
pub struct Dispenser<C, R, W, D, SP, DP, F, T, S>
where
    C: Clock,
    R: TagReader,
    W: InputPin,
    D: InputPin,
    SP: OutputPin,
    DP: OutputPin,
    F: FlatStorage,
    T: HttpTransport,
    S: SerialRead + SerialWrite,
{
    clock: C,
    tags: TagTracker<R>,
    buttons: InputArbiter<W, D>,
    actuator: PulseActuator<SP, DP>,
    router: RequestRouter<F>,
    transport: T,
    serial: S,
    console: SerialConsole,
    last_tag_poll_ms: u32,
}

impl<C, R, W, D, SP, DP, F, T, S> Dispenser<C, R, W, D, SP, DP, F, T, S>
where
    C: Clock,
    R: TagReader,
    W: InputPin,
    D: InputPin,
    SP: OutputPin,
    DP: OutputPin,
    F: FlatStorage,
    T: HttpTransport,
    S: SerialRead + SerialWrite,
{
    pub fn new(
        clock: C,
        tags: TagTracker<R>,
        buttons: InputArbiter<W, D>,
        actuator: PulseActuator<SP, DP>,
        router: RequestRouter<F>,
        transport: T,
        serial: S,
    ) -> Self {
        Self {
            clock,
            tags,
            buttons,
            actuator,
            router,
            transport,
            serial,
            console: SerialConsole::new(),
            last_tag_poll_ms: 0,
        }
    }

    /// Run one loop iteration
    ///
    /// Returns a newly latched tag id when one appears, so the host can
    /// log it; all other effects happen through the injected capabilities.
    pub fn poll<H: CommandHandler>(&mut self, commands: &mut H) -> Option<u32> {
        self.console.drain(&mut self.serial, commands);

        let mut new_tag = None;
        let now_ms = self.clock.now_ms();
        if now_ms.wrapping_sub(self.last_tag_poll_ms) >= RFID_POLL_INTERVAL_MS {
            self.last_tag_poll_ms = now_ms;
            new_tag = self.tags.poll();
            self.router.set_current_tag(self.tags.current_tag());
        }

        match self.buttons.sample().direction() {
            Some(direction) => {
                self.actuator.set_direction(direction);
                self.actuator.set_moving(true);
            }
            None => self.actuator.set_moving(false),
        }
        self.actuator.update(&mut self.clock);

        for _ in 0..HTTP_BATCH_PER_ITERATION {
            let Some(request) = self.transport.poll_request() else {
                break;
            };
            let response = self.router.handle(&request);
            self.transport.send_response(response);
        }

        new_tag
    }

    /// The latched tag as the router currently sees it
    pub fn current_tag(&self) -> u32 {
        self.tags.current_tag()
    }
}
