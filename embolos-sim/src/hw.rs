//! Host implementations of the hal traits
//!
//! The clock is real wall time, buttons are shared flags toggled from the
//! serial console, and output pins are plain state (the only observer is
//! the log).

use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use embolos_hal::gpio::{InputPin, OutputPin};
use embolos_hal::serial::{SerialRead, SerialWrite};
use embolos_hal::time::Clock;

/// Monotonic clock over `std::time::Instant`
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    fn delay_us(&mut self, us: u32) {
        // Only ever microsecond-scale (the step pulse width); spin rather
        // than sleep, the OS timer granularity is far coarser
        let target = self.start.elapsed() + Duration::from_micros(u64::from(us));
        while self.start.elapsed() < target {
            std::hint::spin_loop();
        }
    }
}

/// Active-low button backed by a shared flag
#[derive(Clone)]
pub struct SimButton {
    pressed: Arc<AtomicBool>,
}

impl SimButton {
    pub fn new() -> Self {
        Self {
            pressed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for the console command that presses/releases the button
    pub fn handle(&self) -> Arc<AtomicBool> {
        self.pressed.clone()
    }
}

impl InputPin for SimButton {
    fn is_high(&self) -> bool {
        // Pull-up wiring: released reads high
        !self.pressed.load(Ordering::Relaxed)
    }
}

/// Output pin that just remembers its level
#[derive(Debug, Default)]
pub struct SimPin {
    level: bool,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        self.level = true;
    }

    fn set_low(&mut self) {
        self.level = false;
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}

/// Serial channel over stdin/stdout
///
/// Stdin has no portable non-blocking mode, so a reader thread pumps bytes
/// into a channel the loop can poll.
pub struct StdSerial {
    rx: Receiver<u8>,
}

impl StdSerial {
    pub fn new() -> Self {
        let (tx, rx): (Sender<u8>, Receiver<u8>) = std::sync::mpsc::channel();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut buf = [0u8; 64];
            loop {
                match stdin.lock().read(&mut buf) {
                    Ok(0) | Err(_) => break, // EOF: console goes quiet
                    Ok(n) => {
                        for &byte in &buf[..n] {
                            if tx.send(byte).is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        });
        Self { rx }
    }
}

impl SerialRead for StdSerial {
    fn read_byte(&mut self) -> Option<u8> {
        match self.rx.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl SerialWrite for StdSerial {
    fn write_bytes(&mut self, data: &[u8]) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(data);
        let _ = stdout.flush();
    }
}
