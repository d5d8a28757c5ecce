//! Embolos Hardware Abstraction Layer
//!
//! This crate defines the hardware capability traits the dispenser core is
//! written against. Board crates (or the host simulator) implement them for
//! their platform, which keeps every piece of application logic buildable
//! and testable without hardware.
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`time::Clock`] - Monotonic time and microsecond delays
//! - [`serial::SerialRead`], [`serial::SerialWrite`] - Command channel bytes
//! - [`fs::FlatStorage`] - Flat-file persistent storage

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod fs;
pub mod gpio;
pub mod serial;
pub mod time;

// Re-export key traits at crate root for convenience
pub use fs::{FlatStorage, FsError};
pub use gpio::{InputPin, OutputPin};
pub use serial::{SerialRead, SerialWrite};
pub use time::Clock;
