//! Board-agnostic core logic for the single-syringe dispenser firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - RFID-keyed metadata store over flat-file storage
//! - Tag tracker (polling, debouncing, latching)
//! - Step pulse actuator for the plunger stepper
//! - Button arbitration into motion commands
//! - HTTP request router for the metadata API
//! - Serial command console framing
//! - The cooperative loop tying them together
//!
//! Everything runs on one logical thread: the scheduler's `poll` is the
//! only entry point at runtime, and no step inside it blocks for longer
//! than the step pulse width or the bounded RFID read.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod pulse;
pub mod router;
pub mod scheduler;
pub mod store;
pub mod tag;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::Error;
