//! RFID transceiver trait
//!
//! Abstracts over the tag reader hardware (PN532 over I2C on the real
//! device). The low-level protocol driver is out of scope here; the core
//! only needs "one bounded attempt to read a UID".

use heapless::Vec;

/// Longest raw UID the reader can report (ISO 14443A triple-size UID)
pub const MAX_UID_LEN: usize = 10;

/// Raw tag UID bytes as reported by the transceiver
pub type Uid = Vec<u8, MAX_UID_LEN>;

/// Tag reader capability
pub trait TagReader {
    /// Make one bounded-duration read attempt
    ///
    /// Returns the raw UID if a tag was in the field, `None` if not (or if
    /// the attempt timed out - a timeout is "no tag this cycle", never an
    /// error). Implementations must cap the attempt at ~120 ms so the
    /// scheduler's 200 ms polling cadence holds.
    fn read_uid(&mut self) -> Option<Uid>;
}
