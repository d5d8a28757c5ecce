//! Tag tracking
//!
//! Polls the RFID transceiver at the scheduler's cadence and latches the
//! most recently seen non-zero tag. Empty reads leave the latch alone, so
//! a base stays "current" after it is lifted off the reader until another
//! one shows up.

use crate::traits::rfid::TagReader;

/// Latches the most recently seen non-zero tag id
#[derive(Debug)]
pub struct TagTracker<R: TagReader> {
    reader: R,
    current: u32,
}

impl<R: TagReader> TagTracker<R> {
    /// Create a tracker with no tag latched
    pub fn new(reader: R) -> Self {
        Self { reader, current: 0 }
    }

    /// Make one bounded read attempt and update the latch
    ///
    /// Returns `Some(tag_id)` only when a *new* tag latches; repeat reads
    /// of the same tag and empty reads return `None`, so the caller can
    /// use the return value for one-shot notification (logging, display).
    pub fn poll(&mut self) -> Option<u32> {
        let uid = self.reader.read_uid()?;
        let tag_id = fold_uid(&uid);
        if tag_id != 0 && tag_id != self.current {
            self.current = tag_id;
            return Some(tag_id);
        }
        None
    }

    /// The latched tag id; 0 means none seen since boot or [`clear`](Self::clear)
    pub fn current_tag(&self) -> u32 {
        self.current
    }

    /// Reset the latch to "no tag"
    pub fn clear(&mut self) {
        self.current = 0;
    }
}

/// Fold a raw UID into the 32-bit tag identity
///
/// Identity is the last 4 bytes of the UID; shorter UIDs fold into the low
/// bytes. Longer UIDs (7- and 10-byte ISO 14443A) therefore collide when
/// they share a tail - a known, accepted risk kept for compatibility with
/// keys already stored under this rule.
pub fn fold_uid(uid: &[u8]) -> u32 {
    let start = uid.len().saturating_sub(4);
    uid[start..]
        .iter()
        .fold(0u32, |value, &byte| (value << 8) | u32::from(byte))
}
