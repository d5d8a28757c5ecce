//! Simulated tag reader
//!
//! The console presents or removes a tag; the reader synthesizes a
//! 4-byte UID from the presented value, like a classic Mifare card.

use std::sync::{Arc, Mutex};

use embolos_core::traits::rfid::{TagReader, Uid};

/// Shared cell holding the currently presented tag, if any
pub type PresentedTag = Arc<Mutex<Option<u32>>>;

pub struct SimTagReader {
    presented: PresentedTag,
}

impl SimTagReader {
    pub fn new(presented: PresentedTag) -> Self {
        Self { presented }
    }
}

impl TagReader for SimTagReader {
    fn read_uid(&mut self) -> Option<Uid> {
        let value = (*self.presented.lock().ok()?)?;
        let mut uid = Uid::new();
        for byte in value.to_be_bytes() {
            // Capacity is 10, a u32 always fits
            let _ = uid.push(byte);
        }
        Some(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embolos_core::tag::fold_uid;

    #[test]
    fn test_presented_tag_round_trips_through_fold() {
        let presented: PresentedTag = Arc::new(Mutex::new(Some(0x1A2B_3C4D)));
        let mut reader = SimTagReader::new(presented.clone());

        let uid = reader.read_uid().unwrap();
        assert_eq!(fold_uid(&uid), 0x1A2B_3C4D);

        *presented.lock().unwrap() = None;
        assert!(reader.read_uid().is_none());
    }
}
