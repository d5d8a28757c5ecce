//! RFID-keyed metadata store
//!
//! One JSON object per tag under `/bases/<8-hex-uppercase>.json`. The store
//! exclusively owns the on-disk representation; callers get independent
//! copies, never references into internal buffers.
//!
//! A failed mount degrades rather than crashes: the store stays unmounted
//! and every operation fails with [`Error::StorageFailure`] until reboot.

pub mod codec;
pub mod record;

pub use record::BaseRecord;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embolos_hal::fs::{FlatStorage, FsError};

use crate::error::Error;

/// Directory holding one object per tag
const NAMESPACE: &str = "/bases";

/// Metadata store over a flat filesystem
#[derive(Debug)]
pub struct MetadataStore<F: FlatStorage> {
    fs: F,
    mounted: bool,
}

impl<F: FlatStorage> MetadataStore<F> {
    /// Create an unmounted store; call [`init`](Self::init) before use
    pub fn new(fs: F) -> Self {
        Self { fs, mounted: false }
    }

    /// Mount the medium, formatting once as last-resort recovery, and
    /// ensure the storage namespace exists
    pub fn init(&mut self) -> Result<(), Error> {
        if self.fs.mount().is_err() {
            self.fs.format().map_err(|_| Error::StorageFailure)?;
            self.fs.mount().map_err(|_| Error::StorageFailure)?;
        }
        self.fs
            .make_dir(NAMESPACE)
            .map_err(|_| Error::StorageFailure)?;
        self.mounted = true;
        Ok(())
    }

    /// Whether [`init`](Self::init) has succeeded
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Load the record for a tag
    ///
    /// Partial or corrupt objects report `NotFound`, not a half-filled
    /// record.
    pub fn load(&mut self, tag_id: u32) -> Result<BaseRecord, Error> {
        self.check_key(tag_id)?;
        let raw = match self.fs.read(&object_path(tag_id)) {
            Ok(raw) => raw,
            Err(FsError::NotFound) => return Err(Error::NotFound),
            Err(_) => return Err(Error::StorageFailure),
        };
        let text = core::str::from_utf8(&raw).map_err(|_| Error::NotFound)?;
        codec::decode(text).map_err(|_| Error::NotFound)
    }

    /// Create or overwrite the record for a tag
    ///
    /// The object is written to a scratch path and renamed into place, so
    /// a failed write leaves any prior record readable.
    pub fn save(&mut self, tag_id: u32, record: &BaseRecord) -> Result<(), Error> {
        self.check_key(tag_id)?;
        let encoded = codec::encode(record)?;
        let scratch = scratch_path(tag_id);
        self.fs
            .write(&scratch, encoded.as_bytes())
            .map_err(|_| Error::StorageFailure)?;
        if self.fs.rename(&scratch, &object_path(tag_id)).is_err() {
            let _ = self.fs.remove(&scratch);
            return Err(Error::StorageFailure);
        }
        Ok(())
    }

    /// Delete the record for a tag
    pub fn remove(&mut self, tag_id: u32) -> Result<(), Error> {
        self.check_key(tag_id)?;
        match self.fs.remove(&object_path(tag_id)) {
            Ok(()) => Ok(()),
            Err(FsError::NotFound) => Err(Error::NotFound),
            Err(_) => Err(Error::StorageFailure),
        }
    }

    /// Enumerate stored tag ids, capped at `max`
    ///
    /// Best-effort: keys beyond the cap are silently omitted, and the
    /// result carries no ordering guarantee. Never contains 0.
    pub fn list_keys(&mut self, max: usize) -> Result<Vec<u32>, Error> {
        if !self.mounted {
            return Err(Error::StorageFailure);
        }
        let names = self
            .fs
            .list_dir(NAMESPACE)
            .map_err(|_| Error::StorageFailure)?;
        let mut keys = Vec::new();
        for name in &names {
            if keys.len() >= max {
                break;
            }
            if let Some(tag_id) = parse_object_name(name) {
                keys.push(tag_id);
            }
        }
        Ok(keys)
    }

    fn check_key(&self, tag_id: u32) -> Result<(), Error> {
        if !self.mounted {
            return Err(Error::StorageFailure);
        }
        if tag_id == 0 {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }
}

fn object_path(tag_id: u32) -> String {
    format!("{NAMESPACE}/{tag_id:08X}.json")
}

fn scratch_path(tag_id: u32) -> String {
    format!("{NAMESPACE}/{tag_id:08X}.tmp")
}

/// Recover a tag id from an object file name; `None` for anything that is
/// not a `<hex>.json` with a non-zero value (scratch files, strays)
fn parse_object_name(name: &str) -> Option<u32> {
    let stem = name.strip_suffix(".json")?;
    match u32::from_str_radix(stem, 16) {
        Ok(0) | Err(_) => None,
        Ok(tag_id) => Some(tag_id),
    }
}
