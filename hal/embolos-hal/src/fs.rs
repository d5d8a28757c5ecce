//! Flat-file storage abstraction
//!
//! The metadata store keeps one small object per RFID tag, addressed by
//! path (`/bases/<8-hex>.json`). This trait is the contract with whatever
//! actually holds those objects - LittleFS on flash, a directory on the
//! host. Implementations handle the medium; the store owns naming, format
//! and atomicity policy.

use alloc::string::String;
use alloc::vec::Vec;

/// Errors from flat-storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsError {
    /// No object exists at the given path
    NotFound,
    /// Medium-level failure (mount, I/O, out of space)
    Io,
}

/// Path-addressed file storage
///
/// Paths are `/`-separated and always absolute. A mounted filesystem is a
/// precondition for every operation except [`mount`](Self::mount) and
/// [`format`](Self::format).
pub trait FlatStorage {
    /// Mount the backing medium
    fn mount(&mut self) -> Result<(), FsError>;

    /// Erase and re-initialize the medium
    ///
    /// Used as last-resort recovery when mounting fails; all stored data
    /// is lost.
    fn format(&mut self) -> Result<(), FsError>;

    /// Create a directory; succeeds if it already exists
    fn make_dir(&mut self, path: &str) -> Result<(), FsError>;

    /// Read the full contents of an object
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError>;

    /// Create or replace an object with the given contents
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), FsError>;

    /// Delete an object
    fn remove(&mut self, path: &str) -> Result<(), FsError>;

    /// Atomically rename an object, replacing any existing destination
    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError>;

    /// List the file names (not paths, not subdirectories) in a directory
    ///
    /// No ordering is guaranteed.
    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, FsError>;
}
