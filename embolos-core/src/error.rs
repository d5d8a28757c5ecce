//! Core error taxonomy
//!
//! Store and router operations distinguish "absent" from "broken": callers
//! must never treat a missing record and a failed medium the same way.

/// Errors surfaced by the metadata store and the request router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Tag id 0 (reserved) or an unparseable hex key
    InvalidKey,
    /// No record for the key, or no matching route
    NotFound,
    /// A request body that cannot be decoded
    Malformed,
    /// Mount or I/O failure in the backing medium
    StorageFailure,
}
