//! Device-level abstraction traits
//!
//! These sit one layer above the hal bus traits: the RFID transceiver and
//! the HTTP transport are whole devices the core talks to, not pins.

pub mod http;
pub mod rfid;

pub use http::{HttpTransport, Method, Request, Response};
pub use rfid::{TagReader, Uid, MAX_UID_LEN};
