//! HTTP transport trait and request/response types
//!
//! The router is pure request-in, response-out; this trait is the contract
//! with the socket layer that feeds it. Transports must bound their
//! per-call work (non-blocking accept, read timeouts) - a hanging network
//! peer is never allowed to block motion control.

use alloc::string::String;

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Put,
    Delete,
    /// Anything else; only ever routed to 404/405
    Other,
}

/// A parsed, complete HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Path component only, no query string, case preserved
    pub path: String,
    /// Request body decoded as UTF-8 (empty when absent)
    pub body: String,
}

/// Response handed back to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    /// 200 with a JSON body
    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body,
        }
    }

    /// 200 with a static HTML body
    pub fn html(body: &'static str) -> Self {
        Self {
            status: 200,
            content_type: "text/html",
            body: String::from(body),
        }
    }

    /// Plain-text response with an arbitrary status
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::from(body),
        }
    }
}

/// Transport servicing one request at a time
///
/// The contract is strictly alternating: after `poll_request` returns
/// `Some`, the caller must deliver the matching `send_response` before
/// polling again. The transport owns connection bookkeeping.
pub trait HttpTransport {
    /// Take the next complete pending request, if any, without blocking
    fn poll_request(&mut self) -> Option<Request>;

    /// Send the response for the most recently polled request
    fn send_response(&mut self, response: Response);
}
