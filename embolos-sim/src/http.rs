//! Minimal HTTP/1.1 transport over std::net
//!
//! Implements the core's `HttpTransport` contract: non-blocking accept,
//! bounded reads, one outstanding request at a time, close after
//! response. This is deliberately not a web framework - the cooperative
//! loop needs a transport whose every call has a hard time bound, and a
//! dispenser serves one browser on a bench, not the internet.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::{Duration, Instant};

use log::{debug, warn};

use embolos_core::traits::http::{HttpTransport, Method, Request, Response};

/// Total budget for reading one request, across however many chunks the
/// peer sends it in; a peer trickling bytes gets cut off, not serviced
const SERVICE_BUDGET: Duration = Duration::from_millis(100);

/// Budget for writing one response
const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

/// Largest accepted request (headers + body)
const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// Non-blocking single-connection HTTP transport
pub struct TcpTransport {
    listener: TcpListener,
    /// Connection whose request has been polled but not yet answered
    pending: Option<TcpStream>,
}

impl TcpTransport {
    pub fn bind(addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            pending: None,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }
}

impl HttpTransport for TcpTransport {
    fn poll_request(&mut self) -> Option<Request> {
        if self.pending.is_some() {
            // Contract: the previous request must be answered first
            return None;
        }
        let (mut stream, peer) = match self.listener.accept() {
            Ok(accepted) => accepted,
            Err(err) if err.kind() == ErrorKind::WouldBlock => return None,
            Err(err) => {
                warn!("http accept failed: {err}");
                return None;
            }
        };
        if stream.set_nonblocking(false).is_err()
            || stream.set_write_timeout(Some(WRITE_TIMEOUT)).is_err()
        {
            return None;
        }
        match read_request(&mut stream) {
            Ok(request) => {
                debug!("http {peer}: {} {}", method_name(request.method), request.path);
                self.pending = Some(stream);
                Some(request)
            }
            Err(err) => {
                debug!("http {peer}: unreadable request: {err}");
                let _ = write_response(
                    &mut stream,
                    &Response::text(400, "Bad request"),
                );
                None
            }
        }
    }

    fn send_response(&mut self, response: Response) {
        let Some(mut stream) = self.pending.take() else {
            return;
        };
        if let Err(err) = write_response(&mut stream, &response) {
            debug!("http response write failed: {err}");
        }
        // Dropping the stream closes the connection (Connection: close)
    }
}

/// Read and frame one request: request line, headers, Content-Length body
///
/// The whole read shares one deadline, so the call returns within
/// [`SERVICE_BUDGET`] no matter how the peer paces its bytes.
fn read_request(stream: &mut TcpStream) -> std::io::Result<Request> {
    let deadline = Instant::now() + SERVICE_BUDGET;
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = find_header_end(&raw) {
            break pos;
        }
        if raw.len() > MAX_REQUEST_BYTES {
            return Err(std::io::Error::new(ErrorKind::InvalidData, "headers too large"));
        }
        arm_read(stream, deadline)?;
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "closed mid-headers"));
        }
        raw.extend_from_slice(&chunk[..n]);
    };

    let header_text = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    let mut lines = header_text.split("\r\n");
    let request_line = lines
        .next()
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidData, "empty request"))?;
    let mut parts = request_line.split(' ');
    let method = match parts.next() {
        Some("GET") => Method::Get,
        Some("PUT") => Method::Put,
        Some("DELETE") => Method::Delete,
        Some(_) => Method::Other,
        None => return Err(std::io::Error::new(ErrorKind::InvalidData, "bad request line")),
    };
    let target = parts
        .next()
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidData, "bad request line"))?;
    // Path only; a query string would never route anywhere anyway
    let path = target.split('?').next().unwrap_or(target).to_string();

    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    if content_length > MAX_REQUEST_BYTES {
        return Err(std::io::Error::new(ErrorKind::InvalidData, "body too large"));
    }

    let mut body = raw[header_end + 4..].to_vec();
    while body.len() < content_length {
        arm_read(stream, deadline)?;
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "closed mid-body"));
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(Request {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Arm the read timeout with whatever is left of the deadline
fn arm_read(stream: &TcpStream, deadline: Instant) -> std::io::Result<()> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        return Err(std::io::Error::new(ErrorKind::TimedOut, "request read budget spent"));
    }
    stream.set_read_timeout(Some(remaining))
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}

fn write_response(stream: &mut TcpStream, response: &Response) -> std::io::Result<()> {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.content_type,
        response.body.len()
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(response.body.as_bytes())?;
    stream.flush()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Put => "PUT",
        Method::Delete => "DELETE",
        Method::Other => "OTHER",
    }
}
