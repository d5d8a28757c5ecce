//! Serial command-channel abstractions
//!
//! The scheduler drains command input one byte at a time and must never
//! block waiting for a terminal, so the read side is polling rather than
//! blocking.

/// Non-blocking serial receiver
pub trait SerialRead {
    /// Take one received byte, if any is pending
    fn read_byte(&mut self) -> Option<u8>;
}

/// Serial transmitter
pub trait SerialWrite {
    /// Write raw bytes to the channel
    ///
    /// Serial output is advisory (command replies, boot messages); errors
    /// are swallowed by implementations rather than surfaced to the loop.
    fn write_bytes(&mut self, data: &[u8]);

    /// Write a string followed by a line feed
    fn write_line(&mut self, line: &str) {
        self.write_bytes(line.as_bytes());
        self.write_bytes(b"\n");
    }
}
