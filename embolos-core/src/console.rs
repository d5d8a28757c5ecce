//! Serial command console
//!
//! Secondary command channel framing: one command per line, line feed
//! terminated, carriage returns ignored. The scheduler drains at most one
//! complete line per iteration. Command semantics belong to the host (a
//! [`CommandHandler`]); the console owns framing and the structured JSON
//! reply envelope:
//!
//! ```text
//! {"cmd":"<cmd>","status":"ok"|"error"[,"message":"..."][,"data":<json>]}
//! ```

use alloc::string::String;

use heapless::String as LineBuf;

use embolos_hal::serial::{SerialRead, SerialWrite};

/// Longest accepted command line; longer lines are discarded whole
pub const MAX_LINE_LEN: usize = 128;

/// Reply to a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub ok: bool,
    /// Human-readable detail; omitted from the envelope when empty
    pub message: String,
    /// Pre-encoded JSON payload, if the command produced one
    pub data: Option<String>,
}

impl Reply {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: String::new(),
            data: None,
        }
    }

    pub fn ok_with(message: &str) -> Self {
        Self {
            ok: true,
            message: String::from(message),
            data: None,
        }
    }

    pub fn ok_with_data(data: String) -> Self {
        Self {
            ok: true,
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            ok: false,
            message: String::from(message),
            data: None,
        }
    }
}

/// Host-side command semantics
pub trait CommandHandler {
    /// Handle one framed command; `args` is everything after the first
    /// space (possibly empty)
    fn handle(&mut self, cmd: &str, args: &str) -> Reply;
}

/// Handler that knows no commands at all
#[derive(Debug, Default)]
pub struct NullCommands;

impl CommandHandler for NullCommands {
    fn handle(&mut self, _cmd: &str, _args: &str) -> Reply {
        Reply::error("unknown command")
    }
}

/// Line framer + reply writer
#[derive(Debug, Default)]
pub struct SerialConsole {
    line: LineBuf<MAX_LINE_LEN>,
    overflowed: bool,
}

impl SerialConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain pending input, dispatching at most one complete line
    ///
    /// Returns as soon as a line was dispatched or the input runs dry, so
    /// one call is bounded regardless of how fast a host is typing.
    pub fn drain<S, H>(&mut self, serial: &mut S, handler: &mut H) -> bool
    where
        S: SerialRead + SerialWrite,
        H: CommandHandler,
    {
        while let Some(byte) = serial.read_byte() {
            match byte {
                b'\r' => {}
                b'\n' => {
                    let dispatched = self.finish_line(serial, handler);
                    if dispatched {
                        return true;
                    }
                }
                _ => {
                    if self.line.push(byte as char).is_err() {
                        self.overflowed = true;
                    }
                }
            }
        }
        false
    }

    /// Terminate the current line; returns whether a command was dispatched
    fn finish_line<S, H>(&mut self, serial: &mut S, handler: &mut H) -> bool
    where
        S: SerialWrite,
        H: CommandHandler,
    {
        let overflowed = core::mem::take(&mut self.overflowed);
        let line: LineBuf<MAX_LINE_LEN> = core::mem::take(&mut self.line);
        if overflowed {
            // The truncated tail is not a command anyone sent
            return false;
        }
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        let (cmd, args) = match line.split_once(' ') {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (line, ""),
        };
        let reply = handler.handle(cmd, args);
        serial.write_line(&encode_reply(cmd, &reply));
        true
    }
}

/// Render the reply envelope, escaping text through the JSON encoder
fn encode_reply(cmd: &str, reply: &Reply) -> String {
    let mut out = String::from("{\"cmd\":");
    push_json_str(&mut out, cmd);
    out.push_str(",\"status\":");
    out.push_str(if reply.ok { "\"ok\"" } else { "\"error\"" });
    if !reply.message.is_empty() {
        out.push_str(",\"message\":");
        push_json_str(&mut out, &reply.message);
    }
    if let Some(data) = &reply.data {
        out.push_str(",\"data\":");
        out.push_str(data);
    }
    out.push('}');
    out
}

fn push_json_str(out: &mut String, value: &str) {
    match serde_json::to_string(value) {
        Ok(encoded) => out.push_str(&encoded),
        Err(_) => out.push_str("\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeSerial;

    /// Records the last command and answers ok
    #[derive(Default)]
    struct EchoHandler {
        last: Option<(String, String)>,
    }

    impl CommandHandler for EchoHandler {
        fn handle(&mut self, cmd: &str, args: &str) -> Reply {
            self.last = Some((String::from(cmd), String::from(args)));
            Reply::ok()
        }
    }

    #[test]
    fn test_dispatches_one_line_per_drain() {
        let mut serial = FakeSerial::new();
        serial.push_input(b"tag.current\nbase.list\n");
        let mut console = SerialConsole::new();
        let mut handler = EchoHandler::default();

        assert!(console.drain(&mut serial, &mut handler));
        assert_eq!(
            handler.last,
            Some((String::from("tag.current"), String::new()))
        );

        assert!(console.drain(&mut serial, &mut handler));
        assert_eq!(handler.last, Some((String::from("base.list"), String::new())));

        assert!(!console.drain(&mut serial, &mut handler));
    }

    #[test]
    fn test_carriage_returns_ignored() {
        let mut serial = FakeSerial::new();
        serial.push_input(b"tag.set 1A2B\r\n");
        let mut console = SerialConsole::new();
        let mut handler = EchoHandler::default();

        assert!(console.drain(&mut serial, &mut handler));
        assert_eq!(
            handler.last,
            Some((String::from("tag.set"), String::from("1A2B")))
        );
    }

    #[test]
    fn test_partial_line_waits_for_terminator() {
        let mut serial = FakeSerial::new();
        serial.push_input(b"tag.cur");
        let mut console = SerialConsole::new();
        let mut handler = EchoHandler::default();

        assert!(!console.drain(&mut serial, &mut handler));
        assert_eq!(handler.last, None);

        serial.push_input(b"rent\n");
        assert!(console.drain(&mut serial, &mut handler));
        assert_eq!(
            handler.last,
            Some((String::from("tag.current"), String::new()))
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut serial = FakeSerial::new();
        serial.push_input(b"\n   \n\r\n");
        let mut console = SerialConsole::new();
        let mut handler = EchoHandler::default();
        assert!(!console.drain(&mut serial, &mut handler));
        assert_eq!(handler.last, None);
    }

    #[test]
    fn test_overlong_line_discarded() {
        let mut serial = FakeSerial::new();
        serial.push_input(&[b'x'; 300]);
        serial.push_input(b"\ntag.current\n");
        let mut console = SerialConsole::new();
        let mut handler = EchoHandler::default();

        // The overflowed line is dropped; the next one still works
        assert!(console.drain(&mut serial, &mut handler));
        assert_eq!(
            handler.last,
            Some((String::from("tag.current"), String::new()))
        );
    }

    #[test]
    fn test_unknown_command_reply_envelope() {
        let mut serial = FakeSerial::new();
        serial.push_input(b"wobble 1 2\n");
        let mut console = SerialConsole::new();

        assert!(console.drain(&mut serial, &mut NullCommands));
        assert_eq!(
            serial.output_str(),
            "{\"cmd\":\"wobble\",\"status\":\"error\",\"message\":\"unknown command\"}\n"
        );
    }

    #[test]
    fn test_reply_with_data() {
        let reply = Reply::ok_with_data(String::from("{\"rfid\":\"1A2B3C4D\"}"));
        assert_eq!(
            encode_reply("tag.current", &reply),
            "{\"cmd\":\"tag.current\",\"status\":\"ok\",\"data\":{\"rfid\":\"1A2B3C4D\"}}"
        );
    }
}
