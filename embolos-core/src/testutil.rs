//! Shared test fakes for the hal and device traits
//!
//! Everything here is deterministic and manually driven: the clock only
//! moves when a test advances it, the reader replays a script, the
//! storage lives in a map.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use embolos_hal::fs::{FlatStorage, FsError};
use embolos_hal::gpio::{InputPin, OutputPin};
use embolos_hal::serial::{SerialRead, SerialWrite};
use embolos_hal::time::Clock;

use crate::traits::http::{HttpTransport, Request, Response};
use crate::traits::rfid::{TagReader, Uid};

/// Manually advanced clock; `delay_us` moves time like the real thing
#[derive(Debug, Default)]
pub struct FakeClock {
    now_us: u64,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&mut self, us: u64) {
        self.now_us += us;
    }
}

impl Clock for FakeClock {
    fn now_us(&self) -> u64 {
        self.now_us
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us += u64::from(us);
    }
}

/// Output pin counting rising edges; clones share state
#[derive(Debug, Clone, Default)]
pub struct CountingPin {
    highs: Rc<Cell<u32>>,
    level: Rc<Cell<bool>>,
}

impl CountingPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the pin was driven high
    pub fn highs(&self) -> u32 {
        self.highs.get()
    }
}

impl OutputPin for CountingPin {
    fn set_high(&mut self) {
        self.highs.set(self.highs.get() + 1);
        self.level.set(true);
    }

    fn set_low(&mut self) {
        self.level.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}

/// Input pin whose level the test sets; clones share state
#[derive(Debug, Clone)]
pub struct SharedLevelPin {
    level: Rc<Cell<bool>>,
}

impl SharedLevelPin {
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
        }
    }

    pub fn set_level(&self, level: bool) {
        self.level.set(level);
    }
}

impl InputPin for SharedLevelPin {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

/// Tag reader replaying a fixed script, then reading empty forever
#[derive(Debug)]
pub struct ScriptReader {
    reads: VecDeque<Option<Uid>>,
}

impl ScriptReader {
    pub fn new(reads: &[Option<&[u8]>]) -> Self {
        Self {
            reads: reads
                .iter()
                .map(|read| {
                    read.map(|bytes| {
                        let mut uid = Uid::new();
                        uid.extend_from_slice(bytes).unwrap();
                        uid
                    })
                })
                .collect(),
        }
    }
}

impl TagReader for ScriptReader {
    fn read_uid(&mut self) -> Option<Uid> {
        self.reads.pop_front().flatten()
    }
}

/// In-memory flat storage with injectable faults
#[derive(Debug, Default)]
pub struct MemFs {
    files: BTreeMap<String, Vec<u8>>,
    fail_writes: bool,
    fail_mount: bool,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail until cleared
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make `mount` fail until a `format` wipes the medium
    pub fn fail_mount_until_format(&mut self, fail: bool) {
        self.fail_mount = fail;
    }
}

impl FlatStorage for MemFs {
    fn mount(&mut self) -> Result<(), FsError> {
        if self.fail_mount {
            return Err(FsError::Io);
        }
        Ok(())
    }

    fn format(&mut self) -> Result<(), FsError> {
        self.files.clear();
        self.fail_mount = false;
        Ok(())
    }

    fn make_dir(&mut self, _path: &str) -> Result<(), FsError> {
        Ok(())
    }

    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        self.files.get(path).cloned().ok_or(FsError::NotFound)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), FsError> {
        if self.fail_writes {
            return Err(FsError::Io);
        }
        self.files.insert(String::from(path), Vec::from(data));
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<(), FsError> {
        self.files.remove(path).map(|_| ()).ok_or(FsError::NotFound)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError> {
        let contents = self.files.remove(from).ok_or(FsError::NotFound)?;
        self.files.insert(String::from(to), contents);
        Ok(())
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, FsError> {
        let mut names = Vec::new();
        for key in self.files.keys() {
            if let Some(rest) = key.strip_prefix(path) {
                if let Some(name) = rest.strip_prefix('/') {
                    if !name.is_empty() && !name.contains('/') {
                        names.push(String::from(name));
                    }
                }
            }
        }
        Ok(names)
    }
}

/// Transport fed by the test, recording every response
#[derive(Debug, Default)]
pub struct LoopTransport {
    incoming: VecDeque<Request>,
    outgoing: Vec<Response>,
}

impl LoopTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_request(&mut self, request: Request) {
        self.incoming.push_back(request);
    }

    pub fn responses(&self) -> &[Response] {
        &self.outgoing
    }
}

impl HttpTransport for LoopTransport {
    fn poll_request(&mut self) -> Option<Request> {
        self.incoming.pop_front()
    }

    fn send_response(&mut self, response: Response) {
        self.outgoing.push(response);
    }
}

/// Byte-queue serial with captured output
#[derive(Debug, Default)]
pub struct FakeSerial {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl FakeSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Everything written so far, as UTF-8
    pub fn output_str(&self) -> &str {
        core::str::from_utf8(&self.output).unwrap()
    }
}

impl SerialRead for FakeSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

impl SerialWrite for FakeSerial {
    fn write_bytes(&mut self, data: &[u8]) {
        self.output.extend_from_slice(data);
    }
}
