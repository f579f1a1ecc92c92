//! Scripted in-memory spooler for tests.

use std::io;
use std::sync::{Arc, Mutex};

use super::{RawPort, Spooler};

/// One call observed on the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    StartDocument(String),
    StartPage,
    Write(usize),
    EndPage,
    EndDocument,
    Close,
}

/// Which calls fail.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub fail_open: bool,
    pub fail_start_document: bool,
    pub fail_start_page: bool,
    pub fail_write: bool,
    /// Accept only this many bytes per write.
    pub short_write: Option<usize>,
    pub fail_end_page: bool,
    pub fail_close: bool,
}

#[derive(Debug, Default)]
struct Record {
    calls: Vec<Call>,
    written: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct MockSpooler {
    script: Script,
    record: Arc<Mutex<Record>>,
}

impl MockSpooler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Script) -> Self {
        Self {
            script,
            record: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.record.lock().unwrap().calls.clone()
    }

    pub fn written(&self) -> Vec<u8> {
        self.record.lock().unwrap().written.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.record
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| pred(c))
            .count()
    }
}

impl Spooler for MockSpooler {
    type Port = MockPort;

    fn open(&self, target: &str) -> io::Result<MockPort> {
        if self.script.fail_open {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such printer"));
        }
        self.record
            .lock()
            .unwrap()
            .calls
            .push(Call::Open(target.to_string()));
        Ok(MockPort {
            script: self.script.clone(),
            record: Arc::clone(&self.record),
        })
    }
}

pub struct MockPort {
    script: Script,
    record: Arc<Mutex<Record>>,
}

impl MockPort {
    fn log(&self, call: Call) {
        self.record.lock().unwrap().calls.push(call);
    }

    fn outcome(&self, call: Call, fail: bool) -> io::Result<()> {
        self.log(call);
        if fail {
            Err(io::Error::other("scripted failure"))
        } else {
            Ok(())
        }
    }
}

impl RawPort for MockPort {
    fn start_document(&mut self, job_name: &str) -> io::Result<()> {
        self.outcome(
            Call::StartDocument(job_name.to_string()),
            self.script.fail_start_document,
        )
    }

    fn start_page(&mut self) -> io::Result<()> {
        self.outcome(Call::StartPage, self.script.fail_start_page)
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.outcome(Call::Write(bytes.len()), self.script.fail_write)?;
        let accepted = self
            .script
            .short_write
            .map_or(bytes.len(), |n| n.min(bytes.len()));
        self.record
            .lock()
            .unwrap()
            .written
            .extend_from_slice(&bytes[..accepted]);
        Ok(accepted)
    }

    fn end_page(&mut self) -> io::Result<()> {
        self.outcome(Call::EndPage, self.script.fail_end_page)
    }

    fn end_document(&mut self) -> io::Result<()> {
        self.outcome(Call::EndDocument, false)
    }

    fn close(&mut self) -> io::Result<()> {
        self.outcome(Call::Close, self.script.fail_close)
    }
}
