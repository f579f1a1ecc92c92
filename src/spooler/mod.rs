//! # Spooler Session
//!
//! A raw print job goes through a fixed lifecycle on the OS spooler:
//!
//! ```text
//! open ─► start_document ─► start_page ─► write ─► end_page ─► end_document ─► close
//!                               ▲                      │
//!                               └──────────────────────┘  (more pages)
//! ```
//!
//! [`SpoolerSession`] enforces that order at runtime. Calls made out of
//! order fail with [`RasidError::ProtocolViolation`] and never reach the
//! port. Whatever was started is torn down exactly once, either by
//! [`SpoolerSession::close`] or by `Drop` when the session goes out of
//! scope on an error path. Teardown failures are logged and reported as
//! [`TeardownWarning`]s, never as errors.
//!
//! ## Backends
//!
//! - [`device::DeviceSpooler`]: a character device or file path such as
//!   `/dev/usb/lp0`.
//! - `winspool::WinSpooler` (Windows only): the Win32 print spooler in
//!   RAW mode.
//!
//! [`SystemSpooler`] names the default for the current platform.

pub mod device;
#[cfg(windows)]
pub mod winspool;

#[cfg(test)]
pub(crate) mod mock;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::RasidError;

#[cfg(windows)]
pub type SystemSpooler = winspool::WinSpooler;
#[cfg(not(windows))]
pub type SystemSpooler = device::DeviceSpooler;

/// An open handle to one printer target.
///
/// Implementations map each call onto the platform's spooler API. They
/// do not track lifecycle order; [`SpoolerSession`] does.
pub trait RawPort {
    /// Begin a document with the RAW datatype.
    fn start_document(&mut self, job_name: &str) -> io::Result<()>;

    fn start_page(&mut self) -> io::Result<()>;

    /// Hand bytes to the spooler, returning how many it accepted.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;

    fn end_page(&mut self) -> io::Result<()>;

    fn end_document(&mut self) -> io::Result<()>;

    /// Release the handle.
    fn close(&mut self) -> io::Result<()>;
}

/// Resolves printer targets to open ports.
pub trait Spooler {
    type Port: RawPort;

    fn open(&self, target: &str) -> io::Result<Self::Port>;
}

/// Lifecycle state of a [`SpoolerSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Opened,
    DocumentStarted,
    PageStarted,
    PageEnded,
    DocumentEnded,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Opened => "opened",
            SessionState::DocumentStarted => "document started",
            SessionState::PageStarted => "page started",
            SessionState::PageEnded => "page ended",
            SessionState::DocumentEnded => "document ended",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// A teardown step that failed. Logged, never escalated.
#[derive(Debug, Error)]
#[error("{stage} failed during teardown: {source}")]
pub struct TeardownWarning {
    pub stage: &'static str,
    #[source]
    pub source: io::Error,
}

/// One open print session on one target.
pub struct SpoolerSession<P: RawPort> {
    port: P,
    target: String,
    state: SessionState,
}

impl<P: RawPort> SpoolerSession<P> {
    /// Open `target` through `spooler`.
    pub fn open<S>(spooler: &S, target: &str) -> Result<Self, RasidError>
    where
        S: Spooler<Port = P>,
    {
        let port = spooler
            .open(target)
            .map_err(|source| RasidError::ResourceUnavailable {
                target: target.to_string(),
                source,
            })?;
        debug!(printer = %target, "printer opened");
        Ok(Self {
            port,
            target: target.to_string(),
            state: SessionState::Opened,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn require(&self, operation: &'static str, allowed: &[SessionState]) -> Result<(), RasidError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(RasidError::ProtocolViolation {
                operation,
                state: self.state,
            })
        }
    }

    pub fn start_document(&mut self, job_name: &str) -> Result<(), RasidError> {
        self.require("start_document", &[SessionState::Opened])?;
        self.port
            .start_document(job_name)
            .map_err(|source| RasidError::Spooler {
                stage: "start document",
                source,
            })?;
        self.state = SessionState::DocumentStarted;
        debug!(printer = %self.target, job_name, "document started");
        Ok(())
    }

    pub fn start_page(&mut self) -> Result<(), RasidError> {
        self.require(
            "start_page",
            &[SessionState::DocumentStarted, SessionState::PageEnded],
        )?;
        self.port.start_page().map_err(|source| RasidError::Spooler {
            stage: "start page",
            source,
        })?;
        self.state = SessionState::PageStarted;
        Ok(())
    }

    /// Write the whole buffer inside the current page.
    ///
    /// Fewer accepted bytes than offered is a [`RasidError::WriteFailed`];
    /// the session stays in the page so teardown still ends it.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, RasidError> {
        self.require("write", &[SessionState::PageStarted])?;
        let expected = bytes.len();
        match self.port.write(bytes) {
            Ok(written) if written == expected => {
                debug!(printer = %self.target, bytes = written, "bytes written");
                Ok(written)
            }
            Ok(written) => Err(RasidError::WriteFailed {
                written,
                expected,
                source: None,
            }),
            Err(e) => Err(RasidError::WriteFailed {
                written: 0,
                expected,
                source: Some(e),
            }),
        }
    }

    /// Read a file and write its contents as one transaction.
    pub fn write_file(&mut self, path: impl AsRef<Path>) -> Result<usize, RasidError> {
        self.require("write", &[SessionState::PageStarted])?;
        let bytes = fs::read(path)?;
        self.write(&bytes)
    }

    pub fn end_page(&mut self) -> Result<(), RasidError> {
        self.require("end_page", &[SessionState::PageStarted])?;
        self.state = SessionState::PageEnded;
        self.port.end_page().map_err(|source| RasidError::Spooler {
            stage: "end page",
            source,
        })
    }

    pub fn end_document(&mut self) -> Result<(), RasidError> {
        self.require(
            "end_document",
            &[SessionState::DocumentStarted, SessionState::PageEnded],
        )?;
        self.state = SessionState::DocumentEnded;
        self.port.end_document().map_err(|source| RasidError::Spooler {
            stage: "end document",
            source,
        })
    }

    /// End whatever is still open and release the handle.
    pub fn close(mut self) -> Vec<TeardownWarning> {
        self.teardown()
    }

    fn teardown(&mut self) -> Vec<TeardownWarning> {
        let mut warnings = Vec::new();

        if self.state == SessionState::PageStarted {
            self.state = SessionState::PageEnded;
            if let Err(source) = self.port.end_page() {
                warnings.push(TeardownWarning {
                    stage: "end page",
                    source,
                });
            }
        }

        if matches!(
            self.state,
            SessionState::DocumentStarted | SessionState::PageEnded
        ) {
            self.state = SessionState::DocumentEnded;
            if let Err(source) = self.port.end_document() {
                warnings.push(TeardownWarning {
                    stage: "end document",
                    source,
                });
            }
        }

        if self.state != SessionState::Closed {
            self.state = SessionState::Closed;
            if let Err(source) = self.port.close() {
                warnings.push(TeardownWarning {
                    stage: "close",
                    source,
                });
            }
        }

        for w in &warnings {
            warn!(printer = %self.target, stage = w.stage, error = %w.source, "teardown step failed");
        }
        warnings
    }
}

impl<P: RawPort> Drop for SpoolerSession<P> {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{Call, MockSpooler, Script};
    use super::*;

    fn open(spooler: &MockSpooler) -> SpoolerSession<super::mock::MockPort> {
        SpoolerSession::open(spooler, "TM-T82").unwrap()
    }

    #[test]
    fn test_full_lifecycle() {
        let spooler = MockSpooler::new();
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        session.start_page().unwrap();
        assert_eq!(session.write(b"abc").unwrap(), 3);
        session.end_page().unwrap();
        session.end_document().unwrap();
        assert!(session.close().is_empty());

        assert_eq!(
            spooler.calls(),
            vec![
                Call::Open("TM-T82".into()),
                Call::StartDocument("job".into()),
                Call::StartPage,
                Call::Write(3),
                Call::EndPage,
                Call::EndDocument,
                Call::Close,
            ]
        );
        assert_eq!(spooler.written(), b"abc");
    }

    #[test]
    fn test_open_failure_is_resource_unavailable() {
        let spooler = MockSpooler::with_script(Script {
            fail_open: true,
            ..Default::default()
        });
        let err = SpoolerSession::open(&spooler, "nowhere").err().unwrap();
        assert!(matches!(
            err,
            RasidError::ResourceUnavailable { ref target, .. } if target == "nowhere"
        ));
    }

    #[test]
    fn test_write_before_start_page_is_rejected() {
        let spooler = MockSpooler::new();
        let mut session = open(&spooler);
        session.start_document("job").unwrap();

        let err = session.write(b"abc").unwrap_err();
        assert!(matches!(
            err,
            RasidError::ProtocolViolation {
                operation: "write",
                state: SessionState::DocumentStarted
            }
        ));
        assert_eq!(spooler.count(|c| matches!(c, Call::Write(_))), 0);
    }

    #[test]
    fn test_start_document_twice_is_rejected() {
        let spooler = MockSpooler::new();
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        assert!(matches!(
            session.start_document("job"),
            Err(RasidError::ProtocolViolation { .. })
        ));
    }

    #[test]
    fn test_multiple_pages() {
        let spooler = MockSpooler::new();
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        for _ in 0..2 {
            session.start_page().unwrap();
            session.write(b"x").unwrap();
            session.end_page().unwrap();
        }
        assert_eq!(session.state(), SessionState::PageEnded);
        session.close();
        assert_eq!(spooler.count(|c| *c == Call::StartPage), 2);
        assert_eq!(spooler.count(|c| *c == Call::EndDocument), 1);
    }

    #[test]
    fn test_write_failure_tears_down_each_step_once() {
        let spooler = MockSpooler::with_script(Script {
            fail_write: true,
            ..Default::default()
        });
        {
            let mut session = open(&spooler);
            session.start_document("job").unwrap();
            session.start_page().unwrap();
            let err = session.write(b"abcdef").unwrap_err();
            assert!(matches!(
                err,
                RasidError::WriteFailed {
                    written: 0,
                    expected: 6,
                    source: Some(_)
                }
            ));
        }

        assert_eq!(spooler.count(|c| *c == Call::EndPage), 1);
        assert_eq!(spooler.count(|c| *c == Call::EndDocument), 1);
        assert_eq!(spooler.count(|c| *c == Call::Close), 1);
    }

    #[test]
    fn test_short_write_is_write_failed() {
        let spooler = MockSpooler::with_script(Script {
            short_write: Some(2),
            ..Default::default()
        });
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        session.start_page().unwrap();
        let err = session.write(b"abcdef").unwrap_err();
        assert!(matches!(
            err,
            RasidError::WriteFailed {
                written: 2,
                expected: 6,
                source: None
            }
        ));
    }

    #[test]
    fn test_start_page_failure_skips_end_page() {
        let spooler = MockSpooler::with_script(Script {
            fail_start_page: true,
            ..Default::default()
        });
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        assert!(matches!(
            session.start_page(),
            Err(RasidError::Spooler {
                stage: "start page",
                ..
            })
        ));
        drop(session);

        assert_eq!(spooler.count(|c| *c == Call::EndPage), 0);
        assert_eq!(spooler.count(|c| *c == Call::EndDocument), 1);
        assert_eq!(spooler.count(|c| *c == Call::Close), 1);
    }

    #[test]
    fn test_close_after_open_only_closes() {
        let spooler = MockSpooler::new();
        let session = open(&spooler);
        assert!(session.close().is_empty());
        assert_eq!(
            spooler.calls(),
            vec![Call::Open("TM-T82".into()), Call::Close]
        );
    }

    #[test]
    fn test_teardown_failures_become_warnings() {
        let spooler = MockSpooler::with_script(Script {
            fail_end_page: true,
            fail_close: true,
            ..Default::default()
        });
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        session.start_page().unwrap();
        session.write(b"abc").unwrap();

        let warnings = session.close();
        let stages: Vec<_> = warnings.iter().map(|w| w.stage).collect();
        assert_eq!(stages, vec!["end page", "close"]);
        assert_eq!(spooler.count(|c| *c == Call::EndDocument), 1);
    }

    #[test]
    fn test_explicit_end_then_close_does_not_repeat() {
        let spooler = MockSpooler::new();
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        session.start_page().unwrap();
        session.end_page().unwrap();
        session.close();
        assert_eq!(spooler.count(|c| *c == Call::EndPage), 1);
        assert_eq!(spooler.count(|c| *c == Call::EndDocument), 1);
    }

    #[test]
    fn test_write_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"\x1b@hello").unwrap();

        let spooler = MockSpooler::new();
        let mut session = open(&spooler);
        session.start_document("job").unwrap();
        session.start_page().unwrap();
        assert_eq!(session.write_file(file.path()).unwrap(), 7);
        session.close();
        assert_eq!(spooler.written(), b"\x1b@hello");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::PageStarted.to_string(), "page started");
        assert_eq!(SessionState::DocumentEnded.to_string(), "document ended");
    }
}
