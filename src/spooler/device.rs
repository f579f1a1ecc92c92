//! # Device File Backend
//!
//! Writes raw jobs straight to a printer device node: a USB line printer
//! (`/dev/usb/lp0`), a serial port or RFCOMM binding (`/dev/rfcomm0`), or
//! a plain file when capturing output.
//!
//! There is no spooler queue behind a device node, so document and page
//! boundaries are flush points only. The target must already exist; the
//! backend never creates files.
//!
//! Large jobs are written in chunks so a slow device does not stall one
//! huge write call.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use super::{RawPort, Spooler};

/// Chunk size for device writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Opens printer targets as device paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceSpooler;

impl Spooler for DeviceSpooler {
    type Port = DevicePort;

    fn open(&self, target: &str) -> io::Result<DevicePort> {
        let path = PathBuf::from(target);
        let file = OpenOptions::new().write(true).open(&path)?;
        Ok(DevicePort {
            file: Some(file),
            path,
        })
    }
}

/// An open device node.
pub struct DevicePort {
    file: Option<File>,
    path: PathBuf,
}

impl DevicePort {
    fn file(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "device already closed"))
    }
}

impl RawPort for DevicePort {
    fn start_document(&mut self, job_name: &str) -> io::Result<()> {
        debug!(device = %self.path.display(), job_name, "raw document on device");
        self.file().map(|_| ())
    }

    fn start_page(&mut self) -> io::Result<()> {
        self.file().map(|_| ())
    }

    /// Write in chunks. Bytes already handed to the device before a
    /// failure are reported as a short write rather than an error.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let Self { file, path } = self;
        let file = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "device already closed"))?;
        write_chunks(file, bytes, |written, e| {
            warn!(
                device = %path.display(),
                written,
                expected = bytes.len(),
                error = %e,
                "device write stopped early"
            );
        })
    }

    fn end_page(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }

    fn end_document(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Write `bytes` in [`CHUNK_SIZE`] pieces and return how many were
/// accepted. A failure on the first chunk is an error; a later one ends
/// the write early and is passed to `on_stop`.
fn write_chunks<W: Write>(
    out: &mut W,
    bytes: &[u8],
    on_stop: impl FnOnce(usize, &io::Error),
) -> io::Result<usize> {
    let mut written = 0;
    for chunk in bytes.chunks(CHUNK_SIZE) {
        match out.write_all(chunk) {
            Ok(()) => written += chunk.len(),
            Err(e) if written == 0 => return Err(e),
            Err(e) => {
                on_stop(written, &e);
                break;
            }
        }
    }
    Ok(written)
}
