//! Win32 print spooler backend.
//!
//! Targets are installed printer names. Documents are submitted with the
//! `RAW` datatype so the driver passes ESC/POS bytes through untouched.

use core::ffi::c_void;
use std::io;

use tracing::debug;
use windows::Win32::Graphics::Printing::{
    ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, OpenPrinterW, PRINTER_HANDLE,
    StartDocPrinterW, StartPagePrinter, WritePrinter,
};
use windows::core::{PCWSTR, PWSTR};

use super::{RawPort, Spooler};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// The local Windows print spooler.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinSpooler;

impl Spooler for WinSpooler {
    type Port = WinPort;

    fn open(&self, target: &str) -> io::Result<WinPort> {
        let name_w = to_wide(target);
        let mut handle = PRINTER_HANDLE::default();
        // SAFETY: name_w is NUL-terminated and outlives the call.
        unsafe { OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None) }
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        Ok(WinPort {
            handle,
            open: true,
        })
    }
}

/// An open spooler handle.
pub struct WinPort {
    handle: PRINTER_HANDLE,
    open: bool,
}

fn check(ok: bool) -> io::Result<()> {
    if ok {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

impl RawPort for WinPort {
    fn start_document(&mut self, job_name: &str) -> io::Result<()> {
        let doc_name_w = to_wide(job_name);
        let datatype_w = to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };
        // SAFETY: the wide strings referenced by doc_info outlive the call.
        let job_id = unsafe { StartDocPrinterW(self.handle, 1, &doc_info as *const DOC_INFO_1W) };
        check(job_id != 0)?;
        debug!(job_id, job_name, "spooler job started");
        Ok(())
    }

    fn start_page(&mut self) -> io::Result<()> {
        // SAFETY: handle is open for the lifetime of the port.
        check(unsafe { StartPagePrinter(self.handle) }.as_bool())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let len = u32::try_from(bytes.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "job too large"))?;
        let mut written: u32 = 0;
        // SAFETY: bytes is valid for len bytes; written is a valid out pointer.
        let ok = unsafe {
            WritePrinter(
                self.handle,
                bytes.as_ptr() as *const c_void,
                len,
                &mut written,
            )
        };
        check(ok.as_bool())?;
        Ok(written as usize)
    }

    fn end_page(&mut self) -> io::Result<()> {
        // SAFETY: handle is open for the lifetime of the port.
        check(unsafe { EndPagePrinter(self.handle) }.as_bool())
    }

    fn end_document(&mut self) -> io::Result<()> {
        // SAFETY: handle is open for the lifetime of the port.
        check(unsafe { EndDocPrinter(self.handle) }.as_bool())
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        // SAFETY: handle was opened by OpenPrinterW and is closed once.
        unsafe { ClosePrinter(self.handle) }.map_err(io::Error::other)
    }
}
