//! # Delivery
//!
//! Sends one encoded command buffer to one printer as a single spooler
//! transaction: open, start document, start page, write, then tear down.
//! Teardown runs on every exit path. There is no retry; one call is one
//! attempt.
//!
//! [`deliver`] does not serialize concurrent callers. [`Deliverer`]
//! does, through a [`PrintGate`] keyed by printer target.
//!
//! ```no_run
//! use rasid::delivery::{Deliverer, DeliveryConfig};
//! use rasid::receipt::{self, ShopProfile};
//! use rasid::spooler::SystemSpooler;
//!
//! let invoice = receipt::sample_invoice("23/02/2024");
//! let buffer = receipt::encode(&invoice, &ShopProfile::default());
//!
//! let deliverer = Deliverer::new(SystemSpooler::default(), DeliveryConfig::new("EPSON TM-T82"));
//! let report = deliverer.deliver(&buffer)?;
//! println!("{} bytes sent", report.bytes_written);
//! # Ok::<(), rasid::RasidError>(())
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::RasidError;
use crate::ir::CommandBuffer;
use crate::spooler::{Spooler, SpoolerSession, TeardownWarning};

/// Spooler document name used when none is configured.
pub const DEFAULT_JOB_NAME: &str = "DKNCK Receipt";

/// Outcome of a successful delivery.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub bytes_written: usize,
    /// Teardown steps that failed after the bytes were accepted.
    pub teardown_warnings: Vec<TeardownWarning>,
}

/// Deliver `buffer` to `target` in one spooler session.
#[instrument(skip_all, fields(printer = %target, job_name = %job_name, bytes = buffer.len()))]
pub fn deliver<S: Spooler>(
    spooler: &S,
    target: &str,
    buffer: &[u8],
    job_name: &str,
) -> Result<DeliveryReport, RasidError> {
    let mut session = SpoolerSession::open(spooler, target)?;
    session.start_document(job_name)?;
    session.start_page()?;
    let bytes_written = session.write(buffer)?;
    let teardown_warnings = session.close();

    info!(bytes = bytes_written, "job delivered");
    Ok(DeliveryReport {
        bytes_written,
        teardown_warnings,
    })
}

/// Deliver the contents of a file, sent verbatim.
#[instrument(skip_all, fields(printer = %target, job_name = %job_name, path = %path.as_ref().display()))]
pub fn deliver_file<S: Spooler>(
    spooler: &S,
    target: &str,
    path: impl AsRef<Path>,
    job_name: &str,
) -> Result<DeliveryReport, RasidError> {
    let mut session = SpoolerSession::open(spooler, target)?;
    session.start_document(job_name)?;
    session.start_page()?;
    let bytes_written = session.write_file(path)?;
    let teardown_warnings = session.close();

    info!(bytes = bytes_written, "file delivered");
    Ok(DeliveryReport {
        bytes_written,
        teardown_warnings,
    })
}

/// How concurrent deliveries are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializationMode {
    /// One job at a time per printer target.
    #[default]
    PerTarget,
    /// One job at a time across every target.
    Global,
}

/// Mutual exclusion for deliveries.
///
/// Locks are created on first use and kept for the life of the gate.
#[derive(Debug, Default)]
pub struct PrintGate {
    mode: SerializationMode,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PrintGate {
    pub fn new(mode: SerializationMode) -> Self {
        Self {
            mode,
            locks: Mutex::default(),
        }
    }

    pub fn mode(&self) -> SerializationMode {
        self.mode
    }

    fn lock_for(&self, target: &str) -> Arc<Mutex<()>> {
        let key = match self.mode {
            SerializationMode::PerTarget => target,
            SerializationMode::Global => "",
        };
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    /// Run `f` while holding the lock for `target`.
    pub fn run<T>(&self, target: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(target);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}

/// Where and how receipts are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    /// Printer target: a spooler printer name or a device path.
    pub printer: String,
    pub job_name: String,
    /// Also persist every buffer here before delivering.
    pub output_path: Option<PathBuf>,
    pub serialization: SerializationMode,
}

impl DeliveryConfig {
    pub fn new(printer: impl Into<String>) -> Self {
        Self {
            printer: printer.into(),
            job_name: DEFAULT_JOB_NAME.to_string(),
            output_path: None,
            serialization: SerializationMode::default(),
        }
    }
}

/// A spooler bound to one configured printer.
pub struct Deliverer<S> {
    spooler: S,
    config: DeliveryConfig,
    gate: PrintGate,
}

impl<S: Spooler> Deliverer<S> {
    pub fn new(spooler: S, config: DeliveryConfig) -> Self {
        let gate = PrintGate::new(config.serialization);
        Self {
            spooler,
            config,
            gate,
        }
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    pub fn spooler(&self) -> &S {
        &self.spooler
    }

    /// Persist the buffer if configured, then deliver it.
    pub fn deliver(&self, buffer: &CommandBuffer) -> Result<DeliveryReport, RasidError> {
        let config = &self.config;
        self.gate.run(&config.printer, || {
            if let Some(path) = &config.output_path {
                buffer.write_to(path)?;
            }
            deliver(
                &self.spooler,
                &config.printer,
                buffer.as_bytes(),
                &config.job_name,
            )
        })
    }

    pub fn deliver_file(&self, path: impl AsRef<Path>) -> Result<DeliveryReport, RasidError> {
        let config = &self.config;
        self.gate.run(&config.printer, || {
            deliver_file(&self.spooler, &config.printer, path, &config.job_name)
        })
    }
}
