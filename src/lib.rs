//! # Rasid - ESC/POS Invoice Printing
//!
//! Rasid turns shop invoices into ESC/POS command streams for 80mm
//! thermal receipt printers and delivers them through a raw print-spooler
//! session. It provides:
//!
//! - **Receipt encoding**: a deterministic invoice → bytes pipeline with
//!   styled header, fixed-width item table, CODE39 barcode and cut
//! - **Protocol implementation**: ESC/POS command builders
//! - **Spooler sessions**: a lifecycle-checked open/start/write/end/close
//!   sequence with guaranteed teardown
//! - **Delivery**: one-shot transactions, serialized per printer
//! - **HTTP listener**: `POST /print-escpos` for point-of-sale clients
//!
//! ## Quick Start
//!
//! ```no_run
//! use rasid::{
//!     delivery,
//!     receipt::{self, ShopProfile},
//!     spooler::SystemSpooler,
//! };
//!
//! let invoice = receipt::sample_invoice("23/02/2024");
//! let buffer = receipt::encode(&invoice, &ShopProfile::default());
//!
//! delivery::deliver(&SystemSpooler::default(), "EPSON TM-T82", buffer.as_bytes(), "DKNCK Receipt")?;
//!
//! # Ok::<(), rasid::RasidError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`invoice`] | Invoice data model and wire decoding |
//! | [`receipt`] | Invoice → IR program → command buffer |
//! | [`ir`] | Printer ops, style context, codegen |
//! | [`protocol`] | ESC/POS command builders |
//! | [`spooler`] | Spooler session state machine and backends |
//! | [`delivery`] | Single-attempt delivery and print serialization |
//! | [`server`] | HTTP print listener |
//! | [`error`] | Error types |

pub mod delivery;
pub mod error;
pub mod invoice;
pub mod ir;
pub mod protocol;
pub mod receipt;
pub mod server;
pub mod spooler;

// Re-exports for convenience
pub use error::RasidError;
pub use invoice::{Invoice, LineItem, PrintJob};
pub use ir::CommandBuffer;
