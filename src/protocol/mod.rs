//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS thermal receipt printers.
//!
//! - [`commands`]: Init, line feed, cutter control
//! - [`text`]: Bold, character size, justification, code page
//! - [`barcode`]: 1D barcode geometry, HRI and symbol printing
//!
//! ```
//! use rasid::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::justify(text::Justify::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT");
//! data.extend(commands::line_feed());
//! data.extend(commands::cut_full_feed(0));
//! ```
//!
//! Each builder returns owned bytes in exact wire order; the printer
//! decodes opcode and operand positionally.

pub mod barcode;
pub mod commands;
pub mod text;
