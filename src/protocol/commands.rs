//! # ESC/POS Protocol Commands
//!
//! This module implements the basic ESC/POS control commands used by
//! generic thermal receipt printers (Epson TM series and the many clones
//! that speak the same dialect).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC a n`, `GS V m n`, `GS k m data NUL`
//!
//! Opcodes are decoded positionally by the printer, so every builder
//! returns its bytes in exact wire order.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter control and all barcode commands.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// NUL - Terminator for function-A barcode data
pub const NUL: u8 = 0x00;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets every mode (bold, size,
/// justification, code page) to the power-on default.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use rasid::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// Print the line buffer and feed one line (LF).
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Feed and Full Cut (GS V A n)
///
/// Feeds the paper to the cutting position plus `n` motion units, then
/// performs a full cut. This is the print-and-cut sequence that ends
/// every receipt.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V A n |
/// | Hex     | 1D 56 41 n |
///
/// ```
/// use rasid::protocol::commands;
///
/// assert_eq!(commands::cut_full_feed(0), vec![0x1D, 0x56, 0x41, 0x00]);
/// ```
#[inline]
pub fn cut_full_feed(n: u8) -> Vec<u8> {
    vec![GS, b'V', b'A', n]
}

/// # Feed and Partial Cut (GS V B n)
#[inline]
pub fn cut_partial_feed(n: u8) -> Vec<u8> {
    vec![GS, b'V', b'B', n]
}
