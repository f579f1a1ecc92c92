//! # ESC/POS 1D Barcode Commands
//!
//! A 1D barcode is printed by optionally configuring its geometry and
//! human-readable text, then sending the symbol itself:
//!
//! ```text
//! GS h n      bar height in dots
//! GS w n      module (narrow bar) width
//! GS H n      HRI position
//! GS f n      HRI font
//! GS k m d1..dk NUL   print symbol (function A)
//! ```
//!
//! ```
//! use rasid::protocol::barcode::{self, HriPosition};
//!
//! let mut data = Vec::new();
//! data.extend(barcode::height(80));
//! data.extend(barcode::hri_position(HriPosition::Below));
//! data.extend(barcode::print(4, b"DKNCKS00000518"));
//! ```

use serde::{Deserialize, Serialize};

use super::commands::{GS, NUL};

/// Function-A symbology selector for CODE39 (`GS k 4`).
pub const CODE39: u8 = 4;

/// HRI (Human Readable Interpretation) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HriPosition {
    None = 0,
    Above = 1,
    #[default]
    Below = 2,
    Both = 3,
}

/// HRI font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HriFont {
    #[default]
    A = 0,
    B = 1,
}

/// # Set Barcode Height (GS h n)
///
/// `n` is the bar height in dots; zero is raised to one.
pub fn height(dots: u8) -> Vec<u8> {
    vec![GS, b'h', dots.max(1)]
}

/// # Set Barcode Module Width (GS w n)
///
/// Printers accept 2..=6; values outside are clamped.
pub fn module_width(n: u8) -> Vec<u8> {
    vec![GS, b'w', n.clamp(2, 6)]
}

/// # Select HRI Print Position (GS H n)
pub fn hri_position(pos: HriPosition) -> Vec<u8> {
    vec![GS, b'H', pos as u8]
}

/// # Select HRI Font (GS f n)
pub fn hri_font(font: HriFont) -> Vec<u8> {
    vec![GS, b'f', font as u8]
}

/// # Print Barcode, Function A (GS k m d1...dk NUL)
///
/// `m` selects the symbology (0-6); the data is sent verbatim and
/// terminated with a single NUL.
///
/// ```
/// use rasid::protocol::barcode;
///
/// let cmd = barcode::print(barcode::CODE39, b"AB1");
/// assert_eq!(cmd, vec![0x1D, 0x6B, 0x04, b'A', b'B', b'1', 0x00]);
/// ```
pub fn print(m: u8, data: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(data.len() + 4);
    cmd.extend([GS, b'k', m]);
    cmd.extend_from_slice(data);
    cmd.push(NUL);
    cmd
}

/// Extract the symbol data from a barcode command sequence.
///
/// Skips any mode-setting prefix, locates the first `GS k m` and returns
/// the bytes up to (not including) its NUL terminator. Returns `None`
/// when there is no complete print command.
pub fn symbol_payload(bytes: &[u8]) -> Option<&[u8]> {
    let start = bytes.windows(2).position(|w| w == [GS, b'k'])? + 3;
    let rest = bytes.get(start..)?;
    let end = rest.iter().position(|&b| b == NUL)?;
    Some(&rest[..end])
}
