//! # ESC/POS Text Styling Commands
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | Emphasized text |
//! | Size | GS ! n | 1x-8x width and height |
//! | Justify | ESC a n | Left / center / right |
//! | Code page | ESC t n | Character table for bytes 0x80-0xFF |
//!
//! Every mode set here persists on the device until changed again or
//! until `ESC @`. Callers that need a given style must assert it.

use tracing::warn;

use super::commands::{ESC, GS};

// ============================================================================
// JUSTIFICATION
// ============================================================================

/// Text justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// Takes effect only at the start of a line.
///
/// ```
/// use rasid::protocol::text::{justify, Justify};
///
/// assert_eq!(justify(Justify::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn justify(j: Justify) -> Vec<u8> {
    vec![ESC, b'a', j as u8]
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
///
/// Only the least significant bit of `n` is read by the printer.
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', u8::from(enabled)]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// `n` packs the width multiplier in the high nibble and the height
/// multiplier in the low nibble, both stored as `multiplier - 1`:
///
/// ```text
/// bit  7 6 5 4 | 3 2 1 0
///      width-1 | height-1
/// ```
///
/// Multipliers are clamped to 1..=8.
///
/// ```
/// use rasid::protocol::text::size;
///
/// assert_eq!(size(1, 1), vec![0x1D, 0x21, 0x00]);
/// assert_eq!(size(2, 2), vec![0x1D, 0x21, 0x11]);
/// ```
pub fn size(width: u8, height: u8) -> Vec<u8> {
    let w = width.clamp(1, 8) - 1;
    let h = height.clamp(1, 8) - 1;
    vec![GS, b'!', (w << 4) | h]
}

// ============================================================================
// CODE PAGE
// ============================================================================

/// Character code tables used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CodePage {
    /// WPC1252 (Windows Latin-1)
    Wpc1252 = 16,
}

/// # Select Character Code Table (ESC t n)
pub fn codepage(cp: CodePage) -> Vec<u8> {
    vec![ESC, b't', cp as u8]
}

/// Encode text for a printer set to [`CodePage::Wpc1252`].
///
/// Printable ASCII passes through unchanged. Control characters and
/// characters with no Windows-1252 representation are replaced with `?`,
/// so text never carries command bytes.
pub fn encode(s: &str) -> Vec<u8> {
    if s.bytes().all(|b| b.is_ascii() && !b.is_ascii_control()) {
        return s.as_bytes().to_vec();
    }

    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for ch in s.chars() {
        if ch.is_control() {
            warn!(character = ?ch, "control character in text, replacing with '?'");
            out.push(b'?');
            continue;
        }
        if ch.is_ascii() {
            out.push(ch as u8);
            continue;
        }
        let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        if had_errors || bytes.len() != 1 {
            warn!(character = %ch, "no WPC1252 mapping, replacing with '?'");
            out.push(b'?');
        } else {
            out.push(bytes[0]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_justify() {
        assert_eq!(justify(Justify::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(justify(Justify::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(justify(Justify::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(false), vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_size_packs_nibbles() {
        assert_eq!(size(1, 1), vec![0x1D, 0x21, 0x00]);
        assert_eq!(size(2, 1), vec![0x1D, 0x21, 0x10]);
        assert_eq!(size(1, 2), vec![0x1D, 0x21, 0x01]);
        assert_eq!(size(2, 2), vec![0x1D, 0x21, 0x11]);
    }

    #[test]
    fn test_size_clamps() {
        assert_eq!(size(0, 0), vec![0x1D, 0x21, 0x00]);
        assert_eq!(size(12, 9), vec![0x1D, 0x21, 0x77]);
    }

    #[test]
    fn test_codepage() {
        assert_eq!(codepage(CodePage::Wpc1252), vec![0x1B, 0x74, 0x10]);
    }

    #[test]
    fn test_encode_ascii_passthrough() {
        assert_eq!(encode("Sub Total: 1800"), b"Sub Total: 1800".to_vec());
    }

    #[test]
    fn test_encode_latin1() {
        assert_eq!(encode("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode("€5"), vec![0x80, b'5']);
    }

    #[test]
    fn test_encode_unmapped() {
        assert_eq!(encode("ট"), vec![b'?']);
    }

    #[test]
    fn test_encode_replaces_control_chars() {
        assert_eq!(encode("A\nB\x1b@"), b"A?B?@".to_vec());
        assert_eq!(encode("é\x1dV\x00"), vec![0xE9, b'?', b'V', b'?']);
    }
}
