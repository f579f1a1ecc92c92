//! # IR Opcodes
//!
//! The intermediate representation for receipt printing: a sequence of
//! primitive printer operations that can be inspected in tests and
//! compiled to ESC/POS bytes.
//!
//! ```text
//! Invoice → receipt encoder → IR (Vec<Op>) → Codegen → CommandBuffer
//! ```
//!
//! Style changes are individual ops so the style context can emit only
//! the ones that actually change device state.

use crate::protocol::text::{CodePage, Justify};

/// Text style asserted before a text segment.
///
/// Mirrors the modes the device retains across writes. `width` and
/// `height` are multipliers (1 = normal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub width: u8,
    pub height: u8,
    pub justify: Justify,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            bold: false,
            width: 1,
            height: 1,
            justify: Justify::Left,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, enabled: bool) -> Self {
        self.bold = enabled;
        self
    }

    /// Set the scale, clamped to 1..=8 per axis.
    pub fn size(mut self, width: u8, height: u8) -> Self {
        self.width = width.clamp(1, 8);
        self.height = height.clamp(1, 8);
        self
    }

    pub fn justify(mut self, j: Justify) -> Self {
        self.justify = j;
        self
    }

    pub fn center(self) -> Self {
        self.justify(Justify::Center)
    }

    pub fn right(self) -> Self {
        self.justify(Justify::Right)
    }
}

/// IR opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets every mode to default.
    Init,

    /// Feed to the cutter and cut. `partial: true` leaves a small hinge.
    Cut { partial: bool },

    // ========== Style Changes ==========
    SetJustify(Justify),

    SetBold(bool),

    /// Character size multipliers, 1..=8 per axis.
    SetSize { width: u8, height: u8 },

    SetCodepage(CodePage),

    // ========== Content ==========
    /// Text without a trailing newline.
    Text(String),

    /// Line feed.
    Newline,

    /// Raw bytes passed through untouched (barcode blocks).
    Raw(Vec<u8>),
}

/// A sequence of ops for one print job.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// The text of every line, joined across `Text` ops and split at
    /// `Newline`. Style and raw ops are skipped.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for op in &self.ops {
            match op {
                Op::Text(s) => current.push_str(s),
                Op::Newline => lines.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_with_init() {
        let program = Program::with_init();
        assert_eq!(program.len(), 1);
        assert_eq!(program.ops[0], Op::Init);
    }

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert!(!style.bold);
        assert_eq!((style.width, style.height), (1, 1));
        assert_eq!(style.justify, Justify::Left);
    }

    #[test]
    fn test_text_style_size_clamps() {
        let style = TextStyle::new().size(0, 20);
        assert_eq!((style.width, style.height), (1, 8));
    }

    #[test]
    fn test_text_lines() {
        let program: Program = vec![
            Op::Init,
            Op::SetBold(true),
            Op::Text("Invoice ".into()),
            Op::Text("No: 1".into()),
            Op::Newline,
            Op::Newline,
            Op::Raw(vec![0x1D, 0x6B]),
            Op::Text("tail".into()),
        ]
        .into_iter()
        .collect();

        assert_eq!(program.text_lines(), vec!["Invoice No: 1", "", "tail"]);
    }
}
