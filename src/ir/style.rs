//! # Style Context
//!
//! ESC/POS printers keep bold, size and justification across writes.
//! [`StyleContext`] tracks what the device currently holds and emits only
//! the style ops needed to reach the next segment's style.
//!
//! ```
//! use rasid::ir::{Op, StyleContext, TextStyle};
//!
//! let mut ops = vec![Op::Init];
//! let mut ctx = StyleContext::new();
//!
//! ctx.text(&mut ops, TextStyle::new().bold(true), "A");
//! ctx.text(&mut ops, TextStyle::new().bold(true), "B");
//!
//! // Bold is asserted once; the second segment already matches.
//! let bolds = ops.iter().filter(|op| matches!(op, Op::SetBold(_))).count();
//! assert_eq!(bolds, 1);
//! ```

use super::ops::{Op, TextStyle};

/// Tracks the style last asserted on the device.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    current: TextStyle,
}

impl StyleContext {
    /// A context matching the device right after `ESC @`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> TextStyle {
        self.current
    }

    /// Forget tracked state, as `Op::Init` does on the device.
    pub fn reset(&mut self) {
        self.current = TextStyle::default();
    }

    /// Emit the ops that move the device from the current style to `next`.
    pub fn assert(&mut self, ops: &mut Vec<Op>, next: TextStyle) {
        if next.justify != self.current.justify {
            ops.push(Op::SetJustify(next.justify));
        }
        if next.bold != self.current.bold {
            ops.push(Op::SetBold(next.bold));
        }
        if next.width != self.current.width || next.height != self.current.height {
            ops.push(Op::SetSize {
                width: next.width,
                height: next.height,
            });
        }
        self.current = next;
    }

    /// Assert `style`, then write `text`.
    pub fn text(&mut self, ops: &mut Vec<Op>, style: TextStyle, text: impl Into<String>) {
        self.assert(ops, style);
        ops.push(Op::Text(text.into()));
    }

    /// Assert `style`, write `text`, then feed one line.
    pub fn line(&mut self, ops: &mut Vec<Op>, style: TextStyle, text: impl Into<String>) {
        self.text(ops, style, text);
        ops.push(Op::Newline);
    }
}
