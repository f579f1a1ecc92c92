//! # Intermediate Representation (IR)
//!
//! The IR sits between the receipt encoder and raw ESC/POS bytes.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌───────────────┐
//! │   Invoice   │ ──► │  Encoder +  │ ──► │ IR        │ ──► │ Codegen       │
//! │             │     │ StyleContext│     │ (Vec<Op>) │     │ CommandBuffer │
//! └─────────────┘     └─────────────┘     └───────────┘     └───────────────┘
//! ```
//!
//! ```
//! use rasid::ir::{Op, Program};
//! use rasid::protocol::text::Justify;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetJustify(Justify::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::Cut { partial: false });
//!
//! let buffer = program.to_buffer();
//! assert!(buffer.as_bytes().ends_with(&[0x1D, 0x56, 0x41, 0x00]));
//! ```

mod buffer;
mod codegen;
mod ops;
mod style;

pub use buffer::CommandBuffer;
pub use ops::*;
pub use style::StyleContext;
