//! # Code Generation
//!
//! Converts IR programs to ESC/POS bytes.

use super::buffer::CommandBuffer;
use super::ops::{Op, Program};
use crate::protocol::{commands, text};

impl Program {
    /// Compile the program to an ESC/POS command buffer.
    pub fn to_buffer(&self) -> CommandBuffer {
        let mut out = CommandBuffer::new();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => out.extend(commands::init()),
                Op::Cut { partial } => {
                    if *partial {
                        out.extend(commands::cut_partial_feed(0));
                    } else {
                        out.extend(commands::cut_full_feed(0));
                    }
                }

                // ===== Style Changes =====
                Op::SetJustify(j) => out.extend(text::justify(*j)),
                Op::SetBold(enabled) => out.extend(text::bold(*enabled)),
                Op::SetSize { width, height } => out.extend(text::size(*width, *height)),
                Op::SetCodepage(cp) => out.extend(text::codepage(*cp)),

                // ===== Content =====
                Op::Text(s) => out.extend(text::encode(s)),
                Op::Newline => out.extend(commands::line_feed()),
                Op::Raw(bytes) => out.extend(bytes.iter().copied()),
            }
        }

        out
    }

    /// Compile the program to raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_buffer().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::{CodePage, Justify};

    #[test]
    fn test_empty_program() {
        assert!(Program::new().to_bytes().is_empty());
    }

    #[test]
    fn test_init_only() {
        assert_eq!(Program::with_init().to_bytes(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_simple_text() {
        let mut program = Program::with_init();
        program.push(Op::Text("Hello".into()));
        program.push(Op::Newline);

        assert_eq!(
            program.to_bytes(),
            vec![0x1B, 0x40, b'H', b'e', b'l', b'l', b'o', 0x0A]
        );
    }

    #[test]
    fn test_styled_text() {
        let mut program = Program::with_init();
        program.push(Op::SetCodepage(CodePage::Wpc1252));
        program.push(Op::SetJustify(Justify::Center));
        program.push(Op::SetBold(true));
        program.push(Op::SetSize {
            width: 2,
            height: 2,
        });
        program.push(Op::Text("DK".into()));

        let bytes = program.to_bytes();
        assert!(bytes.windows(3).any(|w| w == [0x1B, 0x74, 0x10]));
        assert!(bytes.windows(3).any(|w| w == [0x1B, 0x61, 0x01]));
        assert!(bytes.windows(3).any(|w| w == [0x1B, 0x45, 0x01]));
        assert!(bytes.windows(3).any(|w| w == [0x1D, 0x21, 0x11]));
        assert!(bytes.ends_with(b"DK"));
    }

    #[test]
    fn test_cut() {
        let mut program = Program::new();
        program.push(Op::Cut { partial: false });
        assert_eq!(program.to_bytes(), vec![0x1D, 0x56, 0x41, 0x00]);

        let mut program = Program::new();
        program.push(Op::Cut { partial: true });
        assert_eq!(program.to_bytes(), vec![0x1D, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn test_raw_bytes() {
        let mut program = Program::new();
        program.push(Op::Raw(vec![0x01, 0x02, 0x03]));
        assert_eq!(program.to_bytes(), vec![0x01, 0x02, 0x03]);
    }
}
