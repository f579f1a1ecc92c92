//! # Invoice Receipt Encoder
//!
//! Turns an [`Invoice`] into the ESC/POS command stream for one receipt.
//! Encoding is a pure function of the invoice and the [`ShopProfile`]:
//! no I/O, no device state, and the same input always produces the same
//! bytes.
//!
//! ## Layout
//!
//! ```text
//!                 DK & NCK              (bold, 2x2)
//!  Shop: 32 & 44, 4th Floor, Anexco Tower
//!        8 Phoenix Road, Fulbaria, Shahbag
//!                Dhaka-1000
//!      Phone: 01556341569, 01832775999
//!
//!             Invoice No: 518
//!             Date: 23/02/2024
//!
//! ID       Item                    Price Qty Total
//! ------------------------------------------------
//! 00000066 TROWSER SHARPA 900 2 1800
//! ------------------------------------------------
//!                                  Sub Total: 1800
//!
//!             ||| |||| || |||       (CODE39)
//!  Please bring cash memo for returning products
//!    Thank you for shopping with DK & NCK  (bold)
//!
//!
//!
//! ✂
//! ```
//!
//! ```
//! use rasid::invoice::{Invoice, LineItem};
//! use rasid::receipt::{self, ShopProfile};
//!
//! let invoice = Invoice {
//!     id: 518,
//!     date: "23/02/2024".into(),
//!     items: vec![LineItem::new("00000066", "TROWSER SHARPA", 900, 2, 1800)],
//!     subtotal: 1800,
//! };
//!
//! let buffer = receipt::encode(&invoice, &ShopProfile::default());
//! assert!(!buffer.is_empty());
//! ```

pub mod barcode;
mod profile;
pub mod table;

pub use barcode::{BarcodeSpec, Symbology};
pub use profile::ShopProfile;
pub use table::{ColumnWidths, RowLayout};

use crate::invoice::{Invoice, LineItem};
use crate::ir::{CommandBuffer, Op, Program, StyleContext, TextStyle};
use crate::protocol::text::CodePage;

/// Encode an invoice into a complete command buffer.
pub fn encode(invoice: &Invoice, profile: &ShopProfile) -> CommandBuffer {
    compile(invoice, profile).to_buffer()
}

/// Build the IR program for an invoice without generating bytes.
pub fn compile(invoice: &Invoice, profile: &ShopProfile) -> Program {
    let mut writer = ReceiptWriter::new();

    writer.shop_identity(profile);
    writer.blank();
    writer.invoice_details(invoice);
    writer.blank();
    writer.item_table(&invoice.items, invoice.subtotal, profile);
    writer.blank();
    writer.barcode(profile.barcode.encode(invoice.id));
    writer.closing_message(profile);
    for _ in 0..3 {
        writer.blank();
    }
    writer.cut();

    writer.finish()
}

/// Collects ops for one receipt, threading the style context.
struct ReceiptWriter {
    ops: Vec<Op>,
    style: StyleContext,
}

impl ReceiptWriter {
    fn new() -> Self {
        Self {
            ops: vec![Op::Init, Op::SetCodepage(CodePage::Wpc1252)],
            style: StyleContext::new(),
        }
    }

    fn line(&mut self, style: TextStyle, text: impl Into<String>) {
        self.style.line(&mut self.ops, style, text);
    }

    fn blank(&mut self) {
        self.ops.push(Op::Newline);
    }

    fn shop_identity(&mut self, profile: &ShopProfile) {
        let normal = TextStyle::new().center();

        self.line(TextStyle::new().bold(true).size(2, 2).center(), &profile.name);
        for line in &profile.address {
            self.line(normal, line);
        }
        self.line(normal, &profile.phone);
    }

    fn invoice_details(&mut self, invoice: &Invoice) {
        let normal = TextStyle::new().center();

        self.line(normal, format!("Invoice No: {}", invoice.id));
        self.line(normal, format!("Date: {}", table::printable(&invoice.date)));
    }

    fn item_table(&mut self, items: &[LineItem], subtotal: u64, profile: &ShopProfile) {
        let left = TextStyle::new();
        let widths = &profile.columns;

        self.line(left, table::header(widths));
        self.line(left, table::rule(widths));
        for item in items {
            self.line(left, table::row(item, widths, profile.layout));
        }
        self.line(left, table::rule(widths));
        self.line(TextStyle::new().right(), format!("Sub Total: {}", subtotal));
    }

    fn barcode(&mut self, bytes: Vec<u8>) {
        self.style.assert(&mut self.ops, TextStyle::new().center());
        self.ops.push(Op::Raw(bytes));
    }

    fn closing_message(&mut self, profile: &ShopProfile) {
        self.line(TextStyle::new().center(), &profile.return_policy);
        self.line(TextStyle::new().bold(true).center(), &profile.thank_you);
    }

    fn cut(&mut self) {
        self.ops.push(Op::Cut { partial: false });
    }

    fn finish(self) -> Program {
        Program { ops: self.ops }
    }
}

/// The demo invoice printed by `rasid generate` when no invoice file is
/// given.
pub fn sample_invoice(date: impl Into<String>) -> Invoice {
    Invoice {
        id: 518,
        date: date.into(),
        items: vec![
            LineItem::new("00000066", "TROWSER SHARPA", 900, 2, 1800),
            LineItem::new("00000065", "SHOE RED TAPE", 2800, 1, 2800),
            LineItem::new("00000062", "HAND GLOVES", 500, 1, 500),
        ],
        subtotal: 5100,
    }
}

/// Today's date in the receipt's `dd/mm/yyyy` form.
pub fn current_date() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::Justify;
    use pretty_assertions::assert_eq;

    fn invoice() -> Invoice {
        sample_invoice("23/02/2024")
    }

    #[test]
    fn test_block_order() {
        let program = compile(&invoice(), &ShopProfile::default());
        let lines = program.text_lines();

        let expected = vec![
            "DK & NCK",
            "Shop: 32 & 44, 4th Floor, Anexco Tower",
            "8 Phoenix Road, Fulbaria, Shahbag",
            "Dhaka-1000",
            "Phone: 01556341569, 01832775999",
            "",
            "Invoice No: 518",
            "Date: 23/02/2024",
            "",
            "ID       Item                    Price Qty Total",
            "------------------------------------------------",
            "00000066 TROWSER SHARPA 900 2 1800",
            "00000065 SHOE RED TAPE 2800 1 2800",
            "00000062 HAND GLOVES 500 1 500",
            "------------------------------------------------",
            "Sub Total: 5100",
            "",
            "Please bring cash memo for returning products",
            "Thank you for shopping with DK & NCK",
            "",
            "",
            "",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_starts_with_init_and_ends_with_cut() {
        let program = compile(&invoice(), &ShopProfile::default());
        assert_eq!(program.ops[0], Op::Init);
        assert_eq!(program.ops.last(), Some(&Op::Cut { partial: false }));
    }

    #[test]
    fn test_shop_name_style() {
        let program = compile(&invoice(), &ShopProfile::default());
        let name_at = program
            .iter()
            .position(|op| *op == Op::Text("DK & NCK".into()))
            .unwrap();
        let before = &program.ops[..name_at];
        assert!(before.contains(&Op::SetJustify(Justify::Center)));
        assert!(before.contains(&Op::SetBold(true)));
        assert!(before.contains(&Op::SetSize {
            width: 2,
            height: 2
        }));
    }

    #[test]
    fn test_style_only_changes_when_needed() {
        let program = compile(&invoice(), &ShopProfile::default());

        // Address lines and phone share one style, so bold is cleared once.
        let bold_off = program
            .iter()
            .filter(|op| **op == Op::SetBold(false))
            .count();
        assert_eq!(bold_off, 1);

        let mut prev: Option<&Op> = None;
        for op in program.iter() {
            if let (Some(Op::SetBold(a)), Op::SetBold(b)) = (prev, op) {
                panic!("consecutive SetBold({}) / SetBold({})", a, b);
            }
            prev = Some(op);
        }
    }

    #[test]
    fn test_barcode_is_raw_and_centered() {
        let program = compile(&invoice(), &ShopProfile::default());
        let raw_at = program
            .iter()
            .position(|op| matches!(op, Op::Raw(_)))
            .unwrap();
        assert_eq!(
            program.ops[raw_at],
            Op::Raw(BarcodeSpec::default().encode(518))
        );

        let last_justify = program.ops[..raw_at]
            .iter()
            .rev()
            .find_map(|op| match op {
                Op::SetJustify(j) => Some(*j),
                _ => None,
            });
        assert_eq!(last_justify, Some(Justify::Center));
    }

    #[test]
    fn test_aligned_layout() {
        let profile = ShopProfile {
            layout: RowLayout::Aligned,
            ..Default::default()
        };
        let lines = compile(&invoice(), &profile).text_lines();
        assert!(lines.contains(&"00000066 TROWSER SHARPA            900   2  1800".to_string()));
    }
}
