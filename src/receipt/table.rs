//! Fixed-width item table: captions, rows and separator rule.
//!
//! ```text
//! ID       Item                    Price Qty Total
//! ------------------------------------------------
//! 00000066 TROWSER SHARPA 900 2 1800
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::invoice::LineItem;

/// Declared maximum display width of every item column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub id: usize,
    pub name: usize,
    pub price: usize,
    pub quantity: usize,
    pub total: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            id: 8,
            name: 23,
            price: 5,
            quantity: 3,
            total: 5,
        }
    }
}

impl ColumnWidths {
    /// Total line width: every column plus one space between columns.
    pub fn line_width(&self) -> usize {
        self.id + self.name + self.price + self.quantity + self.total + 4
    }
}

/// How item rows are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLayout {
    /// Truncated fields joined by single spaces, no padding.
    #[default]
    Compact,
    /// Text columns left-aligned and numeric columns right-aligned
    /// within their widths, lining up with the header captions.
    Aligned,
}

/// Keep at most `width` characters from the start of `s`.
///
/// Shorter values are returned unchanged; nothing is padded, wrapped or
/// marked as cut.
pub fn truncate(s: &str, width: usize) -> &str {
    match s.char_indices().nth(width) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Replace control characters with spaces so invoice text stays on one
/// line and cannot carry printer commands.
pub fn printable(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{:>width$}", truncate(s, width), width = width)
}

/// Column captions.
pub fn header(widths: &ColumnWidths) -> String {
    [
        pad_left("ID", widths.id),
        pad_left("Item", widths.name),
        pad_right("Price", widths.price),
        pad_right("Qty", widths.quantity),
        pad_right("Total", widths.total),
    ]
    .join(" ")
}

/// Separator rule spanning the whole table.
pub fn rule(widths: &ColumnWidths) -> String {
    "-".repeat(widths.line_width())
}

/// Format one item row.
pub fn row(item: &LineItem, widths: &ColumnWidths, layout: RowLayout) -> String {
    let price = item.unit_price.to_string();
    let quantity = item.quantity.to_string();
    let total = item.total_price.to_string();
    let product_id = printable(&item.product_id);
    let name = printable(&item.name);

    let fields = match layout {
        RowLayout::Compact => [
            truncate(&product_id, widths.id).to_string(),
            truncate(&name, widths.name).to_string(),
            truncate(&price, widths.price).to_string(),
            truncate(&quantity, widths.quantity).to_string(),
            truncate(&total, widths.total).to_string(),
        ],
        RowLayout::Aligned => [
            pad_left(&product_id, widths.id),
            pad_left(&name, widths.name),
            pad_right(&price, widths.price),
            pad_right(&quantity, widths.quantity),
            pad_right(&total, widths.total),
        ],
    };
    fields.join(" ")
}
