//! Invoice barcode block.
//!
//! Builds the symbol for an invoice id and wraps it in the mode-setting
//! and print commands from [`crate::protocol::barcode`].

use serde::{Deserialize, Serialize};

use crate::error::RasidError;
use crate::protocol::barcode::{self, HriFont, HriPosition};

/// Barcode symbology used for the invoice id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    /// CODE39 (`GS k 4`). The id is zero-padded to a fixed width.
    #[default]
    Code39,
    /// Any other function-A selector; the id is used unpadded.
    Custom(u8),
}

impl Symbology {
    fn selector(self) -> u8 {
        match self {
            Symbology::Code39 => barcode::CODE39,
            Symbology::Custom(m) => m,
        }
    }

    fn pads_id(self) -> bool {
        matches!(self, Symbology::Code39)
    }
}

/// Characters CODE39 can encode.
const CODE39_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ -.$/+%";

/// How the invoice barcode is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeSpec {
    pub symbology: Symbology,
    /// Fixed store prefix placed before the id.
    pub prefix: String,
    /// Digits the id is zero-padded to for fixed-length symbologies.
    pub id_width: usize,
    /// Emit GS h / GS w / GS H / GS f before the symbol.
    pub mode_settings: bool,
    pub height: u8,
    pub module_width: u8,
    pub hri: HriPosition,
    pub hri_font: HriFont,
}

impl Default for BarcodeSpec {
    fn default() -> Self {
        Self {
            symbology: Symbology::Code39,
            prefix: "DKNCKS".to_string(),
            id_width: 8,
            mode_settings: true,
            height: 80,
            module_width: 2,
            hri: HriPosition::Below,
            hri_font: HriFont::A,
        }
    }
}

impl BarcodeSpec {
    /// The symbol text for an invoice id, without any command bytes.
    pub fn symbol(&self, id: u64) -> String {
        if self.symbology.pads_id() {
            format!("{}{:0width$}", self.prefix, id, width = self.id_width)
        } else {
            format!("{}{}", self.prefix, id)
        }
    }

    /// Full barcode block: optional mode settings, then `GS k m symbol NUL`.
    pub fn encode(&self, id: u64) -> Vec<u8> {
        let mut out = Vec::new();
        if self.mode_settings {
            out.extend(barcode::height(self.height));
            out.extend(barcode::module_width(self.module_width));
            out.extend(barcode::hri_position(self.hri));
            out.extend(barcode::hri_font(self.hri_font));
        }
        out.extend(barcode::print(
            self.symbology.selector(),
            self.symbol(id).as_bytes(),
        ));
        out
    }

    /// Reject prefixes the symbology cannot carry.
    pub fn validate(&self) -> Result<(), RasidError> {
        if self.symbology == Symbology::Code39
            && let Some(bad) = self.prefix.chars().find(|c| !CODE39_ALPHABET.contains(*c))
        {
            return Err(RasidError::Config(format!(
                "barcode prefix '{}' contains '{}', which CODE39 cannot encode",
                self.prefix, bad
            )));
        }
        if self.prefix.contains('\0') {
            return Err(RasidError::Config(
                "barcode prefix must not contain NUL".to_string(),
            ));
        }
        Ok(())
    }
}
