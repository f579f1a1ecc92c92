//! Shop profile: the fixed text and layout constants printed around
//! every invoice.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::barcode::BarcodeSpec;
use super::table::{ColumnWidths, RowLayout};
use crate::error::RasidError;

/// Everything on the receipt that does not come from the invoice.
///
/// Loaded from JSON with every field optional:
///
/// ```
/// use rasid::receipt::ShopProfile;
///
/// let profile: ShopProfile = serde_json::from_str(r#"{"name": "CORNER SHOP"}"#).unwrap();
/// assert_eq!(profile.name, "CORNER SHOP");
/// assert_eq!(profile.columns.name, 23);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopProfile {
    pub name: String,
    pub address: Vec<String>,
    pub phone: String,
    pub return_policy: String,
    pub thank_you: String,
    pub columns: ColumnWidths,
    pub layout: RowLayout,
    pub barcode: BarcodeSpec,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: "DK & NCK".to_string(),
            address: vec![
                "Shop: 32 & 44, 4th Floor, Anexco Tower".to_string(),
                "8 Phoenix Road, Fulbaria, Shahbag".to_string(),
                "Dhaka-1000".to_string(),
            ],
            phone: "Phone: 01556341569, 01832775999".to_string(),
            return_policy: "Please bring cash memo for returning products".to_string(),
            thank_you: "Thank you for shopping with DK & NCK".to_string(),
            columns: ColumnWidths::default(),
            layout: RowLayout::Compact,
            barcode: BarcodeSpec::default(),
        }
    }
}

impl ShopProfile {
    /// Load and validate a profile from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RasidError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            RasidError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let profile: Self = serde_json::from_slice(&data)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), RasidError> {
        let c = &self.columns;
        if [c.id, c.name, c.price, c.quantity, c.total].contains(&0) {
            return Err(RasidError::Config(
                "column widths must be at least 1".to_string(),
            ));
        }
        self.barcode.validate()
    }
}
