//! # Invoice Data Model
//!
//! The structured input of the receipt encoder, and the wire-level
//! [`PrintJob`] that carries it over HTTP.
//!
//! Amounts and identifiers are unsigned integers. On the wire each
//! numeric field may also be a string of ASCII digits; see [`wire`] for
//! the exact coercion rule.

pub mod wire;

use serde::{Deserialize, Serialize};

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Fixed-width product code, e.g. `00000066`.
    pub product_id: String,
    pub name: String,
    #[serde(deserialize_with = "wire::unsigned")]
    pub unit_price: u64,
    #[serde(deserialize_with = "wire::unsigned")]
    pub quantity: u64,
    #[serde(deserialize_with = "wire::unsigned")]
    pub total_price: u64,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: u64,
        quantity: u64,
        total_price: u64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            total_price,
        }
    }
}

/// A complete invoice. The encoder only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(deserialize_with = "wire::unsigned")]
    pub id: u64,
    pub date: String,
    pub items: Vec<LineItem>,
    #[serde(deserialize_with = "wire::unsigned")]
    pub subtotal: u64,
}

/// A print request as received from the transport layer.
///
/// The secret is checked by the HTTP handler before the invoice reaches
/// the encoder.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintJob {
    pub secret_key: String,
    pub invoice: Invoice,
}

impl PrintJob {
    /// Decode a job from its JSON wire form.
    pub fn from_json(data: &[u8]) -> crate::error::Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }
}
