//! Wire coercion for numeric invoice fields.
//!
//! Rule: a numeric field is a JSON non-negative integer, or a JSON string
//! holding only ASCII digits (surrounding whitespace is trimmed). The
//! string form is parsed to the same `u64`. Negative, fractional, empty
//! or non-digit values are rejected while decoding.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(u64),
    Text(String),
    Other(serde_json::Value),
}

/// `deserialize_with` target for every numeric invoice field.
pub fn unsigned<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Numeric::deserialize(deserializer)? {
        Numeric::Int(n) => Ok(n),
        Numeric::Text(s) => parse_digits(&s)
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&s), &"a string of digits")),
        Numeric::Other(v) => Err(de::Error::invalid_type(
            unexpected(&v),
            &"a non-negative integer or a string of digits",
        )),
    }
}

fn parse_digits(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn unexpected(v: &serde_json::Value) -> Unexpected<'_> {
    match v {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Unexpected::Signed(i),
            None => Unexpected::Float(n.as_f64().unwrap_or_default()),
        },
        serde_json::Value::String(s) => Unexpected::Str(s),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}
