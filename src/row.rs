//! Normalized result rows.
//!
//! Query results cross the client boundary as plain maps of column name to
//! [`SqlValue`], so the facade can post-process rows (GeoJSON assembly,
//! binary tile/geobuf extraction) without depending on any one driver's
//! row type.

use std::collections::HashMap;

use serde::Serialize;

/// A single result row: column name to value.
pub type Row = HashMap<String, SqlValue>;

/// A database value, reduced to the handful of shapes the facade cares
/// about. Everything else arrives as `Text` via the driver's fallback.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
}

impl SqlValue {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            SqlValue::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SqlValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(value: serde_json::Value) -> Self {
        SqlValue::Json(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(bytes: Vec<u8>) -> Self {
        SqlValue::Bytes(bytes)
    }
}

impl From<&str> for SqlValue {
    fn from(text: &str) -> Self {
        SqlValue::Text(text.to_string())
    }
}
