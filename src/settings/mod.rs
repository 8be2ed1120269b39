//! Typed read access to a reconciled settings file.
//!
//! A [`Settings`] value is an immutable snapshot of one parse of the file.
//! Getters take a dotted key and the default to use when the key is missing
//! or holds a value of another type, so a hand-edited file can never make a
//! lookup fail. [`SettingsStore`] owns the current snapshot and swaps it
//! wholesale on reload.

mod options;
mod store;


pub use options::{SqlSettings, keys};
pub use store::SettingsStore;

use crate::document::{Document, KeyPath, Scalar, ScalarValue};
use crate::error::{ConfsyncError, Result};
use serde::de::DeserializeOwned;

/// The bundled settings template with every recognized option.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/settings.yml");

/// Immutable view over one parsed settings document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    document: Document,
}

impl Settings {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// A snapshot with no entries; every getter returns its default.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.document.get_scalar(&KeyPath::parse(key))
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.scalar(key).and_then(Scalar::as_bool).unwrap_or(default)
    }

    /// Floats are truncated toward zero when they fit an `i64`.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.scalar(key)
            .and_then(|s| match *s.value() {
                ScalarValue::Int(i) => Some(i),
                ScalarValue::Float(x) if x.is_finite() && x.abs() < i64::MAX as f64 => {
                    Some(x.trunc() as i64)
                }
                _ => None,
            })
            .unwrap_or(default)
    }

    /// Integers are widened.
    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.scalar(key).and_then(Scalar::as_float).unwrap_or(default)
    }

    /// Any scalar reads as its string form; sections fall back to `default`.
    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.scalar(key)
            .map_or_else(|| default.to_string(), |s| s.value().to_string())
    }

    /// Deserialize the whole document into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(self.document.to_yaml_value()).map_err(|e| {
            ConfsyncError::UserError(format!("failed to deserialize settings: {}", e))
        })
    }
}
