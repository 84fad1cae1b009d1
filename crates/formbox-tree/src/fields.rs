//! Raw style records.
//!
//! A style record is the flat bag of fields a form author sets on a node:
//! `width`, `width_unit`, `axis`, `padding_left`, ... plus their
//! `mobile_`-prefixed overrides. Values stay as untyped JSON here; typing and
//! viewport merging happen in the layout crate, which must tolerate every
//! field being absent, `null`, or of the wrong shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix marking a field as the mobile-viewport override of another field.
pub const MOBILE_PREFIX: &str = "mobile_";

/// Flat map of style field names to raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleFields(BTreeMap<String, Value>);

impl StyleFields {
    /// Create an empty style record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field exactly as stored, including `null` and empty strings.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Get a field only if it is present and non-empty.
    ///
    /// `null` and the empty string count as absent: authoring tools clear a
    /// field by blanking it rather than deleting the key.
    #[must_use]
    pub fn present(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let _ = self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`StyleFields::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Number of stored fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over stored fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for StyleFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
