//! Field enumeration
//!
//! Engines report a tag's fields as an ordered list of [`RawField`] pairs;
//! [`collect_fields`] folds that list into a [`FieldMap`].

use std::collections::BTreeMap;

/// Key/value mapping of a tag's fields
pub type FieldMap = BTreeMap<String, String>;

/// One field as reported by an engine
///
/// Either half may be missing (e.g. binary values or keys the format cannot
/// name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl RawField {
    /// Create a pair with both halves present
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// Fold raw fields into a mapping
///
/// Pairs missing a key or a value are skipped. A repeated key keeps the value
/// of its last occurrence.
pub fn collect_fields<I>(fields: I) -> FieldMap
where
    I: IntoIterator<Item = RawField>,
{
    let mut map = FieldMap::new();
    for field in fields {
        if let RawField {
            key: Some(key),
            value: Some(value),
        } = field
        {
            map.insert(key, value);
        }
    }
    map
}
