//! Deserializers that downgrade malformed direction fields to `None` instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::style::tags::normalize_tag;

/// Parse an optional closed-vocabulary tag. Spellings are normalized first; anything still
/// unrecognized becomes `None` with a warning.
pub(crate) fn tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| parse_tag_value(&v)))
}

pub(crate) fn parse_tag_value<T: DeserializeOwned>(v: &serde_json::Value) -> Option<T> {
    let serde_json::Value::String(s) = v else {
        if !v.is_null() {
            tracing::warn!(value = %v, "non-string direction tag ignored");
        }
        return None;
    };
    let normalized = normalize_tag(s);
    if normalized.is_empty() {
        return None;
    }
    match serde_json::from_value::<T>(serde_json::Value::String(normalized)) {
        Ok(t) => Some(t),
        Err(_) => {
            tracing::warn!(tag = %s, "unrecognized direction tag; falling back to default");
            None
        }
    }
}

/// Parse any optional value; a type mismatch becomes `None` with a warning.
pub(crate) fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| {
        if v.is_null() {
            return None;
        }
        match serde_json::from_value::<T>(v) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(error = %e, "malformed direction field ignored");
                None
            }
        }
    }))
}

/// Parse a value that has a `Default`; a type mismatch falls back to the default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(value(deserializer)?.unwrap_or_default())
}

/// Parse a list element-by-element, dropping elements that fail to parse.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(items)) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed list entry");
                None
            }
        })
        .collect())
}

/// Parse a string-keyed map entry-by-entry, dropping entries that fail to parse.
pub(crate) fn map<'de, D, T>(
    deserializer: D,
) -> Result<std::collections::BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(entries)) = raw else {
        return Ok(Default::default());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(k, v)| match serde_json::from_value::<T>(v) {
            Ok(t) => Some((k, t)),
            Err(e) => {
                tracing::warn!(key = %k, error = %e, "dropping malformed map entry");
                None
            }
        })
        .collect())
}
