//! Normalization for list-typed request fields.
//!
//! Clients submit list fields (badges, supporting documentation) either as a
//! native JSON array or as a JSON-encoded string, and multipart forms may
//! repeat the field once per item. Everything is normalized to `Vec<String>`
//! at the boundary so the store only ever sees one representation.

use serde::Deserialize;

use crate::error::CoreError;

/// A list field as it arrives in a JSON request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    /// Already a native array: `["a", "b"]`.
    List(Vec<String>),
    /// A JSON-encoded array inside a string: `"[\"a\", \"b\"]"`.
    Encoded(String),
}

impl ListInput {
    /// Resolve into the stored representation.
    ///
    /// An empty encoded string yields an empty list. Any other encoded value
    /// must decode to an array of strings.
    pub fn into_vec(self, field: &str) -> Result<Vec<String>, CoreError> {
        match self {
            ListInput::List(items) => Ok(clean(items)),
            ListInput::Encoded(text) => decode_encoded(field, &text),
        }
    }
}

/// Normalize the raw text values collected for one multipart field.
///
/// A single value that looks like a JSON array is decoded; otherwise every
/// value is one list item.
pub fn from_form_values(field: &str, values: Vec<String>) -> Result<Vec<String>, CoreError> {
    if let [only] = values.as_slice() {
        if only.trim_start().starts_with('[') {
            return decode_encoded(field, only);
        }
    }
    Ok(clean(values))
}

fn decode_encoded(field: &str, text: &str) -> Result<Vec<String>, CoreError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items: Vec<String> = serde_json::from_str(text).map_err(|e| {
        CoreError::Validation(format!(
            "'{field}' must be a list or a JSON-encoded list of strings: {e}"
        ))
    })?;
    Ok(clean(items))
}

fn clean(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
