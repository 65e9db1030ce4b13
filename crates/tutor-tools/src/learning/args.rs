//! Argument decoding for learning tools

use super::client::BridgeError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a tool's JSON arguments into its parameter struct
///
/// A missing argument object is treated as `{}` so tools whose parameters are
/// all optional accept a bare call.
pub(crate) fn parse<T: DeserializeOwned>(params: Value) -> Result<T, BridgeError> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };

    serde_json::from_value(params)
        .map_err(|e| BridgeError::InvalidArguments(format!("invalid arguments: {e}")))
}

/// A list-of-strings argument
///
/// Agents pass lists as a JSON-encoded string (`'["a", "b"]'`); a native JSON
/// array is accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StringList {
    Items(Vec<String>),
    Encoded(String),
}

impl StringList {
    /// Resolve to the list items, parsing the encoded form
    pub(crate) fn into_items(self, field: &str) -> Result<Vec<String>, BridgeError> {
        match self {
            Self::Items(items) => Ok(items),
            Self::Encoded(raw) => serde_json::from_str(&raw).map_err(|e| {
                BridgeError::InvalidArguments(format!(
                    "'{field}' must be a JSON array of strings: {e}"
                ))
            }),
        }
    }
}
