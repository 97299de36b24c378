//! The record model: a JSON object addressed by one identifier field.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::{GatewayError, GatewayResult};

/// A record payload. Field order is preserved through a round-trip.
pub type Document = Map<String, Value>;

/// A non-empty record identifier, used verbatim as the blob key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Returns `None` for the empty string.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode a raw request body into a [`Document`].
///
/// Anything that is not a single JSON object (empty input, malformed JSON,
/// arrays, scalars) is rejected as [`GatewayError::InvalidInput`].
pub fn decode_document(raw: &[u8]) -> GatewayResult<Document> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(GatewayError::InvalidInput("empty body".into()));
    }
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(GatewayError::InvalidInput(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(GatewayError::InvalidInput(e.to_string())),
    }
}

/// Encode a document into its stored form: compact JSON text.
pub fn encode_document(document: &Document) -> GatewayResult<Vec<u8>> {
    serde_json::to_vec(document).map_err(|e| GatewayError::InvalidInput(e.to_string()))
}

/// Pull the identifier out of `document[field]`.
///
/// A non-empty string is taken as-is. A non-zero number becomes its JSON
/// text (`42` -> `"42"`); whole-valued floats drop the fraction, so
/// `1e2` and `100.0` both key as `"100"`. Zero, `null`, booleans, arrays, objects and the
/// empty string are all treated as a missing identifier.
pub fn extract_id(document: &Document, field: &str) -> GatewayResult<RecordId> {
    let id = match document.get(field) {
        Some(Value::String(s)) => RecordId::new(s.as_str()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => RecordId::new(number_key(n)),
        _ => None,
    };
    id.ok_or_else(|| GatewayError::missing(field))
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn number_key(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
