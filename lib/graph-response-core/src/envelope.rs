//! Per-item classification of batch envelopes.
//!
//! Every answer, batched or not, is looked at as a `{code, body}` envelope.
//! [`classify`] applies the rules in a fixed order:
//!
//! 1. not a JSON object: malformed;
//! 2. any of [`ERROR_KEYS`] present: service error;
//! 3. `code` outside `[200, 300)`: transport error;
//! 4. payload is `body` (re-parsed when it is a string) or the item itself.

use serde_json::{Map, Value};

use crate::{Error, JsonObject};

/// Keys whose presence marks an object as a service error.
pub const ERROR_KEYS: [&str; 4] = ["error", "error_code", "error_msg", "error_reason"];

/// Envelope key holding the per-item HTTP status.
pub const CODE_KEY: &str = "code";

/// Envelope key holding the per-item payload.
pub const BODY_KEY: &str = "body";

/// Outcome of classifying one envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The item resolved to a payload object.
    Payload(JsonObject),
    /// The item is a failure.
    Failed(Error),
}

impl Classification {
    /// Convert into a standard result.
    ///
    /// # Errors
    ///
    /// Returns the classified error for [`Classification::Failed`].
    pub fn into_result(self) -> crate::Result<JsonObject> {
        match self {
            Self::Payload(object) => Ok(object),
            Self::Failed(err) => Err(err),
        }
    }
}

/// Build the envelope used for a non-batched answer or an HTTP error body.
#[must_use]
pub fn wrap(code: Option<u16>, body: Value) -> JsonObject {
    let mut envelope = Map::new();
    if let Some(code) = code {
        envelope.insert(CODE_KEY.to_string(), Value::from(code));
    }
    envelope.insert(BODY_KEY.to_string(), body);
    envelope
}

/// Classify one answer.
#[must_use]
pub fn classify(item: Value) -> Classification {
    let object = match item {
        Value::Object(object) => object,
        other => {
            return Classification::Failed(Error::malformed(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )));
        }
    };

    if ERROR_KEYS.iter().any(|key| object.contains_key(*key)) {
        return Classification::Failed(Error::service(object));
    }

    if let Some(err) = check_status(&object) {
        return Classification::Failed(err);
    }

    match resolve_body(object) {
        Ok(payload) => Classification::Payload(payload),
        Err(err) => Classification::Failed(err),
    }
}

/// Transport error for an envelope whose `code` is outside `[200, 300)`.
///
/// A `code` that cannot be read as an integer is ignored. Any other code is
/// reported as is, including values no HTTP status can take.
#[must_use]
pub fn check_status(object: &JsonObject) -> Option<Error> {
    let status = object.get(CODE_KEY).and_then(status_code)?;
    if (200..300).contains(&status) {
        return None;
    }

    let err = match object.get(BODY_KEY) {
        Some(Value::String(text)) => Error::transport_with_body(status, text.clone()),
        Some(other) if !other.is_null() => Error::transport_with_body(status, other.to_string()),
        _ => Error::transport(status),
    };
    Some(err)
}

#[allow(clippy::cast_possible_truncation)]
fn status_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            // Fractional codes are truncated toward zero.
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn resolve_body(mut object: JsonObject) -> crate::Result<JsonObject> {
    let Some(body) = object.remove(BODY_KEY) else {
        return Ok(object);
    };

    match body {
        Value::Object(payload) => Ok(payload),
        Value::String(text) => match serde_json::from_str::<Value>(&text)? {
            Value::Object(payload) => Ok(payload),
            other => Err(unexpected_body(&other)),
        },
        other => Err(unexpected_body(&other)),
    }
}

fn unexpected_body(value: &Value) -> Error {
    Error::malformed(format!(
        "expected body to be a JSON object, got {}",
        type_name(value)
    ))
}

pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
