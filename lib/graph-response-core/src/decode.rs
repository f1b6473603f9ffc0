//! Payload decoding.
//!
//! Once a result slot has been resolved to a JSON object, a [`PayloadDecoder`]
//! turns it into the caller's domain type. The decoder is the only place the
//! destination shape is known.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A resolved payload: the JSON object answering one request.
pub type JsonObject = Map<String, Value>;

/// Decodes a resolved JSON object into a domain object.
///
/// Implemented by [`JsonDecoder`], [`RawObject`] and any
/// `Fn(JsonObject) -> Result<T>` closure.
pub trait PayloadDecoder: Send + Sync {
    /// The decoded domain object.
    type Output;

    /// Decode one payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not match the destination shape.
    fn decode(&self, object: JsonObject) -> Result<Self::Output>;
}

impl<F, T> PayloadDecoder for F
where
    F: Fn(JsonObject) -> Result<T> + Send + Sync,
{
    type Output = T;

    fn decode(&self, object: JsonObject) -> Result<T> {
        self(object)
    }
}

/// Decoder returning the JSON object untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawObject;

impl PayloadDecoder for RawObject {
    type Output = JsonObject;

    fn decode(&self, object: JsonObject) -> Result<JsonObject> {
        Ok(object)
    }
}

/// Decoder deserializing payloads into `T` with serde.
///
/// Errors carry the JSON path of the offending field.
pub struct JsonDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDecoder<T> {
    /// Create a decoder for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonDecoder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonDecoder<T> {}

impl<T> std::fmt::Debug for JsonDecoder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonDecoder")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> PayloadDecoder for JsonDecoder<T> {
    type Output = T;

    fn decode(&self, object: JsonObject) -> Result<T> {
        let value = Value::Object(object);
        serde_path_to_error::deserialize(value)
            .map_err(|e| Error::decode(e.path().to_string(), e.inner().to_string()))
    }
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns [`Error::Decode`] if deserialization fails, with the path to the
/// problematic field (e.g., "user.address.city").
///
/// # Example
///
/// ```
/// use graph_response_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::decode(e.path().to_string(), e.inner().to_string()))
}
