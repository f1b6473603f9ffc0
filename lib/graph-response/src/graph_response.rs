//! Per-request response wrapper.

use std::fmt;
use std::sync::Arc;

use graph_response_core::{Error, JsonDecoder, JsonObject, Outcome, PayloadDecoder, Result};
use serde::de::DeserializeOwned;

/// The answer to one request of a (possibly batched) call.
///
/// Pairs the slot [`Outcome`] with the HTTP status of the response that
/// carried it. In a batch every slot reports the same status.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResponse<T> {
    status: Option<u16>,
    outcome: Outcome<T>,
}

impl<T> GraphResponse<T> {
    /// Creates a new response slot.
    #[must_use]
    pub const fn new(status: Option<u16>, outcome: Outcome<T>) -> Self {
        Self { status, outcome }
    }

    /// HTTP status of the carrying response, if it could be read.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Slot outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    /// Decoded payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        self.outcome.payload()
    }

    /// Error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.outcome.error()
    }

    /// Returns `true` if the request succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Consume into the slot outcome.
    #[must_use]
    pub fn into_outcome(self) -> Outcome<T> {
        self.outcome
    }

    /// Convert into a standard result.
    ///
    /// # Errors
    ///
    /// Returns the shared error if the request failed.
    pub fn into_result(self) -> std::result::Result<T, Arc<Error>> {
        self.outcome.into_result()
    }
}

impl GraphResponse<JsonObject> {
    /// Deserialize a raw payload into `U`.
    ///
    /// Returns `None` if the request failed.
    pub fn payload_as<U: DeserializeOwned>(&self) -> Option<Result<U>> {
        self.payload()
            .map(|object| JsonDecoder::<U>::new().decode(object.clone()))
    }
}

impl<T: fmt::Debug> fmt::Display for GraphResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{Response: status: ")?;
        match self.status {
            Some(status) => write!(f, "{status}")?,
            None => f.write_str("unknown")?,
        }
        write!(f, ", payload: {:?}, error: ", self.payload())?;
        match self.error() {
            Some(err) => write!(f, "{err}")?,
            None => f.write_str("none")?,
        }
        f.write_str("}")
    }
}
