//! Error types for graph-response.

use derive_more::{Display, Error};
use serde_json::Value;

// ============================================================================
// Error Kind
// ============================================================================

/// User-visible category of a failed result slot.
///
/// Several [`Error`] variants collapse into the same kind, so callers can tell
/// a service-level failure apart from a structural one without knowing which
/// decoding path produced it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP-level failure (status outside the 2xx range).
    #[display("transport")]
    Transport,
    /// The remote service flagged the item as failed.
    #[display("service")]
    Service,
    /// The response did not have the expected structure.
    #[display("malformed")]
    Malformed,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for graph-response operations.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum Error {
    /// HTTP status >= 400, or an envelope `code` outside `[200, 300)`.
    #[display("HTTP error {status}")]
    Transport {
        /// HTTP status code, or the envelope `code` as sent.
        status: i64,
        /// Raw body text, if available.
        #[error(not(source))]
        body: Option<String>,
    },

    /// The item carries one of the service error keys.
    #[display("service error: {}", service_message(details))]
    Service {
        /// The JSON object flagged as an error.
        #[error(not(source))]
        details: Value,
    },

    /// The response does not have the expected shape.
    #[display("malformed response: {_0}")]
    Malformed(#[error(not(source))] String),

    /// The decode capability rejected the payload.
    #[display("JSON deserialization error at '{path}': {message}")]
    Decode {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Reading the response body failed.
    #[display("I/O error: {_0}")]
    Io(#[error(not(source))] String),

    /// The response body exceeded the configured size limit.
    #[display("response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Configured limit in bytes.
        #[error(not(source))]
        limit: usize,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl Error {
    /// Create a transport error without body.
    #[must_use]
    pub const fn transport(status: i64) -> Self {
        Self::Transport { status, body: None }
    }

    /// Create a transport error with the raw body text.
    #[must_use]
    pub fn transport_with_body(status: i64, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: Some(body.into()),
        }
    }

    /// Create a service error from the offending JSON object.
    #[must_use]
    pub fn service(details: impl Into<Value>) -> Self {
        Self::Service {
            details: details.into(),
        }
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::Malformed(_) | Self::Decode { .. } | Self::Io(_) | Self::BodyTooLarge { .. } => {
                ErrorKind::Malformed
            }
        }
    }

    /// Returns `true` if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Returns `true` if this is a service error.
    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self.kind(), ErrorKind::Service)
    }

    /// Returns `true` if the response could not be understood.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::Malformed)
    }

    /// Returns the HTTP status code if this is a transport error.
    ///
    /// Envelope codes are kept as sent, even outside the HTTP range.
    #[must_use]
    pub const fn status(&self) -> Option<i64> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw body text if this is a transport error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns the offending JSON object if this is a service error.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        match self {
            Self::Service { details } => Some(details),
            _ => None,
        }
    }

    /// Best-effort human readable message reported by the service.
    ///
    /// Looks at `error.message`, a string `error`, then `error_msg` and
    /// `error_reason`.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        self.details().and_then(extract_service_message)
    }

    /// Try to decode the transport error body as JSON.
    ///
    /// Returns `None` if there is no body or this is not a transport error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body.as_bytes()))
    }
}

fn extract_service_message(details: &Value) -> Option<&str> {
    match details.get("error") {
        Some(Value::String(message)) => return Some(message.as_str()),
        Some(Value::Object(error)) => {
            if let Some(Value::String(message)) = error.get("message") {
                return Some(message.as_str());
            }
        }
        _ => {}
    }
    ["error_msg", "error_reason"]
        .iter()
        .find_map(|key| details.get(*key).and_then(Value::as_str))
}

fn service_message(details: &Value) -> &str {
    extract_service_message(details).unwrap_or("unknown")
}
