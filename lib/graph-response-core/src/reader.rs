//! Response body reading.

use std::io::Read;

use serde_json::Value;

use crate::{Error, HttpConnection, Result, envelope};

/// Statuses at or above this value are read from the error stream.
const ERROR_STATUS_THRESHOLD: u16 = 400;

/// Reads the raw text of an HTTP response body.
///
/// Bodies of error responses (status >= 400) are never returned: they are
/// wrapped into a `{code, body}` envelope and classified like a failed batch
/// item, which always yields [`Error::Transport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseBodyReader {
    max_body_size: Option<usize>,
}

impl ResponseBodyReader {
    /// Create a reader without size limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_body_size: None,
        }
    }

    /// Fail with [`Error::BodyTooLarge`] when a body exceeds `limit` bytes.
    #[must_use]
    pub const fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = Some(limit);
        self
    }

    /// Configured size limit, if any.
    #[must_use]
    pub const fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }

    /// Read the full response body as text.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the status is >= 400. An error body over the
    ///   configured limit is dropped rather than reported as too large.
    /// - [`Error::Io`] if the status or a stream cannot be read.
    /// - [`Error::BodyTooLarge`] if a success body exceeds the configured limit.
    pub fn read<C: HttpConnection + ?Sized>(&self, connection: &mut C) -> Result<String> {
        let status = connection.status()?;

        if status >= ERROR_STATUS_THRESHOLD {
            let text = match self.read_stream(connection.error_stream()?) {
                Ok(text) => text,
                // The status is reported without the oversized body.
                Err(Error::BodyTooLarge { .. }) => {
                    return Err(Error::transport(i64::from(status)));
                }
                Err(err) => return Err(err),
            };
            // Classified like a batch item carrying the same code.
            let envelope = envelope::wrap(Some(status), Value::String(text));
            let err = envelope::check_status(&envelope)
                .unwrap_or_else(|| Error::transport(i64::from(status)));
            return Err(err);
        }

        self.read_stream(connection.input_stream()?)
    }

    fn read_stream(&self, mut stream: Box<dyn Read + '_>) -> Result<String> {
        let mut buf = Vec::new();
        match self.max_body_size {
            Some(limit) => {
                let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
                stream.take(cap).read_to_end(&mut buf)?;
                if buf.len() > limit {
                    return Err(Error::BodyTooLarge { limit });
                }
            }
            None => {
                stream.read_to_end(&mut buf)?;
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
