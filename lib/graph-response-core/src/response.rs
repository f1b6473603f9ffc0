//! Buffered HTTP response.
//!
//! [`Response`] holds status, headers and body in memory and implements
//! [`HttpConnection`], so a response fetched by any HTTP client can be fed to
//! the demultiplexer.
//!
//! # Example
//!
//! ```ignore
//! let response = Response::from_http(hyper_response).await?;
//! let outcomes = demultiplex_connection(response, 3, &ResponseBodyReader::new(), &RawObject);
//! ```

use std::collections::HashMap;
use std::io::Read;

use bytes::{Buf, Bytes};
use http_body_util::BodyExt;

use crate::{Error, HttpConnection, Result};

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx or 5xx, i.e. the body must be read from the error stream.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }
}

impl Response<Bytes> {
    /// Buffer an [`http::Response`] produced by any HTTP client.
    ///
    /// Headers whose value is not visible ASCII are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if collecting the body fails.
    pub async fn from_http<B>(response: http::Response<B>) -> Result<Self>
    where
        B: BodyExt,
        B::Error: std::fmt::Display,
    {
        let status = response.status().as_u16();
        let headers = extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::Io(e.to_string()))?
            .to_bytes();

        Ok(Self::new(status, headers, body))
    }

    fn stream(&self) -> Box<dyn Read + '_> {
        Box::new(self.body.as_ref().reader())
    }
}

impl HttpConnection for Response<Bytes> {
    fn status(&self) -> std::io::Result<u16> {
        Ok(self.status)
    }

    fn input_stream(&mut self) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(self.stream())
    }

    fn error_stream(&mut self) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(self.stream())
    }
}

fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}
