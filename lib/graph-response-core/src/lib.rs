//! Core types and algorithms for graph-response.
//!
//! This crate turns the body of a (possibly batched) API call into one typed
//! result per request:
//! - [`ResponseBodyReader`] - Reads the raw body, turning HTTP errors into [`Error::Transport`]
//! - [`envelope`] - Per-item classification of `{code, body}` envelopes
//! - [`demultiplex`] and [`demultiplex_connection`] - One [`Outcome`] per request
//! - [`PayloadDecoder`] - Decoding of resolved JSON objects into domain types
//! - [`Error`], [`ErrorKind`] and [`Result`] - Error handling
//! - [`HttpConnection`] and [`Response`] - The HTTP response seam

mod connection;
mod decode;
mod demux;
pub mod envelope;
mod error;
mod outcome;
pub mod prelude;
mod reader;
mod response;

pub use connection::HttpConnection;
pub use decode::{JsonDecoder, JsonObject, PayloadDecoder, RawObject, from_json};
pub use demux::{broadcast, demultiplex, demultiplex_connection};
pub use error::{Error, ErrorKind, Result};
pub use outcome::Outcome;
pub use reader::ResponseBodyReader;
pub use response::Response;

// Re-export the JSON value type used throughout the API
pub use serde_json::Value;
