//! Decode batched Graph API responses.
//!
//! One HTTP call may answer several requests at once. This crate splits the
//! response into one [`GraphResponse`] per request, each holding either the
//! decoded payload or a classified [`Error`].
//!
//! # Example
//!
//! ```ignore
//! use graph_response::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! let decoder = ResponseDecoder::json::<User>();
//! let responses = decoder.decode(response, 2);
//!
//! for response in responses {
//!     match response.error().map(Error::kind) {
//!         None => println!("{:?}", response.payload()),
//!         Some(ErrorKind::Service) => println!("rejected by the service"),
//!         Some(kind) => println!("failed: {kind}"),
//!     }
//! }
//! ```

mod config;
mod decoder;
mod graph_response;
pub mod prelude;

pub use config::{DecoderConfig, DecoderConfigBuilder, LogLevel};
pub use decoder::ResponseDecoder;
pub use graph_response::GraphResponse;

// Re-export core types
pub use graph_response_core::{
    Error, ErrorKind, HttpConnection, JsonDecoder, JsonObject, Outcome, PayloadDecoder, RawObject,
    Response, ResponseBodyReader, Result, Value, broadcast, demultiplex, demultiplex_connection,
    envelope, from_json,
};
