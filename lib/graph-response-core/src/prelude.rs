//! Prelude module for convenient imports.
//!
//! ```ignore
//! use graph_response_core::prelude::*;
//! ```

pub use crate::{
    Error, ErrorKind, HttpConnection, JsonDecoder, JsonObject, Outcome, PayloadDecoder, RawObject,
    Response, ResponseBodyReader, Result, demultiplex, demultiplex_connection,
};
