//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use graph_response::prelude::*;
//! ```

pub use crate::{
    DecoderConfig, Error, ErrorKind, GraphResponse, HttpConnection, JsonDecoder, JsonObject,
    LogLevel, Outcome, PayloadDecoder, RawObject, Response, ResponseDecoder, Result,
};
pub use serde::Deserialize;
