//! Response demultiplexing.
//!
//! One HTTP body answers N requests. A single request gets the whole body as
//! its answer; a batch gets a JSON array with one element per request. The
//! functions here always return exactly N [`Outcome`]s, in request order.
//!
//! Failures come in two scopes:
//!
//! - per item: a bad array element only fails its own slot;
//! - global: an unreadable body, invalid JSON or a wrong array length fail
//!   every slot with the same shared error.

use std::sync::Arc;

use serde_json::Value;

use crate::envelope::{self, Classification};
use crate::{Error, HttpConnection, Outcome, PayloadDecoder, ResponseBodyReader};

/// Read a response and split it into one outcome per request.
///
/// Read failures, including HTTP error statuses, are broadcast to every slot.
pub fn demultiplex_connection<C, D>(
    mut connection: C,
    count: usize,
    reader: &ResponseBodyReader,
    decoder: &D,
) -> Vec<Outcome<D::Output>>
where
    C: HttpConnection,
    D: PayloadDecoder + ?Sized,
{
    match reader.read(&mut connection) {
        Ok(body) => demultiplex(&body, count, decoder),
        Err(err) => broadcast(err, count),
    }
}

/// Split a response body into one outcome per request.
pub fn demultiplex<D>(body: &str, count: usize, decoder: &D) -> Vec<Outcome<D::Output>>
where
    D: PayloadDecoder + ?Sized,
{
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(err) => return broadcast(Error::from(err), count),
    };

    if count == 1 {
        let envelope = envelope::wrap(None, value);
        return vec![decode_item(Value::Object(envelope), decoder)];
    }

    let items = match value {
        Value::Array(items) if items.len() == count => items,
        Value::Array(items) => {
            return broadcast(
                Error::malformed(format!(
                    "unexpected number of results: expected {count}, got {}",
                    items.len()
                )),
                count,
            );
        }
        other => {
            return broadcast(
                Error::malformed(format!(
                    "expected a JSON array of {count} results, got {}",
                    envelope::type_name(&other)
                )),
                count,
            );
        }
    };

    items
        .into_iter()
        .map(|item| decode_item(item, decoder))
        .collect()
}

/// The same failure in every slot.
#[must_use]
pub fn broadcast<T>(error: Error, count: usize) -> Vec<Outcome<T>> {
    let error = Arc::new(error);
    (0..count)
        .map(|_| Outcome::Failure(Arc::clone(&error)))
        .collect()
}

fn decode_item<D>(item: Value, decoder: &D) -> Outcome<D::Output>
where
    D: PayloadDecoder + ?Sized,
{
    match envelope::classify(item) {
        Classification::Payload(object) => decoder.decode(object).into(),
        Classification::Failed(err) => Outcome::failure(err),
    }
}
