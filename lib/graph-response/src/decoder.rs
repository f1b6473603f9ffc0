//! Response decoder.
//!
//! [`ResponseDecoder`] ties the body reader, the demultiplexer and a payload
//! decoder together, and logs what happened with `tracing`.

use std::sync::Arc;

use graph_response_core::{
    HttpConnection, JsonDecoder, Outcome, PayloadDecoder, RawObject, demultiplex,
    demultiplex_connection,
};
use serde::de::DeserializeOwned;
use tracing::{Level, debug, info, span, warn};

use crate::{DecoderConfig, GraphResponse, LogLevel};

/// Decodes HTTP responses into one [`GraphResponse`] per request.
///
/// # Example
///
/// ```ignore
/// use graph_response::{DecoderConfig, ResponseDecoder};
///
/// let decoder = ResponseDecoder::json::<User>()
///     .with_config(DecoderConfig::builder().max_body_size(1 << 20).build());
///
/// for (request, response) in requests.iter().zip(decoder.decode(&mut http, requests.len())) {
///     match response.into_result() {
///         Ok(user) => println!("{request}: {user:?}"),
///         Err(err) => println!("{request}: {err}"),
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseDecoder<D = RawObject> {
    config: DecoderConfig,
    decoder: D,
}

impl ResponseDecoder<RawObject> {
    /// Decoder producing raw JSON objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder deserializing payloads into `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>() -> ResponseDecoder<JsonDecoder<T>> {
        ResponseDecoder::with_decoder(JsonDecoder::new())
    }
}

impl<D: PayloadDecoder> ResponseDecoder<D> {
    /// Decoder using a custom payload decoder.
    #[must_use]
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            config: DecoderConfig::default(),
            decoder,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Read `connection` and split it into `request_count` responses.
    ///
    /// Never fails: every problem is reported in the returned slots, and the
    /// result always holds exactly `request_count` entries.
    pub fn decode<C: HttpConnection>(
        &self,
        connection: C,
        request_count: usize,
    ) -> Vec<GraphResponse<D::Output>> {
        let status = connection.status().ok();
        let span = span!(Level::INFO, "decode_response", request_count, status = ?status);
        let _guard = span.enter();

        let outcomes = demultiplex_connection(
            connection,
            request_count,
            &self.config.reader(),
            &self.decoder,
        );
        self.finish(status, outcomes)
    }

    /// Split an already read body into `request_count` responses.
    ///
    /// `status` is only reported back in each [`GraphResponse`]; error
    /// statuses are not re-checked here.
    pub fn decode_text(
        &self,
        status: Option<u16>,
        body: &str,
        request_count: usize,
    ) -> Vec<GraphResponse<D::Output>> {
        let span = span!(Level::INFO, "decode_response", request_count, status = ?status);
        let _guard = span.enter();

        let outcomes = demultiplex(body, request_count, &self.decoder);
        self.finish(status, outcomes)
    }

    fn finish(
        &self,
        status: Option<u16>,
        outcomes: Vec<Outcome<D::Output>>,
    ) -> Vec<GraphResponse<D::Output>> {
        self.log(&outcomes);
        outcomes
            .into_iter()
            .map(|outcome| GraphResponse::new(status, outcome))
            .collect()
    }

    fn log(&self, outcomes: &[Outcome<D::Output>]) {
        if let Some(err) = shared_failure(outcomes) {
            warn!(
                kind = %err.kind(),
                error = %err,
                slots = outcomes.len(),
                "response failed as a whole"
            );
            return;
        }

        if self.config.log_level == LogLevel::Debug {
            for (index, err) in outcomes
                .iter()
                .enumerate()
                .filter_map(|(index, outcome)| outcome.error().map(|err| (index, err)))
            {
                debug!(index, kind = %err.kind(), error = %err, "request failed");
            }
        }

        let failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
        let succeeded = outcomes.len() - failed;
        info!(succeeded, failed, "response decoded");
    }
}

/// The error shared by every slot, when the whole response failed.
///
/// A single request that failed counts as a whole-response failure.
fn shared_failure<T>(outcomes: &[Outcome<T>]) -> Option<&Arc<graph_response_core::Error>> {
    let (first, rest) = outcomes.split_first()?;
    let Outcome::Failure(shared) = first else {
        return None;
    };
    let all_shared = rest.iter().all(|outcome| match outcome {
        Outcome::Failure(err) => Arc::ptr_eq(shared, err),
        Outcome::Success(_) => false,
    });
    all_shared.then_some(shared)
}
