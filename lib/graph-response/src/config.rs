//! Decoder configuration types.

use graph_response_core::ResponseBodyReader;

/// Log level for decode summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log every failed slot as well as the summary.
    Debug,
    /// Log the summary only.
    #[default]
    Info,
}

/// Configuration for [`ResponseDecoder`](crate::ResponseDecoder).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum body size in bytes; `None` reads bodies of any size.
    pub max_body_size: Option<usize>,
    /// Verbosity of decode logging.
    pub log_level: LogLevel,
}

impl DecoderConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }

    /// Body reader honoring this configuration.
    #[must_use]
    pub const fn reader(&self) -> ResponseBodyReader {
        match self.max_body_size {
            Some(limit) => ResponseBodyReader::new().with_max_body_size(limit),
            None => ResponseBodyReader::new(),
        }
    }
}

/// Builder for [`DecoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct DecoderConfigBuilder {
    max_body_size: Option<usize>,
    log_level: Option<LogLevel>,
}

impl DecoderConfigBuilder {
    /// Limit the size of response bodies.
    #[must_use]
    pub const fn max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = Some(limit);
        self
    }

    /// Set the log level.
    #[must_use]
    pub const fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DecoderConfig {
        let defaults = DecoderConfig::default();
        DecoderConfig {
            max_body_size: self.max_body_size.or(defaults.max_body_size),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}
