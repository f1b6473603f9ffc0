//! Per-request result slot.

use std::fmt;
use std::sync::Arc;

use crate::{Error, ErrorKind};

/// Result of one original request.
///
/// Failures are shared behind an [`Arc`]: when a whole response is
/// unreadable, every slot points to the same error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The request produced a decoded payload.
    Success(T),
    /// The request failed.
    Failure(Arc<Error>),
}

impl<T> Outcome<T> {
    /// Create a failed slot from an error.
    #[must_use]
    pub fn failure(error: Error) -> Self {
        Self::Failure(Arc::new(error))
    }

    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Decoded payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// Error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Error category, if the slot failed.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error().map(Error::kind)
    }

    /// Convert into a standard result.
    ///
    /// # Errors
    ///
    /// Returns the shared error for [`Outcome::Failure`].
    pub fn into_result(self) -> Result<T, Arc<Error>> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure(err) => Err(err),
        }
    }

    /// Transform the payload with a function.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(payload) => Outcome::Success(f(payload)),
            Self::Failure(err) => Outcome::Failure(err),
        }
    }
}

impl<T> From<crate::Result<T>> for Outcome<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::failure(err),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(payload) => write!(f, "success: {payload:?}"),
            Self::Failure(err) => write!(f, "{} failure: {err}", err.kind()),
        }
    }
}
