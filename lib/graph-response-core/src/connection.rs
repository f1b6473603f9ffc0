//! HTTP connection seam.
//!
//! [`HttpConnection`] is the only view of the transport the decoder needs:
//! the status code and the two body streams. Establishing the connection is
//! left to the caller.

use std::io::Read;

/// An HTTP response whose body can be read synchronously.
///
/// Streams are returned as owned values so they are released as soon as the
/// reader drops them, on success and on every error path alike.
///
/// # Example
///
/// ```ignore
/// use std::io::{self, Read};
/// use graph_response_core::HttpConnection;
///
/// struct Fixture {
///     status: u16,
///     body: Vec<u8>,
/// }
///
/// impl HttpConnection for Fixture {
///     fn status(&self) -> io::Result<u16> {
///         Ok(self.status)
///     }
///
///     fn input_stream(&mut self) -> io::Result<Box<dyn Read + '_>> {
///         Ok(Box::new(self.body.as_slice()))
///     }
///
///     fn error_stream(&mut self) -> io::Result<Box<dyn Read + '_>> {
///         Ok(Box::new(self.body.as_slice()))
///     }
/// }
/// ```
pub trait HttpConnection {
    /// HTTP status code of the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the status line could not be read.
    fn status(&self) -> std::io::Result<u16>;

    /// Body stream of a successful (< 400) response.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be opened.
    fn input_stream(&mut self) -> std::io::Result<Box<dyn Read + '_>>;

    /// Body stream of a failed (>= 400) response.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be opened.
    fn error_stream(&mut self) -> std::io::Result<Box<dyn Read + '_>>;
}

impl<C: HttpConnection + ?Sized> HttpConnection for &mut C {
    fn status(&self) -> std::io::Result<u16> {
        (**self).status()
    }

    fn input_stream(&mut self) -> std::io::Result<Box<dyn Read + '_>> {
        (**self).input_stream()
    }

    fn error_stream(&mut self) -> std::io::Result<Box<dyn Read + '_>> {
        (**self).error_stream()
    }
}
