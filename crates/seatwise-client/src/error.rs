//! Error types for seatwise-client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for seatwise-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to an upstream collaborator
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        /// Which collaborator answered
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The call did not complete in time
    #[error("{service} call timed out after {}s", .after.as_secs())]
    Timeout {
        /// Which collaborator timed out
        service: &'static str,
        /// Configured limit
        after: Duration,
    },

    /// The token stream broke off mid-response
    #[error("Stream error: {0}")]
    Stream(String),

    /// The response body had an unexpected shape
    #[error("Unexpected {service} response: {message}")]
    Decode {
        /// Which collaborator answered
        service: &'static str,
        /// What was wrong
        message: String,
    },

    /// Scripted failure from a mock provider
    #[error("Mock failure: {0}")]
    Mock(String),
}

impl Error {
    /// Returns `true` if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Status { status, .. } => *status == 429 || *status >= 500,
            Error::Timeout { .. } => true,
            Error::Stream(_) | Error::Decode { .. } | Error::Mock(_) => false,
        }
    }

    /// Creates a decode error.
    pub fn decode<S: Into<String>>(service: &'static str, message: S) -> Self {
        Error::Decode {
            service,
            message: message.into(),
        }
    }

    /// Maps a reqwest error, turning timeouts into [`Error::Timeout`].
    pub(crate) fn from_reqwest(service: &'static str, after: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout { service, after }
        } else {
            Error::Http(err)
        }
    }
}

impl From<Error> for seatwise_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Timeout { after, .. } => seatwise_core::Error::Timeout {
                seconds: after.as_secs(),
            },
            other => seatwise_core::Error::upstream_with_source(other.to_string(), other),
        }
    }
}

/// Reads an unsuccessful response into [`Error::Status`].
pub(crate) async fn status_error(service: &'static str, response: reqwest::Response) -> Error {
    const MAX_BODY: usize = 512;
    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_BODY {
        let cut = (0..=MAX_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    Error::Status {
        service,
        status,
        body,
    }
}
