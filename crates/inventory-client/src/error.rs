//! Error type surfaced by the client store.

use thiserror::Error;

/// Failures reported to the presentation layer.
///
/// `Api` carries the server-provided message so it can be shown verbatim;
/// `Network` covers requests that never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or a generic fallback.
        message: String,
    },
    /// The configured base URL cannot address the API.
    #[error("invalid base URL: {message}")]
    InvalidBaseUrl {
        /// Why the URL was rejected.
        message: String,
    },
    /// The request could not be completed or the response was unreadable.
    #[error("network error: {message}")]
    Network {
        /// Description of the transport or decoding failure.
        message: String,
    },
}

impl ClientError {
    /// Status code for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::InvalidBaseUrl { .. } | Self::Network { .. } => None,
        }
    }
}
