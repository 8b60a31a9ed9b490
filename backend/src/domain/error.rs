//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps [`ErrorCode`]
//! to a status code and renders the payload as the JSON error body.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Login did not match any stored credentials.
    InvalidCredentials,
    /// A unique field (email or user name) is already taken.
    Conflict,
    /// The addressed resource does not exist.
    NotFound,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// Storage or serialisation failure inside the service.
    InternalError,
}

/// Error payload shared by every endpoint.
///
/// Serialises as `{code, message, error?, traceId?}`; `error` carries
/// optional detail text such as the offending field.
///
/// # Examples
/// ```
/// use inventory_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Product not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Product not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "Product not found")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create an error, capturing the current trace identifier when one is in
    /// scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            error: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Optional detail text.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Trace identifier captured when the error was built.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error = Some(detail.into());
        self
    }

    /// Override the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Copy of this error safe to hand to clients.
    ///
    /// Internal failures keep their code and trace id but lose the message
    /// and detail, which may describe storage internals.
    #[must_use]
    pub fn redacted(&self) -> Self {
        if self.code != ErrorCode::InternalError {
            return self.clone();
        }
        Self {
            code: self.code,
            message: "Server error".to_owned(),
            error: None,
            trace_id: self.trace_id.clone(),
        }
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid credentials")
    }

    /// Shorthand for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(detail) => write!(f, "{}: {detail}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}
