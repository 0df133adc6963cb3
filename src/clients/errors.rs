//! HTTP-specific error types for the REST resource client.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses
//! - [`TransportError`]: The transport failed before producing a response
//! - [`HttpError`]: Unified error type encompassing both
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::{HttpError, RestError};
//!
//! match client.get_resource("/articles/1").await {
//!     Ok(article) => println!("Article: {article}"),
//!     Err(RestError::Http(HttpError::Response(e))) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(RestError::Http(HttpError::Transport(e))) => {
//!         println!("Transport error: {e}");
//!     }
//!     Err(other) => println!("Other error: {other}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a response outside 200-299.
///
/// The raw response body is kept so callers can inspect server-provided
/// error documents.
///
/// # Example
///
/// ```rust
/// use rest_resource::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"errors":"Not found"}"#.to_string(),
///     body: json!({"errors": "Not found"}),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error details extracted from the response body.
    pub message: String,
    /// The full response body.
    pub body: serde_json::Value,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// A transport-level failure (connection refused, timeout, TLS, ...).
///
/// Transport failures are passed through to the caller unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error raised by the underlying HTTP library.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Error raised by a custom transport implementation.
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Creates a [`TransportError::Other`] from any message.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl HttpError {
    /// Returns the HTTP status code when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Transport(_) => None,
        }
    }
}
