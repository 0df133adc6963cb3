//! Error type for resource operations and pagination walks.
//!
//! # Error Handling
//!
//! - [`RestError::Config`]: The client has no endpoint (checked before any request)
//! - [`RestError::Http`]: A non-2xx response or a transport failure
//! - [`RestError::InvalidCollection`]: A list response did not contain a sequence
//! - [`RestError::Deserialize`]: A typed helper could not decode the body
//! - [`RestError::PaginationLoop`]: A walk was pointed back at a page it already fetched
//! - [`RestError::PageLimitExceeded`]: A walk hit its configured page cap
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::{ConfigError, RestError};
//!
//! match client.get_resource("/articles/1").await {
//!     Ok(article) => println!("{article}"),
//!     Err(RestError::Config(ConfigError::EndpointNotConfigured)) => {
//!         println!("Set an endpoint first");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError, TransportError};
use crate::error::ConfigError;

/// Error type for resource client operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The client is not configured (no endpoint set).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A list response body was neither an array nor an object with a
    /// `data` array.
    #[error("Expected a collection from {path}, got: {body}")]
    InvalidCollection {
        /// The path that was listed.
        path: String,
        /// The body that was received.
        body: serde_json::Value,
    },

    /// The response body could not be decoded into the requested type.
    #[error("Failed to decode response from {path}: {source}")]
    Deserialize {
        /// The path that was requested.
        path: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The server returned a next link that was already visited in this walk.
    #[error("Pagination loop detected: next link {link} was already visited")]
    PaginationLoop {
        /// The repeated link.
        link: String,
    },

    /// The walk reached its page limit while more pages were available.
    #[error("Pagination stopped after {max_pages} pages with more pages remaining")]
    PageLimitExceeded {
        /// The configured page limit.
        max_pages: usize,
    },
}

impl RestError {
    /// Returns the HTTP status code if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the endpoint was missing.
    #[must_use]
    pub const fn is_not_configured(&self) -> bool {
        matches!(self, Self::Config(ConfigError::EndpointNotConfigured))
    }
}

impl From<HttpResponseError> for RestError {
    fn from(error: HttpResponseError) -> Self {
        Self::Http(HttpError::Response(error))
    }
}

impl From<TransportError> for RestError {
    fn from(error: TransportError) -> Self {
        Self::Http(HttpError::Transport(error))
    }
}
