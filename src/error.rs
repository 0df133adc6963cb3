//! Configuration error types for the REST resource client.
//!
//! This module contains errors raised while configuring a client or while
//! reading configuration that was never provided, most notably a missing
//! endpoint.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{ConfigError, EndpointStore};
//!
//! let store = EndpointStore::new();
//! assert!(matches!(store.get(), Err(ConfigError::EndpointNotConfigured)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring or reading client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No endpoint has been set on the client.
    ///
    /// Every resource operation checks for this before a request is built,
    /// so no request is ever sent without an endpoint.
    #[error("No endpoint configured. Call set_endpoint() before making requests.")]
    EndpointNotConfigured,

    /// The maximum page count for walks must be greater than zero.
    #[error("Invalid max_pages value {value}. The page limit must be greater than zero.")]
    InvalidMaxPages {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The request timeout must be non-zero.
    #[error("Invalid timeout. The request timeout must be greater than zero.")]
    InvalidTimeout,
}
