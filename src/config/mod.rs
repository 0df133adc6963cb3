//! Configuration types for the REST resource client.
//!
//! This module provides [`ClientConfig`] and its builder. The configuration
//! carries everything a client needs besides its transport: an optional
//! initial endpoint, the user agent prefix, a default page limit for walks,
//! and the request timeout used by the default transport.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .endpoint("http://localhost:8080")
//!     .user_agent_prefix("MyApp/1.0")
//!     .max_pages(100)
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint(), Some("http://localhost:8080"));
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a [`ResourceClient`](crate::ResourceClient).
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, so one configuration can
/// seed any number of independent clients.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    endpoint: Option<String>,
    user_agent_prefix: Option<String>,
    max_pages: Option<usize>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the initial endpoint, if configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the default page limit applied to walks.
    ///
    /// `None` means walks are unbounded and only stop when the server stops
    /// returning a next link.
    #[must_use]
    pub const fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// No field is required.
///
/// # Defaults
///
/// - `endpoint`: `None` (set later with `set_endpoint`)
/// - `user_agent_prefix`: `None`
/// - `max_pages`: `None` (unbounded walks)
/// - `timeout`: `None` (the HTTP library default)
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    user_agent_prefix: Option<String>,
    max_pages: Option<usize>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial endpoint.
    ///
    /// The value is stored as given; it is not checked for well-formedness.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default maximum number of pages a walk may fetch.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Sets the request timeout used by the default transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxPages`] if `max_pages` is zero and
    /// [`ConfigError::InvalidTimeout`] if `timeout` is zero.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if let Some(value) = self.max_pages {
            if value == 0 {
                return Err(ConfigError::InvalidMaxPages { value });
            }
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(ClientConfig {
            endpoint: self.endpoint,
            user_agent_prefix: self.user_agent_prefix,
            max_pages: self.max_pages,
            timeout: self.timeout,
        })
    }
}
