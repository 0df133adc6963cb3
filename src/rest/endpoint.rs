//! Storage for the single base endpoint of a client.

use std::sync::{PoisonError, RwLock};

use crate::error::ConfigError;

/// Holds at most one base URL.
///
/// The store starts empty. Setting a value overwrites any previous one and
/// never fails; the URL is not validated. Reading an empty store yields
/// [`ConfigError::EndpointNotConfigured`].
///
/// Interior mutability lets a shared client change its endpoint through
/// `&self`. Each resource operation reads the endpoint once up front, so a
/// concurrent `set` never changes the URL of a request already in flight.
///
/// # Example
///
/// ```rust
/// use rest_resource::{ConfigError, EndpointStore};
///
/// let store = EndpointStore::new();
/// assert_eq!(store.get(), Err(ConfigError::EndpointNotConfigured));
///
/// store.set("http://localhost:8080");
/// assert_eq!(store.get().as_deref(), Ok("http://localhost:8080"));
/// ```
#[derive(Debug, Default)]
pub struct EndpointStore {
    endpoint: RwLock<Option<String>>,
}

impl EndpointStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            endpoint: RwLock::new(None),
        }
    }

    /// Creates a store holding `endpoint`.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: RwLock::new(Some(endpoint.into())),
        }
    }

    /// Stores `endpoint`, replacing any previous value.
    pub fn set(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        tracing::debug!(endpoint = %endpoint, "Endpoint configured");
        *self
            .endpoint
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(endpoint);
    }

    /// Returns a copy of the stored endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EndpointNotConfigured`] if nothing was set.
    pub fn get(&self) -> Result<String, ConfigError> {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ConfigError::EndpointNotConfigured)
    }

    /// Removes the stored endpoint.
    pub fn clear(&self) {
        *self
            .endpoint
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns `true` if an endpoint is stored.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_before_set_is_not_configured() {
        let store = EndpointStore::new();
        assert_eq!(store.get(), Err(ConfigError::EndpointNotConfigured));
        assert!(!store.is_configured());
    }

    #[test]
    fn test_set_then_get_returns_exact_value() {
        let store = EndpointStore::new();
        store.set("http://localhost:8080");
        assert_eq!(store.get(), Ok("http://localhost:8080".to_string()));
        assert!(store.is_configured());
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let store = EndpointStore::with_endpoint("http://localhost:8080");
        store.set("http://localhost:8081");
        assert_eq!(store.get(), Ok("http://localhost:8081".to_string()));
    }

    #[test]
    fn test_set_accepts_malformed_urls() {
        let store = EndpointStore::new();
        store.set("definitely not a url");
        assert_eq!(store.get(), Ok("definitely not a url".to_string()));
    }

    #[test]
    fn test_clear_removes_endpoint() {
        let store = EndpointStore::with_endpoint("http://localhost:8080");
        store.clear();
        assert_eq!(store.get(), Err(ConfigError::EndpointNotConfigured));
    }
}
