//! Default transport backed by `reqwest`.
//!
//! This module provides [`ReqwestTransport`], the [`Transport`] used by
//! [`ResourceClient::new`](crate::ResourceClient::new).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{HttpMethod, Transport};
use crate::config::ClientConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport built on a shared `reqwest::Client`.
///
/// The transport handles:
/// - Default headers including User-Agent and Accept
/// - JSON request bodies for POST and PUT
/// - Response header and body parsing
///
/// It never inspects status codes: any response that arrives is returned
/// as `Ok`.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a new transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying reqwest client
    /// cannot be created (e.g. TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_resource::{ClientConfig, ReqwestTransport};
    ///
    /// let config = ClientConfig::builder().user_agent_prefix("MyApp/1.0").build().unwrap();
    /// let transport = ReqwestTransport::new(&config).unwrap();
    /// assert!(transport.default_headers()["User-Agent"].starts_with("MyApp/1.0 | "));
    /// ```
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}rest-resource-client v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        tracing::debug!(%method, url, status = code, "Transport received response");

        Ok(HttpResponse::new(code, headers, Self::parse_body(&body_text)))
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a body as JSON. Empty bodies become `{}` and anything that is
    /// not JSON is kept as a JSON string.
    fn parse_body(body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text)
            .unwrap_or_else(|_| serde_json::Value::String(body_text.to_string()))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Get, url, None).await
    }

    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Post, url, Some(body)).await
    }

    async fn put(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Put, url, Some(body)).await
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Delete, url, None).await
    }
}
