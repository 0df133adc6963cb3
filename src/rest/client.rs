//! Resource client: CRUD operations over a [`Transport`].
//!
//! This module provides [`ResourceClient`], which resolves resource paths
//! against its endpoint, sends requests through the transport, and
//! classifies responses by status code.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpResponse, HttpResponseError, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::rest::endpoint::EndpointStore;
use crate::rest::path::{build_url, FilterSet, Query, ResourceOperation};
use crate::rest::response::{ListMetadata, Page, ResourceEnvelope, ResourceResponse};
use crate::rest::RestError;

/// Generic REST resource client.
///
/// The client owns exactly one endpoint (possibly unset) and one transport.
/// Every operation:
///
/// 1. Reads the endpoint, failing with
///    [`ConfigError::EndpointNotConfigured`] before any request is sent.
/// 2. Builds `endpoint + path` (plus the encoded query for list calls).
/// 3. Calls the transport exactly once.
/// 4. Treats 200-299 as success and anything else as
///    [`HttpResponseError`].
///
/// # Thread Safety
///
/// `ResourceClient` is `Send + Sync` whenever its transport is.
///
/// # Example
///
/// ```rust,ignore
/// use rest_resource::{ClientConfig, FilterSet, ResourceClient};
/// use serde_json::json;
///
/// let client = ResourceClient::new(ClientConfig::default())?;
/// client.set_endpoint("http://192.168.99.100:8080");
///
/// let article = client.get_resource("/articles/1").await?;
///
/// let filters = FilterSet::new().with("title", "sample title");
/// let page = client.get_resources("/articles", Some(&filters)).await?;
///
/// let user = client.create_resource("/users", &json!({"name": "John Doe"})).await?;
/// let deleted = client.delete_resource("/users/90").await?;
/// ```
#[derive(Debug)]
pub struct ResourceClient<T = ReqwestTransport> {
    transport: T,
    endpoint: EndpointStore,
    config: ClientConfig,
}

// Verify ResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceClient>();
};

impl ResourceClient<ReqwestTransport> {
    /// Creates a client using the default `reqwest` transport.
    ///
    /// The endpoint is taken from `config` when present.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, RestError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ResourceClient<T> {
    /// Creates a client using a custom transport.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = ResourceClient::with_transport(ClientConfig::default(), FakeTransport::new());
    /// ```
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let endpoint = config
            .endpoint()
            .map_or_else(EndpointStore::new, EndpointStore::with_endpoint);

        Self {
            transport,
            endpoint,
            config,
        }
    }

    /// Sets the endpoint, replacing any previous one.
    pub fn set_endpoint(&self, endpoint: impl Into<String>) {
        self.endpoint.set(endpoint);
    }

    /// Returns the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EndpointNotConfigured`] if no endpoint is set.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        self.endpoint.get()
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Config`] without sending anything if no endpoint
    /// is set, and [`RestError::Http`] for transport failures or non-2xx
    /// responses.
    pub async fn get_resource(&self, path: &str) -> Result<Value, RestError> {
        let endpoint = self.endpoint.get()?;
        let response = self
            .execute(&endpoint, ResourceOperation::Find, path, &Query::new(), None)
            .await?;
        Ok(response.body)
    }

    /// Fetches a single resource and decodes it into `R`.
    ///
    /// # Errors
    ///
    /// As [`get_resource`](Self::get_resource), plus
    /// [`RestError::Deserialize`] if the body does not match `R`.
    pub async fn get_resource_as<R: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ResourceResponse<R>, RestError> {
        let endpoint = self.endpoint.get()?;
        let response = self
            .execute(&endpoint, ResourceOperation::Find, path, &Query::new(), None)
            .await?;
        let metadata = ListMetadata {
            request_id: response.request_id().map(ToString::to_string),
            ..ListMetadata::default()
        };
        ResourceResponse::decode(path, response.body, metadata)
    }

    /// Lists a collection, optionally filtered.
    ///
    /// Returns the items together with the metadata (pagination links,
    /// `meta`) of the same response.
    ///
    /// # Errors
    ///
    /// As [`get_resource`](Self::get_resource), plus
    /// [`RestError::InvalidCollection`] if the body is not a collection.
    pub async fn get_resources(
        &self,
        path: &str,
        filters: Option<&FilterSet>,
    ) -> Result<Page, RestError> {
        let query = filters.map(FilterSet::to_query).unwrap_or_default();
        self.get_resources_with_query(path, &query).await
    }

    /// Lists a collection with raw query parameters.
    ///
    /// # Errors
    ///
    /// As [`get_resources`](Self::get_resources).
    pub async fn get_resources_with_query(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<Page, RestError> {
        let endpoint = self.endpoint.get()?;
        self.list_page(&endpoint, path, query).await
    }

    /// Lists a collection and decodes each item into `R`.
    ///
    /// # Errors
    ///
    /// As [`get_resources`](Self::get_resources), plus
    /// [`RestError::Deserialize`] if an item does not match `R`.
    pub async fn get_resources_as<R: DeserializeOwned>(
        &self,
        path: &str,
        filters: Option<&FilterSet>,
    ) -> Result<ResourceResponse<Vec<R>>, RestError> {
        let (items, metadata) = self.get_resources(path, filters).await?.into_parts();
        ResourceResponse::decode(path, Value::Array(items), metadata)
    }

    /// Creates a resource by POSTing `payload`.
    ///
    /// # Errors
    ///
    /// As [`get_resource`](Self::get_resource).
    pub async fn create_resource(&self, path: &str, payload: &Value) -> Result<Value, RestError> {
        let endpoint = self.endpoint.get()?;
        let response = self
            .execute(
                &endpoint,
                ResourceOperation::Create,
                path,
                &Query::new(),
                Some(payload),
            )
            .await?;
        Ok(response.body)
    }

    /// Updates a resource by PUTting `payload`.
    ///
    /// # Errors
    ///
    /// As [`get_resource`](Self::get_resource).
    pub async fn update_resource(&self, path: &str, payload: &Value) -> Result<Value, RestError> {
        let endpoint = self.endpoint.get()?;
        let response = self
            .execute(
                &endpoint,
                ResourceOperation::Update,
                path,
                &Query::new(),
                Some(payload),
            )
            .await?;
        Ok(response.body)
    }

    /// Deletes a resource. Returns `true` on any 2xx status.
    ///
    /// # Errors
    ///
    /// As [`get_resource`](Self::get_resource).
    pub async fn delete_resource(&self, path: &str) -> Result<bool, RestError> {
        let endpoint = self.endpoint.get()?;
        self.execute(
            &endpoint,
            ResourceOperation::Delete,
            path,
            &Query::new(),
            None,
        )
        .await?;
        Ok(true)
    }

    /// Performs any operation and returns its tagged envelope.
    ///
    /// A non-empty `query` is appended to the URL whatever the operation.
    /// `payload` is sent by create and update only, as `null` when missing.
    ///
    /// # Errors
    ///
    /// As the specific operation methods.
    pub async fn send(
        &self,
        operation: ResourceOperation,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ResourceEnvelope, RestError> {
        let endpoint = self.endpoint.get()?;
        let response = self
            .execute(&endpoint, operation, path, query, payload)
            .await?;

        Ok(match operation {
            ResourceOperation::Find | ResourceOperation::Create | ResourceOperation::Update => {
                ResourceEnvelope::Item(response.body)
            }
            ResourceOperation::All => {
                ResourceEnvelope::Collection(Page::from_response(path, &response)?)
            }
            ResourceOperation::Delete => ResourceEnvelope::Ack(true),
        })
    }

    /// Lists one page against an explicit base URL.
    pub(crate) async fn list_page(
        &self,
        endpoint: &str,
        path: &str,
        query: &Query,
    ) -> Result<Page, RestError> {
        let response = self
            .execute(endpoint, ResourceOperation::All, path, query, None)
            .await?;
        Page::from_response(path, &response)
    }

    async fn execute(
        &self,
        endpoint: &str,
        operation: ResourceOperation,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<HttpResponse, RestError> {
        let url = build_url(endpoint, path, query);
        let method = operation.http_method();

        tracing::debug!(%operation, %method, %url, "Sending resource request");

        let result = match operation {
            ResourceOperation::Find | ResourceOperation::All => self.transport.get(&url).await,
            ResourceOperation::Create => {
                self.transport
                    .post(&url, payload.unwrap_or(&Value::Null))
                    .await
            }
            ResourceOperation::Update => {
                self.transport
                    .put(&url, payload.unwrap_or(&Value::Null))
                    .await
            }
            ResourceOperation::Delete => self.transport.delete(&url).await,
        };

        let response = result.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "Transport failed");
            e
        })?;

        tracing::debug!(%method, %url, status = response.code, "Received response");

        Ok(check_status(response)?)
    }
}

/// Passes 2xx responses through and converts everything else into an error.
fn check_status(response: HttpResponse) -> Result<HttpResponse, HttpResponseError> {
    if response.is_ok() {
        return Ok(response);
    }

    Err(HttpResponseError {
        code: response.code,
        message: serialize_error(&response.body),
        error_reference: response.request_id().map(String::from),
        body: response.body,
    })
}

/// Extracts the conventional error members of a body into a compact JSON
/// string, or falls back to the whole body.
fn serialize_error(body: &Value) -> String {
    let mut error_body = serde_json::Map::new();

    for key in ["errors", "error", "error_description", "message"] {
        if let Some(value) = body.get(key) {
            error_body.insert(key.to_string(), value.clone());
        }
    }

    if error_body.is_empty() {
        return match body {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }

    Value::Object(error_body).to_string()
}
