//! The transport capability used by the resource client.
//!
//! A [`Transport`] is a narrow `{get, post, put, delete}` interface over
//! absolute URLs. The resource client only ever talks to the network through
//! it, which lets tests substitute a fake implementation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;

/// HTTP methods used by the resource client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Injectable HTTP transport.
///
/// Implementations receive absolute URLs and return the response whatever
/// its status; classifying the status code is the resource client's job.
/// An `Err` is reserved for failures that produced no response at all.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use rest_resource::{HttpResponse, Transport, TransportError};
/// use serde_json::{json, Value};
///
/// struct AlwaysEmpty;
///
/// #[async_trait]
/// impl Transport for AlwaysEmpty {
///     async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::with_body(200, json!([])))
///     }
///     async fn post(&self, _url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::with_body(201, body.clone()))
///     }
///     async fn put(&self, _url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::with_body(200, body.clone()))
///     }
///     async fn delete(&self, _url: &str) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::with_body(204, json!({})))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// Sends a POST request with a JSON body.
    async fn post(&self, url: &str, body: &serde_json::Value)
        -> Result<HttpResponse, TransportError>;

    /// Sends a PUT request with a JSON body.
    async fn put(&self, url: &str, body: &serde_json::Value)
        -> Result<HttpResponse, TransportError>;

    /// Sends a DELETE request.
    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url).await
    }

    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body).await
    }

    async fn put(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        (**self).put(url, body).await
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).delete(url).await
    }
}
