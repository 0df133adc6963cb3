//! HTTP transport layer for the REST resource client.
//!
//! This module provides the low-level pieces the resource client is built on.
//!
//! # Overview
//!
//! - [`Transport`]: The `{get, post, put, delete}` capability the client talks through
//! - [`ReqwestTransport`]: The default `reqwest`-backed transport
//! - [`HttpResponse`]: A response with status code, headers, and JSON body
//! - [`LinkHeader`]: Pagination links parsed from the `Link` header
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`HttpError`], [`HttpResponseError`], [`TransportError`]: HTTP error types
//!
//! # Status Handling
//!
//! Transports return every response they receive. The resource client
//! treats 200-299 as success and converts anything else into
//! [`HttpResponseError`]. There is no automatic retry.

mod errors;
mod http_client;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, TransportError};
pub use http_client::{ReqwestTransport, SDK_VERSION};
pub use http_response::{HttpResponse, LinkHeader};
pub use transport::{HttpMethod, Transport};
