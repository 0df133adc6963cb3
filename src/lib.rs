//! # REST Resource Client
//!
//! An async client for JSON REST services that expose resource collections
//! under a single base URL.
//!
//! ## Overview
//!
//! This crate provides:
//! - A settable base URL via [`EndpointStore`], with a clear
//!   [`ConfigError::EndpointNotConfigured`] when it is missing
//! - URL building with `filters[key]=value` query serialization via
//!   [`FilterSet`] and [`build_url`](rest::build_url)
//! - Get, list, create, update and delete via [`ResourceClient`]
//! - Next-link pagination via [`ResourceClient::walk_resources`] and
//!   [`PageWalker`]
//! - A pluggable [`Transport`] with a `reqwest`-backed default,
//!   [`ReqwestTransport`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_resource::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .endpoint("http://192.168.99.100:8080")
//!     .user_agent_prefix("MyApp/1.0")
//!     .max_pages(100)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint(), Some("http://192.168.99.100:8080"));
//! ```
//!
//! ## Filters
//!
//! ```rust
//! use rest_resource::FilterSet;
//! use rest_resource::rest::build_url;
//!
//! let filters = FilterSet::new().with("title", "sample title");
//! let url = build_url("http://192.168.99.100:8080", "/articles", &filters.to_query());
//!
//! assert_eq!(
//!     url,
//!     "http://192.168.99.100:8080/articles?filters%5Btitle%5D=sample%20title"
//! );
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use rest_resource::{ClientConfig, ResourceClient};
//! use serde_json::json;
//!
//! let client = ResourceClient::new(ClientConfig::default())?;
//! client.set_endpoint("http://192.168.99.100:8080");
//!
//! let article = client.get_resource("/articles/1").await?;
//! let user = client.create_resource("/users", &json!({"name": "John Doe"})).await?;
//! let deleted = client.delete_resource("/users/90").await?;
//! ```
//!
//! ## Walking Every Page
//!
//! ```rust,ignore
//! use rest_resource::{ResourceClient, WalkOptions};
//!
//! let options = WalkOptions::new().filter("title", "sample title").limit(1);
//! let summary = client
//!     .walk_resources("/articles", &options, |article| println!("{article}"))
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Each client owns its endpoint and transport
//! - **Fail before sending**: A missing endpoint is reported before any request
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Each operation calls the transport exactly once

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP transport types
pub use clients::{
    HttpError, HttpMethod, HttpResponse, HttpResponseError, LinkHeader, ReqwestTransport,
    Transport, TransportError,
};

// Re-export resource types
pub use rest::{
    EndpointStore, FilterSet, ListMetadata, Page, PageWalker, Query, ResourceClient,
    ResourceResponse, RestError, WalkOptions, WalkSummary,
};
