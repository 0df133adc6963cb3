//! Generic REST resource access.
//!
//! This module provides the pieces for talking to a JSON REST service that
//! exposes collections under a single base URL:
//!
//! - **[`EndpointStore`]**: The base URL, settable at any time
//! - **URL building**: [`build_url`], [`FilterSet`] and [`Query`] for
//!   `filters[key]=value` style listing
//! - **[`ResourceClient`]**: get, list, create, update and delete over a
//!   [`Transport`](crate::clients::Transport)
//! - **Pagination**: [`PageWalker`] and [`ResourceClient::walk_resources`]
//!   for following `links.next` to the last page
//! - **[`RestError`]**: Errors for all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::rest::{FilterSet, ResourceClient, WalkOptions};
//! use rest_resource::ClientConfig;
//!
//! let client = ResourceClient::new(ClientConfig::default())?;
//! client.set_endpoint("http://localhost:8080");
//!
//! // One page
//! let filters = FilterSet::new().with("title", "sample title");
//! let page = client.get_resources("/articles", Some(&filters)).await?;
//! for article in &page.items {
//!     println!("{article}");
//! }
//!
//! // Every page
//! let options = WalkOptions::new().limit(50);
//! client
//!     .walk_resources("/articles", &options, |article| println!("{article}"))
//!     .await?;
//! ```

mod client;
mod endpoint;
mod errors;
mod path;
mod response;
mod walker;

pub use client::ResourceClient;
pub use endpoint::EndpointStore;
pub use errors::RestError;
pub use path::{build_url, parse_link, FilterSet, LinkTarget, Query, ResourceOperation};
pub use response::{Links, ListMetadata, Page, ResourceEnvelope, ResourceResponse};
pub use walker::{PageWalker, WalkOptions, WalkSummary};
