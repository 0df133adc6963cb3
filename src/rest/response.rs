//! Response envelopes for resource operations.
//!
//! Every resource operation produces a [`ResourceEnvelope`], a tagged union
//! selected by the operation:
//!
//! - `find`, `create`, `update` produce [`ResourceEnvelope::Item`]
//! - `all` produces [`ResourceEnvelope::Collection`] holding a [`Page`]
//! - `delete` produces [`ResourceEnvelope::Ack`]
//!
//! # Collection Metadata
//!
//! A list response yields both its items and its [`ListMetadata`]. Two body
//! shapes are understood:
//!
//! - A bare JSON array: the array is the item list, and links come from
//!   the `Link` header.
//! - An object with a `data` array: `data` is the item list, `links` and
//!   `meta` are read from the same object. Body links win over header links.
//!
//! ```rust
//! use rest_resource::rest::Page;
//! use rest_resource::HttpResponse;
//! use serde_json::json;
//!
//! let response = HttpResponse::with_body(200, json!({
//!     "data": [{"id": "1"}, {"id": "2"}],
//!     "links": {"next": "/articles?limit=2&offset=2"},
//!     "meta": {"total": 5}
//! }));
//!
//! let page = Page::from_response("/articles", &response).unwrap();
//! assert_eq!(page.items.len(), 2);
//! assert_eq!(page.next_link(), Some("/articles?limit=2&offset=2"));
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpResponse;
use crate::rest::RestError;

/// Pagination links attached to a collection response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Link to the next page. Absence means this is the last page.
    pub next: Option<String>,
    /// Link to the previous page.
    pub prev: Option<String>,
    /// Link to the current page.
    #[serde(rename = "self")]
    pub current: Option<String>,
    /// Link to the first page.
    pub first: Option<String>,
    /// Link to the last page.
    pub last: Option<String>,
}

impl Links {
    /// Reads links from a JSON object. Each link may be a string or an
    /// object with an `href` member; `null` and empty strings count as absent.
    fn from_value(value: &Value) -> Self {
        let link = |key: &str| -> Option<String> {
            let entry = value.get(key)?;
            let href = entry
                .as_str()
                .or_else(|| entry.get("href").and_then(Value::as_str))?;
            (!href.is_empty()).then(|| href.to_string())
        };

        Self {
            next: link("next"),
            prev: link("prev").or_else(|| link("previous")),
            current: link("self"),
            first: link("first"),
            last: link("last"),
        }
    }
}

/// Metadata returned alongside the items of a collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMetadata {
    /// Pagination links.
    pub links: Links,
    /// Free-form `meta` object from the response body, if any.
    pub meta: Option<Value>,
    /// Request ID from the `X-Request-Id` header.
    pub request_id: Option<String>,
}

impl ListMetadata {
    /// Returns the next page link, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns `true` if the server advertised a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.links.next.is_some()
    }

    /// Returns `true` if the server advertised a previous page.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.links.prev.is_some()
    }
}

/// One page of a collection: its items plus metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// The items, in server order.
    pub items: Vec<Value>,
    /// Links and metadata for this page.
    pub metadata: ListMetadata,
}

impl Page {
    /// Splits a successful list response into items and metadata.
    ///
    /// An empty object or `null` body is an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidCollection`] if the body is neither an
    /// array nor an object with a `data` array.
    pub fn from_response(path: &str, response: &HttpResponse) -> Result<Self, RestError> {
        let header_links = Links {
            next: response.next_link.clone(),
            prev: response.prev_link.clone(),
            ..Links::default()
        };
        let request_id = response.request_id().map(ToString::to_string);

        let (items, links, meta) = match &response.body {
            Value::Array(items) => (items.clone(), header_links, None),
            Value::Null => (Vec::new(), header_links, None),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(items)) => {
                    let body_links = map.get("links").map(Links::from_value).unwrap_or_default();
                    (
                        items.clone(),
                        merge_links(body_links, header_links),
                        map.get("meta").cloned(),
                    )
                }
                None if map.is_empty() => (Vec::new(), header_links, None),
                _ => {
                    return Err(RestError::InvalidCollection {
                        path: path.to_string(),
                        body: response.body.clone(),
                    })
                }
            },
            _ => {
                return Err(RestError::InvalidCollection {
                    path: path.to_string(),
                    body: response.body.clone(),
                })
            }
        };

        Ok(Self {
            items,
            metadata: ListMetadata {
                links,
                meta,
                request_id,
            },
        })
    }

    /// Returns the next page link, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.metadata.next_link()
    }

    /// Consumes the page, returning `(items, metadata)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, ListMetadata) {
        (self.items, self.metadata)
    }
}

fn merge_links(body: Links, header: Links) -> Links {
    Links {
        next: body.next.or(header.next),
        prev: body.prev.or(header.prev),
        ..body
    }
}

/// The result of a resource operation, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceEnvelope {
    /// A single resource (find, create, update).
    Item(Value),
    /// A page of a collection (all).
    Collection(Page),
    /// A success marker (delete).
    Ack(bool),
}

impl ResourceEnvelope {
    /// Returns the single resource, if this is an `Item`.
    #[must_use]
    pub fn into_item(self) -> Option<Value> {
        match self {
            Self::Item(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the page, if this is a `Collection`.
    #[must_use]
    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Collection(page) => Some(page),
            _ => None,
        }
    }

    /// Returns the acknowledgement, if this is an `Ack`.
    #[must_use]
    pub const fn ack(&self) -> Option<bool> {
        match self {
            Self::Ack(ack) => Some(*ack),
            _ => None,
        }
    }
}

/// A typed response: decoded data plus collection metadata.
///
/// The struct implements `Deref<Target = T>` for transparent access to the
/// inner data.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::{ListMetadata, ResourceResponse};
///
/// let response = ResourceResponse::new(vec!["a", "b"], ListMetadata::default());
/// assert_eq!(response.len(), 2);
/// assert!(!response.has_next_page());
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    metadata: ListMetadata,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse`.
    #[must_use]
    pub const fn new(data: T, metadata: ListMetadata) -> Self {
        Self { data, metadata }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns the collection metadata. Empty for single resources.
    #[must_use]
    pub const fn metadata(&self) -> &ListMetadata {
        &self.metadata
    }

    /// Returns `true` if there is a next page of results.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.metadata.has_next_page()
    }

    /// Returns the next page link, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.metadata.next_link()
    }

    /// Returns the request ID from the response headers.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.metadata.request_id.as_deref()
    }

    /// Maps the inner data to a new type, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            metadata: self.metadata,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes `value` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Deserialize`] if `value` does not match `T`.
    pub fn decode(path: &str, value: Value, metadata: ListMetadata) -> Result<Self, RestError> {
        let data = serde_json::from_value(value).map_err(|source| RestError::Deserialize {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::new(data, metadata))
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};
