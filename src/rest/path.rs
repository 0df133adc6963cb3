//! URL building and next-link parsing.
//!
//! This module turns an endpoint, a resource path, and query parameters into
//! the absolute URL handed to the transport, and turns a server-supplied
//! "next" link back into a path and query.
//!
//! # Query Encoding
//!
//! Filters serialize as `filters[key]=value`. Keys and values are
//! percent-encoded separately, so `[`, `]` and spaces become `%5B`, `%5D` and
//! `%20` while `=` and `&` keep their structural meaning. Parameters appear
//! in insertion order.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::rest::{build_url, FilterSet};
//!
//! let filters = FilterSet::new().with("title", "sample title");
//! let url = build_url("http://localhost:8080", "/articles", &filters.to_query());
//! assert_eq!(url, "http://localhost:8080/articles?filters%5Btitle%5D=sample%20title");
//! ```

use std::fmt;

use crate::clients::HttpMethod;

/// Operations the resource client can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource (GET).
    Find,
    /// List a collection (GET).
    All,
    /// Create a resource (POST).
    Create,
    /// Update a resource (PUT).
    Update,
    /// Delete a resource (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Find | Self::All => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` if the operation sends a JSON payload.
    #[must_use]
    pub const fn has_payload(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters, stored decoded.
///
/// Unlike [`FilterSet`], keys are used verbatim, so a query parsed from a
/// next link is replayed with the same parameters the server wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a parameter. Repeated keys are kept.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the parameters in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// Follows `application/x-www-form-urlencoded` rules: empty segments are
    /// skipped, a segment without `=` gets an empty value, `+` is a space,
    /// and percent-escapes are decoded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_resource::rest::Query;
    ///
    /// let query = Query::parse("limit=1&offset=2&q=sample+title");
    /// assert_eq!(query.get("limit"), Some("1"));
    /// assert_eq!(query.get("offset"), Some("2"));
    /// assert_eq!(query.get("q"), Some("sample title"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        url::form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Serializes the parameters as `k=v` joined by `&`, percent-encoding
    /// every key and value.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Extend<(String, String)> for Query {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}

/// An ordered set of list filters.
///
/// Keys are unique: inserting an existing key replaces its value without
/// moving it, so serialization order is always first-insertion order.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::FilterSet;
///
/// let filters = FilterSet::new()
///     .with("author", "jane")
///     .with("status", "draft")
///     .with("author", "john");
///
/// assert_eq!(filters.len(), 2);
/// assert_eq!(
///     filters.to_query().to_query_string(),
///     "filters%5Bauthor%5D=john&filters%5Bstatus%5D=draft"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<(String, String)>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces a filter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Inserts or replaces a filter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes a filter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns `true` if there are no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over filters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Converts the filters into `filters[key]=value` query parameters.
    #[must_use]
    pub fn to_query(&self) -> Query {
        self.iter()
            .map(|(k, v)| (format!("filters[{k}]"), v.to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Builds the absolute URL for a request.
///
/// `endpoint` and `path` are concatenated as-is. A `?` and the encoded
/// query are appended only when the query is non-empty.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::{build_url, Query};
///
/// assert_eq!(
///     build_url("http://192.168.99.100:8080", "/users/90", &Query::new()),
///     "http://192.168.99.100:8080/users/90"
/// );
/// ```
#[must_use]
pub fn build_url(endpoint: &str, path: &str, query: &Query) -> String {
    if query.is_empty() {
        format!("{endpoint}{path}")
    } else {
        format!("{endpoint}{path}?{}", query.to_query_string())
    }
}

/// The target of a follow-up request, parsed from a next link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    /// A base URL replacing the configured endpoint, when the link pointed
    /// at a different origin.
    pub base: Option<String>,
    /// The resource path.
    pub path: String,
    /// The query parameters of the link.
    pub query: Query,
}

/// Parses a next link into a path and query relative to `endpoint`.
///
/// - A link starting with `endpoint`, followed by `/`, `?` or nothing, has
///   that prefix stripped.
/// - Any other absolute URL keeps its own origin as [`LinkTarget::base`].
/// - A relative link is split at its first `?`; a link made only of a query
///   string (`?page=2`) reuses `current_path`.
///
/// Fragments are dropped.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::parse_link;
///
/// let target = parse_link("http://localhost:8080", "/articles", "/articles?limit=1&offset=2");
/// assert_eq!(target.base, None);
/// assert_eq!(target.path, "/articles");
/// assert_eq!(target.query.get("offset"), Some("2"));
/// ```
#[must_use]
pub fn parse_link(endpoint: &str, current_path: &str, link: &str) -> LinkTarget {
    let link = link.split('#').next().unwrap_or_default().trim();

    if !endpoint.is_empty() {
        if let Some(relative) = link.strip_prefix(endpoint) {
            if relative.is_empty() || relative.starts_with(['/', '?']) {
                return split_relative(current_path, relative);
            }
        }
    }

    if let Ok(url) = url::Url::parse(link) {
        if url.has_host() {
            return LinkTarget {
                base: Some(url.origin().ascii_serialization()),
                path: url.path().to_string(),
                query: url.query().map(Query::parse).unwrap_or_default(),
            };
        }
    }

    split_relative(current_path, link)
}

fn split_relative(current_path: &str, link: &str) -> LinkTarget {
    let (path, query) = link.split_once('?').unwrap_or((link, ""));
    let path = if path.is_empty() { current_path } else { path };

    LinkTarget {
        base: None,
        path: path.to_string(),
        query: Query::parse(query),
    }
}
