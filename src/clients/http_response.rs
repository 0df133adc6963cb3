//! HTTP response types for the REST resource client.
//!
//! This module provides the [`HttpResponse`] type returned by every
//! transport call, and [`LinkHeader`] for reading pagination links out of
//! the `Link` response header.

use std::collections::HashMap;

/// Pagination links parsed from the `Link` header.
///
/// The header format is `<url>; rel="next", <url>; rel="prev"`. Unlike
/// cursor-token APIs, the full URL of each link is kept, since the walker
/// replays the link as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkHeader {
    /// The URL of the previous page, if available.
    pub prev: Option<String>,
    /// The URL of the next page, if available.
    pub next: Option<String>,
}

impl LinkHeader {
    /// Parses a `Link` header value.
    ///
    /// Links are separated by commas outside `<...>`, so a URL may itself
    /// contain commas. Entries whose target is not wrapped in `<` and `>`
    /// are ignored. Both `rel="prev"` and `rel="previous"` are accepted for
    /// the previous page, and when a relation appears twice the first one
    /// wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_resource::LinkHeader;
    ///
    /// let links = LinkHeader::parse(r#"</articles?fields=id,title&offset=2>; rel="next""#);
    /// assert_eq!(links.next.as_deref(), Some("/articles?fields=id,title&offset=2"));
    /// assert!(links.prev.is_none());
    /// ```
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        Self::from_values([header_value])
    }

    /// Parses every value of a repeated `Link` header, in order.
    #[must_use]
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut result = Self::default();
        for value in values {
            for entry in split_entries(value) {
                result.add_entry(entry);
            }
        }
        result
    }

    fn add_entry(&mut self, entry: &str) {
        let Some((url, params)) = entry
            .trim()
            .strip_prefix('<')
            .and_then(|rest| rest.split_once('>'))
        else {
            return;
        };
        if url.is_empty() {
            return;
        }

        let rel = params.split(';').find_map(|param| {
            param
                .trim()
                .strip_prefix("rel=")
                .map(|value| value.trim_matches('"').trim_matches('\''))
        });

        for rel in rel.unwrap_or_default().split_whitespace() {
            let slot = match rel {
                "next" => &mut self.next,
                "prev" | "previous" => &mut self.prev,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(url.to_string());
            }
        }
    }
}

/// Splits a header value on commas that are not inside `<...>`.
fn split_entries(header_value: &str) -> impl Iterator<Item = &str> {
    let mut in_target = false;
    header_value.split(move |c: char| match c {
        '<' => {
            in_target = true;
            false
        }
        '>' => {
            in_target = false;
            false
        }
        ',' => !in_target,
        _ => false,
    })
}

/// An HTTP response as returned by a [`Transport`](crate::Transport).
///
/// Contains the status code, headers (lowercased names, possibly multiple
/// values each), the body parsed as JSON, and the links from the `Link`
/// header.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// The next page URL from the `Link` header.
    pub next_link: Option<String>,
    /// The previous page URL from the `Link` header.
    pub prev_link: Option<String>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing every `Link` header value.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let links = headers
            .get("link")
            .map(|values| LinkHeader::from_values(values.iter().map(String::as_str)))
            .unwrap_or_default();

        Self {
            code,
            headers,
            body,
            next_link: links.next,
            prev_link: links.prev,
        }
    }

    /// Creates a response with no headers. Mostly useful for fake transports.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_resource::HttpResponse;
    /// use serde_json::json;
    ///
    /// let response = HttpResponse::with_body(204, json!(true));
    /// assert!(response.is_ok());
    /// ```
    #[must_use]
    pub fn with_body(code: u16, body: serde_json::Value) -> Self {
        Self::new(code, HashMap::new(), body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
