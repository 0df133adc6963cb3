//! Pagination walker: traverses a collection by following next links.
//!
//! A walk moves through three states:
//!
//! ```text
//! FETCHING ──ok──▶ DISPATCHING ──next link──▶ FETCHING
//!    │                  │
//!    │ error            └──no next link──▶ DONE
//!    ▼
//! FAILED
//! ```
//!
//! The first request uses the caller's path, filters, and `limit` hint.
//! After that the server's next link is authoritative: it is parsed into a
//! path and query and replayed as-is, and the caller's options are not
//! reapplied. Pages are fetched strictly one after the other; the next
//! request is only sent once every item of the current page was handed to
//! the callback.
//!
//! # Termination
//!
//! A walk ends when the server stops sending a next link, when a request
//! fails, when the callback asks to stop, when a next link points at a URL
//! already fetched in this walk ([`RestError::PaginationLoop`]), or when the
//! optional page limit is hit ([`RestError::PageLimitExceeded`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::rest::WalkOptions;
//!
//! let options = WalkOptions::new().limit(50).filter("status", "published");
//! let summary = client
//!     .walk_resources("/articles", &options, |article| println!("{article}"))
//!     .await?;
//! println!("Visited {} articles on {} pages", summary.items, summary.pages);
//! ```

use std::collections::HashSet;
use std::ops::ControlFlow;

use serde_json::Value;

use crate::clients::Transport;
use crate::error::ConfigError;
use crate::rest::client::ResourceClient;
use crate::rest::path::{build_url, parse_link, FilterSet, Query};
use crate::rest::response::Page;
use crate::rest::RestError;

/// Options for the first request of a walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Filters for the first page, serialized as `filters[key]=value`.
    pub filters: FilterSet,
    /// Page size hint, sent as `limit=N` on the first page.
    pub limit: Option<u32>,
    /// Maximum number of pages to fetch. Overrides the client config.
    pub max_pages: Option<usize>,
}

impl WalkOptions {
    /// Creates options with no filters, no limit hint, and no page cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key, value);
        self
    }

    /// Replaces all filters.
    #[must_use]
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the page size hint.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page cap for this walk. Zero is rejected when the walk
    /// starts.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Returns the query for the first page.
    #[must_use]
    pub fn initial_query(&self) -> Query {
        let mut query = self.filters.to_query();
        if let Some(limit) = self.limit {
            query.push("limit", limit.to_string());
        }
        query
    }
}

/// Outcome of a completed walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Number of pages fetched.
    pub pages: usize,
    /// Number of items handed to the callback.
    pub items: usize,
    /// `true` if the callback stopped the walk before the last page.
    pub stopped_early: bool,
}

#[derive(Debug)]
struct Cursor {
    base: String,
    path: String,
    query: Query,
}

#[derive(Debug)]
enum WalkState {
    Fetching(Cursor),
    Done,
    Failed,
}

/// Page-at-a-time iteration over a paginated collection.
///
/// Created by [`ResourceClient::walker`]. Each call to
/// [`next_page`](Self::next_page) performs at most one request.
#[derive(Debug)]
pub struct PageWalker<'a, T> {
    client: &'a ResourceClient<T>,
    endpoint: String,
    state: WalkState,
    visited: HashSet<String>,
    pages: usize,
    max_pages: Option<usize>,
}

impl<'a, T: Transport> PageWalker<'a, T> {
    fn new(
        client: &'a ResourceClient<T>,
        endpoint: String,
        path: &str,
        options: &WalkOptions,
    ) -> Self {
        let cursor = Cursor {
            base: endpoint.clone(),
            path: path.to_string(),
            query: options.initial_query(),
        };

        Self {
            client,
            endpoint,
            state: WalkState::Fetching(cursor),
            visited: HashSet::new(),
            pages: 0,
            max_pages: options.max_pages.or_else(|| client.config().max_pages()),
        }
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the walk is finished. After an error the walk
    /// is failed and every later call returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the list error of the current page, or
    /// [`RestError::PaginationLoop`] / [`RestError::PageLimitExceeded`] when
    /// the next link cannot be followed.
    pub async fn next_page(&mut self) -> Result<Option<Page>, RestError> {
        let cursor = match std::mem::replace(&mut self.state, WalkState::Failed) {
            WalkState::Fetching(cursor) => cursor,
            WalkState::Done => {
                self.state = WalkState::Done;
                return Ok(None);
            }
            WalkState::Failed => return Ok(None),
        };

        let url = build_url(&cursor.base, &cursor.path, &cursor.query);

        if let Some(max_pages) = self.max_pages {
            if self.pages >= max_pages {
                tracing::warn!(max_pages, next = %url, "Walk stopped at page limit");
                return Err(RestError::PageLimitExceeded { max_pages });
            }
        }

        if !self.visited.insert(url.clone()) {
            tracing::warn!(link = %url, "Walk detected a pagination loop");
            return Err(RestError::PaginationLoop { link: url });
        }

        tracing::debug!(page = self.pages + 1, %url, "Walk fetching page");

        let page = self
            .client
            .list_page(&cursor.base, &cursor.path, &cursor.query)
            .await
            .map_err(|e| {
                tracing::debug!(page = self.pages + 1, error = %e, "Walk failed");
                e
            })?;
        self.pages += 1;

        self.state = match page.next_link() {
            Some(link) => {
                let target = parse_link(&self.endpoint, &cursor.path, link);
                tracing::debug!(next = link, "Walk following next link");
                WalkState::Fetching(Cursor {
                    base: target.base.unwrap_or_else(|| self.endpoint.clone()),
                    path: target.path,
                    query: target.query,
                })
            }
            None => {
                tracing::debug!(pages = self.pages, "Walk reached last page");
                WalkState::Done
            }
        };

        Ok(Some(page))
    }

    /// Returns the number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Returns `true` once no further request will be made.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        !matches!(self.state, WalkState::Fetching(_))
    }
}

impl<T: Transport> ResourceClient<T> {
    /// Starts a page-at-a-time walk.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Config`] if no endpoint is set, or if
    /// `options.max_pages` is zero.
    pub fn walker(&self, path: &str, options: &WalkOptions) -> Result<PageWalker<'_, T>, RestError> {
        if options.max_pages == Some(0) {
            return Err(ConfigError::InvalidMaxPages { value: 0 }.into());
        }
        let endpoint = self.endpoint()?;
        Ok(PageWalker::new(self, endpoint, path, options))
    }

    /// Walks every page of a collection, calling `on_item` once per item in
    /// server order.
    ///
    /// Returns a summary once the last page was dispatched. On the first
    /// error the walk stops, `on_item` is not called again, and the error is
    /// returned. Items already dispatched stay dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Config`] if no endpoint is set or the page cap is
    /// zero, any error from a page fetch, [`RestError::PaginationLoop`], or
    /// [`RestError::PageLimitExceeded`].
    pub async fn walk_resources<F>(
        &self,
        path: &str,
        options: &WalkOptions,
        mut on_item: F,
    ) -> Result<WalkSummary, RestError>
    where
        F: FnMut(Value),
    {
        self.try_walk_resources(path, options, |item| {
            on_item(item);
            ControlFlow::Continue(())
        })
        .await
    }

    /// Like [`walk_resources`](Self::walk_resources), but `on_item` may
    /// return [`ControlFlow::Break`] to stop the walk. No further item is
    /// dispatched and no further page is fetched after a break.
    ///
    /// # Errors
    ///
    /// As [`walk_resources`](Self::walk_resources).
    pub async fn try_walk_resources<F>(
        &self,
        path: &str,
        options: &WalkOptions,
        mut on_item: F,
    ) -> Result<WalkSummary, RestError>
    where
        F: FnMut(Value) -> ControlFlow<()>,
    {
        let mut walker = self.walker(path, options)?;
        let mut items = 0;

        while let Some(page) = walker.next_page().await? {
            for item in page.items {
                items += 1;
                if on_item(item).is_break() {
                    tracing::debug!(items, "Walk stopped by callback");
                    return Ok(WalkSummary {
                        pages: walker.pages_fetched(),
                        items,
                        stopped_early: true,
                    });
                }
            }
        }

        Ok(WalkSummary {
            pages: walker.pages_fetched(),
            items,
            stopped_early: false,
        })
    }
}
