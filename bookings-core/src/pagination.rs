//! "Load more" pagination over booking query results.
//!
//! Pages are fetched one at a time. The next fetch starts from the cursor the
//! previous page reported, a cursor is never requested twice, and a failed
//! fetch leaves already loaded pages in place.

use std::collections::HashSet;

use crate::booking::{Cursor, Page};
use crate::error::BookingsResult;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where pages come from (the bookings query).
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetch up to `limit` bookings starting at `cursor` (`None` for the first page).
    async fn fetch_page(&self, cursor: Option<Cursor>, limit: usize) -> BookingsResult<Page>;
}

/// Result of [`Paginator::fetch_next_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was appended, holding this many bookings
    Fetched(usize),
    /// The cursor was already requested
    Suppressed,
    /// No further pages
    Exhausted,
    /// The query failed, see [`Paginator::error_notice`]
    Failed,
}

pub struct Paginator<S> {
    source: S,
    limit: usize,
    pages: Vec<Page>,
    requested: HashSet<Option<Cursor>>,
    next_cursor: Option<Cursor>,
    exhausted: bool,
    last_error: Option<String>,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, limit: usize) -> Self {
        Paginator {
            source,
            limit: limit.max(1),
            pages: Vec::new(),
            requested: HashSet::new(),
            next_cursor: None,
            exhausted: false,
            last_error: None,
        }
    }

    /// Fetch the page after the last loaded one.
    pub async fn fetch_next_page(&mut self) -> FetchOutcome {
        if !self.has_next_page() {
            return FetchOutcome::Exhausted;
        }

        let cursor = if self.pages.is_empty() {
            None
        } else {
            self.next_cursor
        };

        if !self.requested.insert(cursor) {
            tracing::debug!(?cursor, "suppressing duplicate page fetch");
            return FetchOutcome::Suppressed;
        }

        match self.source.fetch_page(cursor, self.limit).await {
            Ok(page) => {
                let count = page.bookings.len();
                self.next_cursor = match (cursor, page.next_cursor) {
                    (Some(prev), Some(next)) if next <= prev => {
                        tracing::warn!(prev, next, "page cursor did not advance, stopping");
                        None
                    }
                    (_, next) => next,
                };
                self.exhausted = self.next_cursor.is_none();
                self.pages.push(page);
                self.last_error = None;
                FetchOutcome::Fetched(count)
            }
            Err(e) => {
                tracing::warn!(?cursor, error = %e, "page fetch failed");
                // Allow retrying the same cursor
                self.requested.remove(&cursor);
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch until the source runs out or a fetch fails.
    pub async fn fetch_all(&mut self) -> FetchOutcome {
        loop {
            match self.fetch_next_page().await {
                FetchOutcome::Fetched(_) => continue,
                other => return other,
            }
        }
    }

    pub fn has_next_page(&self) -> bool {
        !self.exhausted
    }

    /// Label of the "load more" button.
    pub fn load_more_label(&self) -> &'static str {
        if self.has_next_page() {
            "load_more_results"
        } else {
            "no_more_results"
        }
    }

    /// Message of the last failed fetch, shown next to the loaded pages.
    pub fn error_notice(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}
