//! Serves recorded query result pages as if they came from the backend.

use std::collections::HashMap;

use bookings_core::booking::{Cursor, Page};
use bookings_core::error::{BookingsError, BookingsResult};
use bookings_core::pagination::PageSource;

/// Pages recorded in fetch order. A page is served for the cursor the page
/// before it reported.
pub struct RecordedPages {
    pages: Vec<Page>,
    by_cursor: HashMap<Cursor, usize>,
}

impl RecordedPages {
    pub fn new(pages: Vec<Page>) -> Self {
        let by_cursor = pages
            .iter()
            .enumerate()
            .filter_map(|(i, page)| page.next_cursor.map(|cursor| (cursor, i + 1)))
            .collect();

        RecordedPages { pages, by_cursor }
    }
}

impl PageSource for RecordedPages {
    async fn fetch_page(&self, cursor: Option<Cursor>, limit: usize) -> BookingsResult<Page> {
        let index = match cursor {
            None => 0,
            Some(cursor) => *self
                .by_cursor
                .get(&cursor)
                .ok_or_else(|| BookingsError::Fetch(format!("no page recorded for cursor {cursor}")))?,
        };

        let page = self
            .pages
            .get(index)
            .cloned()
            .ok_or_else(|| BookingsError::Fetch(format!("page {} is missing from the recording", index + 1)))?;

        if page.bookings.len() > limit {
            tracing::debug!(
                page = index + 1,
                bookings = page.bookings.len(),
                limit,
                "recorded page is larger than the configured page size"
            );
        }

        Ok(page)
    }
}
