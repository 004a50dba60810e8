//! Assembly of a bookings listing from fetched pages.

use std::collections::HashMap;

use crate::booking::{Booking, Page, RecurringInfo};
use crate::listing::grouping::RecurrenceGrouper;
use crate::listing::status::ListingStatus;
use crate::listing::today::{CivilDay, TodayEntry, bookings_today};

/// One row of the main list.
#[derive(Debug, Clone, Copy)]
pub struct ListingRow<'a> {
    pub booking: &'a Booking,
    pub recurring_info: Option<&'a RecurringInfo>,
}

/// Headline and description keys of an empty listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub headline_key: &'static str,
    pub description_key: &'static str,
    pub status: ListingStatus,
}

/// Everything a listing renders for one pass over the loaded pages.
#[derive(Debug)]
pub struct ListingView<'a> {
    pub status: ListingStatus,
    /// "Today" section; only filled for `upcoming`
    pub today: Vec<TodayEntry<'a>>,
    /// Main list rows, one vector per fetched page
    pub pages: Vec<Vec<ListingRow<'a>>>,
    /// Every occurrence per recurring set seen while collapsing
    pub occurrences: HashMap<&'a str, Vec<&'a Booking>>,
}

impl<'a> ListingView<'a> {
    pub fn build(pages: &'a [Page], status: ListingStatus, day: &CivilDay) -> Self {
        let today = match status {
            ListingStatus::Upcoming => bookings_today(pages, day),
            _ => Vec::new(),
        };

        let mut grouper = RecurrenceGrouper::new(status);
        let rows = pages
            .iter()
            .map(|page| {
                page.bookings
                    .iter()
                    .filter(|booking| grouper.admit_row(*booking, day))
                    .map(|booking| ListingRow {
                        booking,
                        recurring_info: page.recurring_info_for(booking),
                    })
                    .collect()
            })
            .collect();

        ListingView {
            status,
            today,
            pages: rows,
            occurrences: grouper.into_occurrences(),
        }
    }

    /// Whether the "today" section is rendered.
    pub fn shows_today(&self) -> bool {
        self.status == ListingStatus::Upcoming && !self.today.is_empty()
    }

    /// All main list rows across pages, in order.
    pub fn rows(&self) -> impl Iterator<Item = &ListingRow<'a>> {
        self.pages.iter().flatten()
    }

    /// Every recorded occurrence of the row's recurring set (the row itself when not collapsed).
    pub fn occurrences_of(&self, booking: &'a Booking) -> Vec<&'a Booking> {
        booking
            .recurring_key()
            .and_then(|key| self.occurrences.get(key))
            .cloned()
            .unwrap_or_else(|| vec![booking])
    }
}

/// Empty state when the first fetched page holds no bookings.
pub fn empty_state(pages: &[Page], status: ListingStatus) -> Option<EmptyState> {
    let is_empty = pages.first().is_none_or(|page| page.bookings.is_empty());

    is_empty.then_some(EmptyState {
        headline_key: "no_status_bookings_yet",
        description_key: status.description_key(),
        status,
    })
}
