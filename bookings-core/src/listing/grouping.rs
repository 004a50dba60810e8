//! Collapsing of recurring occurrences in the bookings listing.

use std::collections::HashMap;

use crate::booking::Booking;
use crate::listing::status::ListingStatus;
use crate::listing::today::{CivilDay, DisplayBucket};

/// Single-pass grouping state for one render of a listing.
///
/// Created per render and dropped with it, so no grouping leaks between
/// renders. Within a render it spans all pages: a recurring set that started
/// on page one stays collapsed on page two.
#[derive(Debug)]
pub struct RecurrenceGrouper<'a> {
    status: ListingStatus,
    occurrences: HashMap<&'a str, Vec<&'a Booking>>,
}

impl<'a> RecurrenceGrouper<'a> {
    pub fn new(status: ListingStatus) -> Self {
        RecurrenceGrouper {
            status,
            occurrences: HashMap::new(),
        }
    }

    /// Record `booking` and decide whether it is shown as its own row.
    ///
    /// For collapsing statuses only the first booking seen per recurring set
    /// is shown; every other status shows everything.
    pub fn admit(&mut self, booking: &'a Booking) -> bool {
        if !self.status.collapses_recurring() {
            return true;
        }

        let Some(key) = booking.recurring_key() else {
            return true;
        };

        let seen = self.occurrences.entry(key).or_default();
        seen.push(booking);
        seen.len() == 1
    }

    /// Decide whether `booking` is a row of the main list.
    ///
    /// `upcoming` skips grouping and instead leaves out bookings that start
    /// on `day`, since those are shown in their own section.
    pub fn admit_row(&mut self, booking: &'a Booking, day: &CivilDay) -> bool {
        match self.status {
            ListingStatus::Upcoming => day.bucket(booking) == DisplayBucket::Other,
            _ => self.admit(booking),
        }
    }

    /// Every occurrence recorded per recurring set, in input order.
    pub fn into_occurrences(self) -> HashMap<&'a str, Vec<&'a Booking>> {
        self.occurrences
    }
}

/// Output of [`group_recurring`].
#[derive(Debug, Default)]
pub struct RecurrenceGroups<'a> {
    /// Bookings to show as rows, in input order
    pub shown: Vec<&'a Booking>,
    /// Full occurrence set per recurring event id (collapsing statuses only)
    pub occurrences: HashMap<&'a str, Vec<&'a Booking>>,
}

/// Collapse a sequence of bookings for the given listing status.
///
/// The first booking in iteration order represents its recurring set, which
/// is not necessarily the earliest one in time.
pub fn group_recurring<'a, I>(bookings: I, status: ListingStatus) -> RecurrenceGroups<'a>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let mut grouper = RecurrenceGrouper::new(status);
    let shown = bookings
        .into_iter()
        .filter(|booking| grouper.admit(*booking))
        .collect();

    RecurrenceGroups {
        shown,
        occurrences: grouper.into_occurrences(),
    }
}

/// Rows of the main (non-"today") list for a listing status.
///
/// See [`RecurrenceGrouper::admit_row`].
pub fn filter_for_listing<'a, I>(
    bookings: I,
    status: ListingStatus,
    day: &CivilDay,
) -> RecurrenceGroups<'a>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let mut grouper = RecurrenceGrouper::new(status);
    let shown = bookings
        .into_iter()
        .filter(|booking| grouper.admit_row(*booking, day))
        .collect();

    RecurrenceGroups {
        shown,
        occurrences: grouper.into_occurrences(),
    }
}
