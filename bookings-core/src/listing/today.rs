//! "Today" bucketing of upcoming bookings.
//!
//! Days follow the viewer's civil calendar: two instants share a day when
//! they format to the same `YYYY-MM-DD` in the viewer's zone, regardless of
//! how far apart they are in UTC.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::booking::{Booking, Page, RecurringInfo};

/// Partition label of a booking within one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBucket {
    Today,
    Other,
}

/// The viewer's current civil day.
#[derive(Debug, Clone)]
pub struct CivilDay {
    tz: Tz,
    key: String,
}

impl CivilDay {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        CivilDay {
            tz,
            key: day_key(now, tz),
        }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// `YYYY-MM-DD` of this day.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        day_key(instant, self.tz) == self.key
    }

    pub fn bucket(&self, booking: &Booking) -> DisplayBucket {
        if self.contains(booking.start_time) {
            DisplayBucket::Today
        } else {
            DisplayBucket::Other
        }
    }
}

/// Calendar date of `instant` in `tz`, formatted `YYYY-MM-DD`.
pub fn day_key(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// A booking in the "today" section together with its recurrence aggregate.
#[derive(Debug, Clone, Copy)]
pub struct TodayEntry<'a> {
    pub booking: &'a Booking,
    pub recurring_info: Option<&'a RecurringInfo>,
}

/// Bookings of the first page that start on the viewer's current day.
///
/// Later pages are never scanned. Each entry carries the last matching
/// `RecurringInfo` of its page.
pub fn bookings_today<'a>(pages: &'a [Page], day: &CivilDay) -> Vec<TodayEntry<'a>> {
    let Some(first) = pages.first() else {
        return Vec::new();
    };

    first
        .bookings
        .iter()
        .filter(|booking| day.bucket(booking) == DisplayBucket::Today)
        .map(|booking| TodayEntry {
            booking,
            recurring_info: first.last_recurring_info_for(booking),
        })
        .collect()
}
