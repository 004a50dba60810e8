//! Status filter of the bookings listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BookingsError;

/// Which bookings a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Upcoming,
    Recurring,
    Past,
    Cancelled,
    Unconfirmed,
}

/// Tabs shown above the listing. `recurring` and `unconfirmed` are reachable by URL only.
pub const VISIBLE_TABS: [ListingStatus; 3] = [
    ListingStatus::Upcoming,
    ListingStatus::Past,
    ListingStatus::Cancelled,
];

impl ListingStatus {
    pub const ALL: [ListingStatus; 5] = [
        ListingStatus::Upcoming,
        ListingStatus::Recurring,
        ListingStatus::Past,
        ListingStatus::Cancelled,
        ListingStatus::Unconfirmed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Upcoming => "upcoming",
            ListingStatus::Recurring => "recurring",
            ListingStatus::Past => "past",
            ListingStatus::Cancelled => "cancelled",
            ListingStatus::Unconfirmed => "unconfirmed",
        }
    }

    /// Whether occurrences of one recurring set collapse into a single row.
    pub fn collapses_recurring(self) -> bool {
        matches!(
            self,
            ListingStatus::Recurring | ListingStatus::Unconfirmed | ListingStatus::Cancelled
        )
    }

    /// Translation key describing this listing (used in the empty state).
    pub fn description_key(self) -> &'static str {
        match self {
            ListingStatus::Upcoming => "upcoming_bookings",
            ListingStatus::Recurring => "recurring_bookings",
            ListingStatus::Past => "past_bookings",
            ListingStatus::Cancelled => "cancelled_bookings",
            ListingStatus::Unconfirmed => "unconfirmed_bookings",
        }
    }

    pub fn href(self) -> String {
        format!("/bookings/{}", self.as_str())
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = BookingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BookingsError::UnknownStatus(s.to_string()))
    }
}
