//! The bookings listing: status filters, recurring grouping and the "today" section.

pub mod grouping;
pub mod status;
pub mod today;
pub mod view;

pub use grouping::{RecurrenceGrouper, RecurrenceGroups, filter_for_listing, group_recurring};
pub use status::{ListingStatus, VISIBLE_TABS};
pub use today::{CivilDay, DisplayBucket, TodayEntry, bookings_today};
pub use view::{EmptyState, ListingRow, ListingView, empty_state};
