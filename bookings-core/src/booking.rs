//! Booking records as delivered by the bookings query.
//!
//! These types mirror the wire shape of the paginated bookings query
//! (`{ bookings, recurringInfo, nextCursor }`). They are read-only views:
//! nothing in this crate mutates a booking, it only derives display state
//! from it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::recurrence::RecurringEvent;

/// Opaque pagination cursor handed back by the query.
pub type Cursor = u64;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "ACCEPTED")]
    Accepted,
    #[serde(alias = "CANCELLED")]
    Cancelled,
    #[serde(alias = "REJECTED")]
    Rejected,
}

impl BookingStatus {
    /// Cancelled or rejected outright.
    pub fn is_cancelled(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Rejected)
    }
}

/// A scheduled occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,

    /// Links sibling occurrences of a recurring booking
    pub recurring_event_id: Option<String>,
    /// Seat the current link was issued for (seated events only)
    pub seat_reference_uid: Option<String>,
    /// Seats still held on this booking
    #[serde(default)]
    pub seats_references: Vec<SeatReference>,

    /// Free-form answers to booking questions
    #[serde(default)]
    pub responses: serde_json::Map<String, Value>,

    /// Organizer
    pub user: Option<Organizer>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    pub payment: Option<Payment>,

    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub metadata: BookingMetadata,

    pub cancellation_reason: Option<String>,
    pub rejection_reason: Option<String>,

    /// Set once this booking was moved to a new slot
    pub rescheduled: Option<bool>,
    /// Replacement booking, when rescheduled
    pub rescheduled_to_uid: Option<String>,
}

impl Booking {
    /// The recurring set this booking belongs to. Empty ids count as "not recurring".
    pub fn recurring_key(&self) -> Option<&str> {
        self.recurring_event_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// Length of the booking in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether the given seat reference is still held on this booking.
    pub fn holds_seat(&self, reference_uid: &str) -> bool {
        self.seats_references
            .iter()
            .any(|r| r.reference_uid == reference_uid)
    }

    /// Video call URL stored in the booking metadata, if any.
    pub fn video_call_url(&self) -> Option<&str> {
        self.metadata.video_call_url.as_deref()
    }

    /// Location picked in the booking form when rescheduling (`responses.location.optionValue`).
    pub fn reschedule_location(&self) -> Option<&str> {
        self.responses
            .get("location")
            .and_then(|loc| loc.get("optionValue"))
            .and_then(Value::as_str)
    }

    /// Cancellation reason, falling back to the rejection reason.
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason
            .as_deref()
            .filter(|r| !r.is_empty())
            .or(self.rejection_reason.as_deref().filter(|r| !r.is_empty()))
    }

    /// Whether this booking was replaced by another one.
    pub fn is_rescheduled(&self) -> bool {
        self.rescheduled == Some(true) || self.rescheduled_to_uid.is_some()
    }

    pub fn attendee_by_email(&self, email: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.email == email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingMetadata {
    pub video_call_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatReference {
    pub reference_uid: String,
}

/// A booking attendee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// IANA zone the attendee booked from
    pub time_zone: Option<String>,
}

/// The host of a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub paid: bool,
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

/// Aggregate over one recurring set, as reported alongside a page of bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringInfo {
    pub recurring_event_id: Option<String>,
    #[serde(default)]
    pub count: u32,
    pub first_date: Option<DateTime<Utc>>,
    /// Occurrence start times keyed by event type
    #[serde(default)]
    pub bookings: BTreeMap<String, Vec<DateTime<Utc>>>,
}

impl RecurringInfo {
    fn matches(&self, key: &str) -> bool {
        self.recurring_event_id.as_deref() == Some(key)
    }

    /// All occurrence start times across event types, in ascending order.
    pub fn occurrences(&self) -> Vec<DateTime<Utc>> {
        let mut dates: Vec<_> = self.bookings.values().flatten().copied().collect();
        dates.sort();
        dates
    }
}

/// One page of the bookings query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default, deserialize_with = "lenient_recurring_info")]
    pub recurring_info: Vec<RecurringInfo>,
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// First `RecurringInfo` matching the booking's recurring set.
    pub fn recurring_info_for(&self, booking: &Booking) -> Option<&RecurringInfo> {
        let key = booking.recurring_key()?;
        self.recurring_info.iter().find(|info| info.matches(key))
    }

    /// Last `RecurringInfo` matching the booking's recurring set.
    ///
    /// The "today" section scans every candidate and keeps the last one.
    pub fn last_recurring_info_for(&self, booking: &Booking) -> Option<&RecurringInfo> {
        let key = booking.recurring_key()?;
        self.recurring_info.iter().rev().find(|info| info.matches(key))
    }
}

/// Drop `recurringInfo` entries that don't match the expected shape instead of
/// failing the whole page; a missing entry just means "no recurrence".
fn lenient_recurring_info<'de, D>(deserializer: D) -> Result<Vec<RecurringInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed recurringInfo entry");
                None
            }
        })
        .collect())
}

/// How bookings of an event type get assigned to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulingType {
    RoundRobin,
    Collective,
    Managed,
}

/// The event type a booking was made against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub description: Option<String>,
    /// Default length in minutes
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub requires_confirmation: bool,
    pub scheduling_type: Option<SchedulingType>,
    pub recurring_event: Option<RecurringEvent>,
    pub owner_id: Option<i64>,
}

impl EventType {
    pub fn is_round_robin(&self) -> bool {
        self.scheduling_type == Some(SchedulingType::RoundRobin)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn empty_recurring_event_id_is_not_recurring() {
        assert_eq!(booking(1, Some("")).recurring_key(), None);
        assert_eq!(booking(1, None).recurring_key(), None);
        assert_eq!(booking(1, Some("abc")).recurring_key(), Some("abc"));
    }

    #[test]
    fn page_deserializes_wire_shape() {
        let json = r#"{
            "bookings": [{
                "id": 7,
                "uid": "u7",
                "startTime": "2024-03-01T10:00:00Z",
                "endTime": "2024-03-01T10:45:00Z",
                "status": "ACCEPTED",
                "recurringEventId": "rec-1",
                "attendees": [{ "name": "Ada", "email": "ada@example.com", "timeZone": "Europe/London" }]
            }],
            "recurringInfo": [
                { "recurringEventId": "rec-1", "count": 4, "bookings": { "1": ["2024-03-01T10:00:00Z"] } },
                { "recurringEventId": "rec-2", "count": "not a number" }
            ],
            "nextCursor": 10
        }"#;

        let page: Page = serde_json::from_str(json).unwrap();

        assert_eq!(page.bookings.len(), 1);
        assert_eq!(page.bookings[0].status, BookingStatus::Accepted);
        assert_eq!(page.bookings[0].duration_minutes(), 45);
        assert_eq!(page.next_cursor, Some(10));
        // The malformed entry is dropped, not fatal
        assert_eq!(page.recurring_info.len(), 1);
        assert_eq!(page.recurring_info_for(&page.bookings[0]).unwrap().count, 4);
    }

    #[test]
    fn recurring_info_lookup_first_and_last() {
        let page = Page {
            bookings: vec![booking(1, Some("rec"))],
            recurring_info: vec![info("rec", 2), info("other", 9), info("rec", 5)],
            next_cursor: None,
        };
        let b = &page.bookings[0];

        assert_eq!(page.recurring_info_for(b).unwrap().count, 2);
        assert_eq!(page.last_recurring_info_for(b).unwrap().count, 5);
    }

    #[test]
    fn recurring_info_lookup_ignores_non_recurring_booking() {
        let mut orphan = info("x", 1);
        orphan.recurring_event_id = None;
        let page = Page {
            bookings: vec![booking(1, None)],
            recurring_info: vec![orphan],
            next_cursor: None,
        };

        assert!(page.recurring_info_for(&page.bookings[0]).is_none());
        assert!(page.last_recurring_info_for(&page.bookings[0]).is_none());
    }

    #[test]
    fn cancellation_reason_falls_back_to_rejection() {
        let mut b = booking(1, None);
        b.rejection_reason = Some("double booked".into());
        assert_eq!(b.cancellation_reason(), Some("double booked"));

        b.cancellation_reason = Some("sick".into());
        assert_eq!(b.cancellation_reason(), Some("sick"));
    }

    #[test]
    fn reschedule_location_reads_option_value() {
        let mut b = booking(1, None);
        b.responses.insert(
            "location".into(),
            serde_json::json!({ "value": "phone", "optionValue": "+1 555 0100" }),
        );
        assert_eq!(b.reschedule_location(), Some("+1 555 0100"));
    }
}
