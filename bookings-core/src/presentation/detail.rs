//! State and actions of the booking detail (success) page.

use chrono::{DateTime, Utc};

use crate::booking::{Booking, BookingStatus, EventType};
use crate::presentation::feedback::Feedback;
use crate::presentation::state::{PresentationState, StatusFlags};

/// Query parameters the detail page was opened with.
#[derive(Debug, Clone, Default)]
pub struct DetailRequest {
    /// Seat the link was issued for
    pub seat_reference_uid: Option<String>,
    /// Opened after the routing form rerouted the booking (`cal.rerouting=true`)
    pub rerouting: bool,
    /// The cancellation form is open
    pub cancellation_mode: bool,
    /// Opened from the recurring tab, showing all remaining occurrences
    pub all_remaining_bookings: bool,
    pub no_show: bool,
    pub rating: Option<String>,
}

/// Derived view of one booking on its detail page.
#[derive(Debug, Clone)]
pub struct BookingDetail {
    pub flags: StatusFlags,
    pub state: PresentationState,
    pub headline_key: &'static str,
    pub recurring: bool,
    pub duration_minutes: i64,
    pub cancellation_reason: Option<String>,
    /// `reason` for cancelled bookings, `reschedule_reason` otherwise
    pub reason_label: &'static str,
    pub back_href: &'static str,
    pub reschedule_href: Option<String>,
    pub rescheduled_to_href: Option<String>,
    pub offers_add_to_calendar: bool,
    pub feedback: Option<Feedback>,
}

impl BookingDetail {
    /// Derive the detail state of `booking`.
    ///
    /// `recurring_bookings` are the start times of the recurring set, when the
    /// booking is part of one.
    pub fn derive(
        booking: &Booking,
        event_type: &EventType,
        recurring_bookings: Option<&[DateTime<Utc>]>,
        request: &DetailRequest,
        now: DateTime<Utc>,
    ) -> Self {
        let seat_reference = request.seat_reference_uid.as_deref();
        let seat_gone = seat_reference.is_some_and(|uid| !booking.holds_seat(uid));

        let flags = StatusFlags {
            needs_confirmation: booking.status == BookingStatus::Pending
                && event_type.requires_confirmation,
            cancelled: booking.status.is_cancelled() || seat_gone,
            seat_scoped: seat_reference.is_some(),
            rerouted: request.rerouting,
            rescheduled: booking.is_rescheduled(),
            past: booking.end_time < now,
        };
        let state = PresentationState::derive(&flags);
        let recurring = recurring_bookings.is_some();
        let duration_minutes = booking.duration_minutes();

        let show_reason = flags.cancelled || booking.status == BookingStatus::Accepted;
        let cancellation_reason = booking
            .cancellation_reason()
            .filter(|_| show_reason)
            .map(str::to_string);

        let reschedule_href = (!recurring && !flags.past && flags.reschedulable())
            .then(|| format!("/reschedule/{}", seat_reference.unwrap_or(&booking.uid)));

        BookingDetail {
            flags,
            state,
            headline_key: state.headline_key(recurring),
            recurring,
            duration_minutes,
            cancellation_reason,
            reason_label: if flags.cancelled { "reason" } else { "reschedule_reason" },
            back_href: if request.all_remaining_bookings {
                "/bookings/recurring"
            } else {
                "/bookings/upcoming"
            },
            reschedule_href,
            rescheduled_to_href: booking
                .rescheduled_to_uid
                .as_ref()
                .map(|uid| format!("/booking/{uid}")),
            offers_add_to_calendar: !flags.needs_confirmation
                && !request.cancellation_mode
                && flags.reschedulable()
                && duration_minutes > 0,
            feedback: Feedback::from_params(request.no_show, request.rating.as_deref()),
        }
    }

    pub fn is_feedback_mode(&self) -> bool {
        self.feedback.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::fixtures::booking;
    use crate::booking::SeatReference;
    use chrono::{Duration, TimeZone};

    fn event_type(requires_confirmation: bool) -> EventType {
        EventType {
            id: 1,
            title: "Consultation".into(),
            slug: "consultation".into(),
            description: None,
            length: 30,
            requires_confirmation,
            scheduling_type: None,
            recurring_event: None,
            owner_id: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn accepted_future_booking_is_scheduled_and_exportable() {
        let b = booking(1, None);
        let detail = BookingDetail::derive(&b, &event_type(false), None, &DetailRequest::default(), now());

        assert_eq!(detail.state, PresentationState::Scheduled);
        assert_eq!(detail.headline_key, "meeting_is_scheduled");
        assert!(detail.offers_add_to_calendar);
        assert_eq!(detail.reschedule_href.as_deref(), Some("/reschedule/uid-1"));
        assert_eq!(detail.back_href, "/bookings/upcoming");
        assert!(!detail.is_feedback_mode());
    }

    #[test]
    fn pending_booking_needing_confirmation_offers_no_export() {
        let mut b = booking(1, None);
        b.status = BookingStatus::Pending;
        // Already over: confirmation still takes precedence
        let detail = BookingDetail::derive(
            &b,
            &event_type(true),
            None,
            &DetailRequest::default(),
            b.end_time + Duration::days(1),
        );

        assert_eq!(detail.state, PresentationState::NeedsConfirmation);
        assert!(!detail.offers_add_to_calendar);
        assert!(detail.reschedule_href.is_none());
    }

    #[test]
    fn missing_seat_reference_means_not_attending() {
        let mut b = booking(1, None);
        b.seats_references = vec![SeatReference {
            reference_uid: "seat-a".into(),
        }];
        let request = DetailRequest {
            seat_reference_uid: Some("seat-b".into()),
            ..DetailRequest::default()
        };

        let detail = BookingDetail::derive(&b, &event_type(false), None, &request, now());

        assert_eq!(detail.state, PresentationState::NotAttendingSeat);
        assert!(!detail.flags.reschedulable());
        assert_eq!(detail.reason_label, "reason");
    }

    #[test]
    fn held_seat_reschedules_by_seat() {
        let mut b = booking(1, None);
        b.seats_references = vec![SeatReference {
            reference_uid: "seat-a".into(),
        }];
        let request = DetailRequest {
            seat_reference_uid: Some("seat-a".into()),
            ..DetailRequest::default()
        };

        let detail = BookingDetail::derive(&b, &event_type(false), None, &request, now());

        assert_eq!(detail.state, PresentationState::Scheduled);
        assert_eq!(detail.reschedule_href.as_deref(), Some("/reschedule/seat-a"));
    }

    #[test]
    fn rejected_booking_shows_rejection_reason() {
        let mut b = booking(1, None);
        b.status = BookingStatus::Rejected;
        b.rejection_reason = Some("Fully booked".into());

        let detail = BookingDetail::derive(&b, &event_type(false), None, &DetailRequest::default(), now());

        assert_eq!(detail.state, PresentationState::Cancelled);
        assert_eq!(detail.cancellation_reason.as_deref(), Some("Fully booked"));
        assert!(!detail.offers_add_to_calendar);
    }

    #[test]
    fn recurring_booking_has_no_single_reschedule_link() {
        let b = booking(1, Some("rec"));
        let dates = [b.start_time, b.start_time + Duration::weeks(1)];
        let request = DetailRequest {
            all_remaining_bookings: true,
            ..DetailRequest::default()
        };

        let detail = BookingDetail::derive(&b, &event_type(false), Some(&dates[..]), &request, now());

        assert!(detail.recurring);
        assert_eq!(detail.headline_key, "meeting_is_scheduled_recurring");
        assert!(detail.reschedule_href.is_none());
        assert_eq!(detail.back_href, "/bookings/recurring");
    }

    #[test]
    fn rescheduled_booking_links_forward() {
        let mut b = booking(1, None);
        b.status = BookingStatus::Cancelled;
        b.rescheduled = Some(true);
        b.rescheduled_to_uid = Some("new-uid".into());

        let detail = BookingDetail::derive(&b, &event_type(false), None, &DetailRequest::default(), now());

        assert_eq!(detail.state, PresentationState::Rescheduled);
        assert_eq!(detail.rescheduled_to_href.as_deref(), Some("/booking/new-uid"));
    }

    #[test]
    fn cancellation_mode_hides_export() {
        let b = booking(1, None);
        let request = DetailRequest {
            cancellation_mode: true,
            rating: Some("5".into()),
            ..DetailRequest::default()
        };

        let detail = BookingDetail::derive(&b, &event_type(false), None, &request, now());

        assert!(!detail.offers_add_to_calendar);
        assert_eq!(detail.feedback.map(|f| f.rating), Some(5));
    }
}
