//! Title keys of the booking confirmation page.

use crate::booking::{Booking, EventType};
use crate::viewer::Viewer;

const NAMELESS: &str = "Nameless";

/// A translation key with its interpolation values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleKey {
    pub key: String,
    pub params: Vec<(&'static str, String)>,
}

impl TitleKey {
    fn new(key: impl Into<String>) -> Self {
        TitleKey {
            key: key.into(),
            params: Vec::new(),
        }
    }

    fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Document title: `booking_submitted` / `booking_confirmed`, with `_recurring` suffix.
pub fn page_title_key(needs_confirmation: bool, recurring: bool) -> String {
    format!(
        "booking_{}{}",
        if needs_confirmation { "submitted" } else { "confirmed" },
        if recurring { "_recurring" } else { "" }
    )
}

/// Inputs of [`confirmation_title`].
#[derive(Debug, Clone, Copy)]
pub struct TitleContext<'a> {
    pub booking: &'a Booking,
    pub event_type: &'a EventType,
    pub viewer: &'a Viewer,
    /// Display name of the booking page owner
    pub profile_name: Option<&'a str>,
    pub cancelled: bool,
    pub needs_confirmation: bool,
    pub recurring: bool,
}

/// Subtitle telling who was emailed. `None` for cancelled bookings.
pub fn confirmation_title(ctx: &TitleContext<'_>) -> Option<TitleKey> {
    if ctx.cancelled {
        return None;
    }

    let suffix = if ctx.recurring { "_recurring" } else { "" };

    if ctx.needs_confirmation {
        return Some(match ctx.profile_name {
            Some(name) => TitleKey::new(format!("user_needs_to_confirm_or_reject_booking{suffix}"))
                .with("user", name),
            None => TitleKey::new(format!("needs_to_be_confirmed_or_rejected{suffix}")),
        });
    }

    let Some(host) = ctx.booking.user.as_ref() else {
        return Some(TitleKey::new(format!("emailed_you_and_attendees{suffix}")));
    };

    let prefix = if ctx.event_type.is_round_robin() { "round_robin_" } else { "" };
    let is_host = ctx.viewer.id == Some(host.id);
    let is_attendee = ctx
        .viewer
        .email
        .as_deref()
        .is_some_and(|email| ctx.booking.attendee_by_email(email).is_some());

    let attendee = ctx
        .booking
        .attendees
        .first()
        .map(|a| if a.name.is_empty() { a.email.as_str() } else { a.name.as_str() })
        .filter(|name| !name.is_empty())
        .unwrap_or(NAMELESS);
    let host_name = host.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&host.email);

    let title = if is_host {
        TitleKey::new(format!("{prefix}emailed_you_and_attendees{suffix}")).with("user", attendee)
    } else if is_attendee {
        TitleKey::new(format!("{prefix}emailed_you_and_attendees{suffix}")).with("user", host_name)
    } else {
        TitleKey::new(format!("{prefix}emailed_host_and_attendee{suffix}"))
            .with("host", host_name)
            .with("attendee", attendee)
    };

    Some(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::fixtures::booking;
    use crate::booking::{Attendee, Organizer, SchedulingType};

    fn event_type() -> EventType {
        EventType {
            id: 1,
            title: "Intro call".into(),
            slug: "intro".into(),
            description: None,
            length: 30,
            requires_confirmation: false,
            scheduling_type: None,
            recurring_event: None,
            owner_id: Some(10),
        }
    }

    fn hosted_booking() -> Booking {
        let mut b = booking(1, None);
        b.user = Some(Organizer {
            id: 10,
            name: Some("Hana Host".into()),
            email: "host@example.com".into(),
            time_zone: None,
        });
        b.attendees = vec![Attendee {
            name: "Ari Attendee".into(),
            email: "ari@example.com".into(),
            phone_number: None,
            time_zone: None,
        }];
        b
    }

    fn ctx<'a>(booking: &'a Booking, event_type: &'a EventType, viewer: &'a Viewer) -> TitleContext<'a> {
        TitleContext {
            booking,
            event_type,
            viewer,
            profile_name: Some("Hana Host"),
            cancelled: false,
            needs_confirmation: false,
            recurring: false,
        }
    }

    #[test]
    fn page_title_variants() {
        assert_eq!(page_title_key(true, false), "booking_submitted");
        assert_eq!(page_title_key(false, true), "booking_confirmed_recurring");
    }

    #[test]
    fn cancelled_has_no_title() {
        let (b, et, v) = (hosted_booking(), event_type(), Viewer::default());
        let mut c = ctx(&b, &et, &v);
        c.cancelled = true;
        assert_eq!(confirmation_title(&c), None);
    }

    #[test]
    fn needs_confirmation_names_the_profile() {
        let (b, et, v) = (hosted_booking(), event_type(), Viewer::default());
        let mut c = ctx(&b, &et, &v);
        c.needs_confirmation = true;
        c.recurring = true;

        let title = confirmation_title(&c).unwrap();
        assert_eq!(title.key, "user_needs_to_confirm_or_reject_booking_recurring");
        assert_eq!(title.param("user"), Some("Hana Host"));

        c.profile_name = None;
        assert_eq!(confirmation_title(&c).unwrap().key, "needs_to_be_confirmed_or_rejected_recurring");
    }

    #[test]
    fn host_sees_attendee_name() {
        let (b, et) = (hosted_booking(), event_type());
        let v = Viewer {
            id: Some(10),
            ..Viewer::default()
        };

        let title = confirmation_title(&ctx(&b, &et, &v)).unwrap();
        assert_eq!(title.key, "emailed_you_and_attendees");
        assert_eq!(title.param("user"), Some("Ari Attendee"));
    }

    #[test]
    fn attendee_sees_host_name_with_round_robin_prefix() {
        let b = hosted_booking();
        let mut et = event_type();
        et.scheduling_type = Some(SchedulingType::RoundRobin);
        let v = Viewer {
            email: Some("ari@example.com".into()),
            ..Viewer::default()
        };

        let title = confirmation_title(&ctx(&b, &et, &v)).unwrap();
        assert_eq!(title.key, "round_robin_emailed_you_and_attendees");
        assert_eq!(title.param("user"), Some("Hana Host"));
    }

    #[test]
    fn stranger_sees_host_and_attendee() {
        let (mut b, et, v) = (hosted_booking(), event_type(), Viewer::default());
        b.attendees[0].name.clear();

        let title = confirmation_title(&ctx(&b, &et, &v)).unwrap();
        assert_eq!(title.key, "emailed_host_and_attendee");
        assert_eq!(title.param("host"), Some("Hana Host"));
        assert_eq!(title.param("attendee"), Some("ari@example.com"));
    }

    #[test]
    fn without_host_falls_back() {
        let (et, v) = (event_type(), Viewer::default());
        let b = booking(1, None);
        assert_eq!(confirmation_title(&ctx(&b, &et, &v)).unwrap().key, "emailed_you_and_attendees");
    }
}
