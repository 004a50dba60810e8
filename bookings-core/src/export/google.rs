//! Google Calendar "create event" link.

use crate::export::CalendarExport;

const EVENT_EDIT_URL: &str = "https://calendar.google.com/calendar/r/eventedit";

fn stamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Prefilled event form for the export.
pub fn google_calendar_link(export: &CalendarExport) -> String {
    let mut url = format!(
        "{}?dates={}/{}&text={}",
        EVENT_EDIT_URL,
        stamp(export.start_instant()),
        stamp(export.end_instant()),
        urlencoding::encode(&export.title)
    );

    if let Some(ref details) = export.description {
        url.push_str("&details=");
        url.push_str(&urlencoding::encode(details));
    }
    if let Some(ref location) = export.location {
        url.push_str("&location=");
        url.push_str(&urlencoding::encode(location));
    }
    if let Some(ref rule) = export.recurrence_rule {
        url.push_str("&recur=");
        url.push_str(&urlencoding::encode(rule));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportInput;
    use crate::recurrence::{Frequency, RecurringEvent};
    use chrono::{TimeZone, Utc};

    #[test]
    fn link_has_utc_range_and_escaped_fields() {
        let weekly = RecurringEvent {
            freq: Frequency::Weekly,
            interval: 1,
            count: Some(2),
            until: None,
        };
        let export = CalendarExport::encode(&ExportInput {
            uid: None,
            start: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            duration_minutes: 45,
            title: "Intro & demo",
            description: None,
            location: Some("Room 4"),
            recurrence: Some(&weekly),
        })
        .unwrap();

        assert_eq!(
            google_calendar_link(&export),
            "https://calendar.google.com/calendar/r/eventedit?dates=20240301T100000Z/20240301T104500Z\
             &text=Intro%20%26%20demo&location=Room%204&recur=RRULE%3AFREQ%3DWEEKLY%3BCOUNT%3D2%3BINTERVAL%3D1"
        );
    }
}
