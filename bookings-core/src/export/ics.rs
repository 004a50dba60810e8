//! iCalendar rendering of a calendar export.

use icalendar::{Calendar, Component, EventLike};

use crate::export::CalendarExport;

const PRODID: &str = "PRODID:-//bookings//add-to-calendar//EN";

/// Render the export as a single-event VCALENDAR.
pub(crate) fn render(export: &CalendarExport) -> String {
    let mut cal = Calendar::new();

    let mut event = icalendar::Event::new();
    if let Some(ref uid) = export.uid {
        event.uid(uid);
    }
    event.summary(&export.title);

    event.add_property("DTSTART", export.start_instant().format("%Y%m%dT%H%M%SZ").to_string());
    event.add_property("DURATION", format!("PT{}M", export.duration_minutes));

    if let Some(ref desc) = export.description {
        event.description(desc);
    }

    if let Some(ref loc) = export.location {
        event.location(loc);
    }

    if let Some(ref rule) = export.recurrence_rule {
        event.add_property("RRULE", rule.trim_start_matches("RRULE:"));
    }

    cal.push(event.done());
    let cal = cal.done();

    tidy(&cal.to_string())
}

/// Use our own PRODID and drop CALSCALE:GREGORIAN (it's the default).
fn tidy(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
