//! "Add to calendar" payloads for a single occurrence.
//!
//! [`CalendarExport::encode`] validates and assembles the fields, the rest of
//! the module renders them: an iCalendar document behind a `data:` link, a
//! Google Calendar link, and a download file name.

pub mod filename;
pub mod google;
mod ics;

use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};
use serde::Serialize;

use crate::error::EncodingError;
use crate::recurrence::RecurringEvent;

pub use filename::download_filename;
pub use google::google_calendar_link;

/// One occurrence to export.
#[derive(Debug, Clone, Copy)]
pub struct ExportInput<'a> {
    pub uid: Option<&'a str>,
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
    pub title: &'a str,
    pub description: Option<&'a str>,
    /// Meeting URL or address
    pub location: Option<&'a str>,
    /// Recurrence pattern of the event type, if it repeats
    pub recurrence: Option<&'a RecurringEvent>,
}

/// Encoded calendar event.
///
/// `start` holds UTC `[year, month, day, hour, minute]` with a 1-based month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExport {
    pub start: [i32; 5],
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(skip)]
    pub uid: Option<String>,
    #[serde(skip)]
    start_instant: DateTime<Utc>,
    #[serde(skip)]
    end_instant: DateTime<Utc>,
}

impl CalendarExport {
    pub fn encode(input: &ExportInput<'_>) -> Result<Self, EncodingError> {
        if input.duration_minutes <= 0 {
            return Err(EncodingError::NonPositiveDuration(input.duration_minutes));
        }

        let title = input.title.trim();
        if title.is_empty() {
            return Err(EncodingError::EmptyTitle);
        }

        // DTSTART needs a four digit year
        let start = input.start;
        if !(0..=9999).contains(&start.year()) {
            return Err(EncodingError::StartOutOfRange(start));
        }

        let end = TimeDelta::try_minutes(input.duration_minutes)
            .and_then(|duration| start.checked_add_signed(duration))
            .filter(|end| end.year() <= 9999)
            .ok_or(EncodingError::EndOutOfRange {
                start,
                duration_minutes: input.duration_minutes,
            })?;

        let recurrence_rule = match input.recurrence {
            Some(rule) => {
                rule.validate(start)
                    .map_err(|e| EncodingError::InvalidRecurrenceRule {
                        rule: rule.to_rrule(),
                        reason: e.to_string(),
                    })?;
                Some(rule.to_rrule())
            }
            None => None,
        };

        Ok(CalendarExport {
            start: [
                start.year(),
                start.month() as i32,
                start.day() as i32,
                start.hour() as i32,
                start.minute() as i32,
            ],
            title: title.to_string(),
            description: non_empty(input.description),
            duration_minutes: input.duration_minutes,
            location: non_empty(input.location),
            recurrence_rule,
            uid: non_empty(input.uid),
            start_instant: start,
            end_instant: end,
        })
    }

    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start_instant
    }

    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end_instant
    }

    pub fn to_ics(&self) -> String {
        ics::render(self)
    }

    /// `data:text/calendar,` link with the percent-escaped iCalendar document.
    pub fn data_uri(&self) -> String {
        format!("data:text/calendar,{}", urlencoding::encode(&self.to_ics()))
    }
}

/// Export behind the "add to calendar" button, `None` when the occurrence
/// can't be encoded and the button is left out.
pub fn export_affordance(input: &ExportInput<'_>) -> Option<CalendarExport> {
    match CalendarExport::encode(input) {
        Ok(export) => Some(export),
        Err(e) => {
            tracing::warn!(title = %input.title, error = %e, "omitting calendar export");
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
