//! Human readable dates and times for occurrences.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::viewer::TimeFormat;

/// Occurrences listed before collapsing the rest into "+ N more".
pub const SHOWN_OCCURRENCES: usize = 4;

/// Clock time, e.g. "2:30pm" or "14:30".
pub fn format_time(instant: DateTime<Utc>, tz: Tz, format: TimeFormat) -> String {
    let local = instant.with_timezone(&tz);
    if format.is_24h() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%-I:%M%P").to_string()
    }
}

/// Full date, e.g. "Friday, March 1, 2024".
pub fn format_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%A, %B %-d, %Y").to_string()
}

/// Date, time range and zone of one occurrence.
pub fn format_occurrence(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
    format: TimeFormat,
) -> String {
    format!(
        "{} {} - {} ({})",
        format_date(start, tz),
        format_time(start, tz, format),
        format_time(end, tz, format),
        tz.name()
    )
}

/// Start times of a recurring set, as shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceList {
    pub shown: Vec<DateTime<Utc>>,
    pub more_count: usize,
}

impl OccurrenceList {
    pub fn new(dates: &[DateTime<Utc>]) -> Self {
        let mut sorted = dates.to_vec();
        sorted.sort();

        let more_count = sorted.len().saturating_sub(SHOWN_OCCURRENCES);
        sorted.truncate(SHOWN_OCCURRENCES);

        OccurrenceList {
            shown: sorted,
            more_count,
        }
    }

    /// "+ N more", when some occurrences are hidden.
    pub fn more_label(&self) -> Option<String> {
        (self.more_count > 0).then(|| format!("+ {} more", self.more_count))
    }

    /// One line per shown occurrence. An end that can't be represented
    /// collapses to the start.
    pub fn lines(&self, duration_minutes: i64, tz: Tz, format: TimeFormat) -> Vec<String> {
        let duration = TimeDelta::try_minutes(duration_minutes);

        self.shown
            .iter()
            .map(|&start| {
                let end = duration
                    .and_then(|d| start.checked_add_signed(d))
                    .unwrap_or(start);
                format_occurrence(start, end, tz, format)
            })
            .collect()
    }
}
