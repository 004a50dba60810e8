//! Recurrence rules of recurring event types.
//!
//! Builds iCalendar RRULE strings from an event type's recurrence pattern and
//! expands them into concrete occurrences in the viewer's time zone, so that
//! "every Monday at 9:00" stays at 9:00 local time across DST changes.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::error::{BookingsError, BookingsResult};

/// Upper bound on occurrences produced by a single expansion.
pub const MAX_OCCURRENCES: u16 = 730;

/// Repetition frequency, indexed like RFC 5545 / rrule (`YEARLY` = 0 ... `SECONDLY` = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrequencyRepr", rename_all = "UPPERCASE")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

/// Frequencies arrive either as rrule's numeric index or as the RFC name.
#[derive(Deserialize)]
#[serde(untagged)]
enum FrequencyRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<FrequencyRepr> for Frequency {
    type Error = String;

    fn try_from(repr: FrequencyRepr) -> Result<Self, Self::Error> {
        const ALL: [Frequency; 7] = [
            Frequency::Yearly,
            Frequency::Monthly,
            Frequency::Weekly,
            Frequency::Daily,
            Frequency::Hourly,
            Frequency::Minutely,
            Frequency::Secondly,
        ];

        match repr {
            FrequencyRepr::Index(i) => ALL
                .get(usize::from(i))
                .copied()
                .ok_or_else(|| format!("frequency index {i} out of range")),
            FrequencyRepr::Name(name) => ALL
                .into_iter()
                .find(|f| f.as_rrule_str().eq_ignore_ascii_case(&name))
                .ok_or_else(|| format!("unknown frequency '{name}'")),
        }
    }
}

impl Frequency {
    pub fn as_rrule_str(self) -> &'static str {
        match self {
            Frequency::Yearly => "YEARLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Daily => "DAILY",
            Frequency::Hourly => "HOURLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Secondly => "SECONDLY",
        }
    }

    /// Singular unit name, as used in "Every 2 weeks".
    fn unit(self) -> &'static str {
        match self {
            Frequency::Yearly => "year",
            Frequency::Monthly => "month",
            Frequency::Weekly => "week",
            Frequency::Daily => "day",
            Frequency::Hourly => "hour",
            Frequency::Minutely => "minute",
            Frequency::Secondly => "second",
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// Recurrence pattern of an event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringEvent {
    pub freq: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    pub count: Option<u32>,
    pub until: Option<DateTime<Utc>>,
}

impl RecurringEvent {
    /// Rule parts without the `RRULE:` prefix (the value of an RRULE property).
    pub fn rule_body(&self) -> String {
        let mut parts = vec![format!("FREQ={}", self.freq.as_rrule_str())];

        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }
        parts.push(format!("INTERVAL={}", self.interval));
        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
        }

        parts.join(";")
    }

    /// Full RRULE line, e.g. `RRULE:FREQ=WEEKLY;COUNT=5;INTERVAL=1`.
    pub fn to_rrule(&self) -> String {
        format!("RRULE:{}", self.rule_body())
    }

    /// Check that the rule is accepted by the rrule parser.
    pub fn validate(&self, start: DateTime<Utc>) -> BookingsResult<()> {
        self.rrule_set(start, chrono_tz::UTC).map(|_| ())
    }

    /// Expand into occurrence start times, repeating on the wall clock of `tz`.
    ///
    /// Yields at most [`MAX_OCCURRENCES`] instants, starting with `start` itself.
    pub fn expand(&self, start: DateTime<Utc>, tz: Tz) -> BookingsResult<Vec<DateTime<Utc>>> {
        let set = self.rrule_set(start, tz)?;
        let result = set.all(MAX_OCCURRENCES);

        Ok(result
            .dates
            .iter()
            .map(|dt| dt.with_timezone(&Utc))
            .collect())
    }

    fn rrule_set(&self, start: DateTime<Utc>, tz: Tz) -> BookingsResult<RRuleSet> {
        if self.interval == 0 {
            return Err(BookingsError::Recurrence(format!(
                "{}: interval must be at least 1",
                self.to_rrule()
            )));
        }

        let dtstart = if tz == chrono_tz::UTC {
            format!("DTSTART:{}", start.format("%Y%m%dT%H%M%SZ"))
        } else {
            format!(
                "DTSTART;TZID={}:{}",
                tz.name(),
                start.with_timezone(&tz).format("%Y%m%dT%H%M%S")
            )
        };

        format!("{}\n{}", dtstart, self.to_rrule())
            .parse::<RRuleSet>()
            .map_err(|e| BookingsError::Recurrence(format!("{}: {}", self.to_rrule(), e)))
    }
}

impl fmt::Display for RecurringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rrule())
    }
}

/// Human readable summary such as "Every 2 weeks for 5 occurrences".
///
/// `booked_count` (number of occurrences actually booked) takes precedence
/// over the pattern's own count.
pub fn every_freq_for(event: &RecurringEvent, booked_count: Option<usize>) -> String {
    let unit = event.freq.unit();
    let every = if event.interval > 1 {
        format!("Every {} {}s", event.interval, unit)
    } else {
        format!("Every {unit}")
    };

    match booked_count.or(event.count.map(|c| c as usize)) {
        Some(1) => format!("{every} for 1 occurrence"),
        Some(n) => format!("{every} for {n} occurrences"),
        None => every,
    }
}
