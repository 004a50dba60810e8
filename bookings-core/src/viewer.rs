//! The signed-in viewer and their display preferences.
//!
//! Time zone and clock preferences are always passed in explicitly. The
//! resolution order is: explicit override, then the viewer's profile, then
//! the configured default, then the system zone, then UTC.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// 12 or 24 hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TimeFormat {
    Hour12,
    Hour24,
}

impl TryFrom<u8> for TimeFormat {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(TimeFormat::Hour12),
            24 => Ok(TimeFormat::Hour24),
            other => Err(format!("time format must be 12 or 24, got {other}")),
        }
    }
}

impl From<TimeFormat> for u8 {
    fn from(format: TimeFormat) -> Self {
        match format {
            TimeFormat::Hour12 => 12,
            TimeFormat::Hour24 => 24,
        }
    }
}

impl TimeFormat {
    pub fn is_24h(self) -> bool {
        self == TimeFormat::Hour24
    }
}

/// The "current user" context of a view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: Option<i64>,
    pub time_zone: Option<String>,
    pub time_format: Option<TimeFormat>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Viewer {
    /// Zone to render in: `explicit`, then the profile zone, then `fallback`, then the system zone.
    pub fn timezone(&self, explicit: Option<&str>, fallback: Option<&str>) -> Tz {
        resolve_timezone(&[explicit, self.time_zone.as_deref(), fallback])
    }

    /// Clock to render with: the profile preference, then `fallback`, then 12h.
    pub fn time_format(&self, fallback: Option<TimeFormat>) -> TimeFormat {
        self.time_format.or(fallback).unwrap_or(TimeFormat::Hour12)
    }
}

/// First candidate that names a known zone, else the system zone, else UTC.
///
/// Unknown names are skipped with a warning rather than failing the render.
pub fn resolve_timezone(candidates: &[Option<&str>]) -> Tz {
    for name in candidates.iter().flatten() {
        match parse_timezone(name) {
            Some(tz) => return tz,
            None => tracing::warn!(timezone = %name, "ignoring unknown time zone"),
        }
    }

    system_timezone()
}

/// Parse an IANA zone name. Empty strings are treated as unset.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    name.parse::<Tz>().ok()
}

/// Zone of the host system, UTC when it can't be determined.
pub fn system_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| parse_timezone(&name))
        .unwrap_or(chrono_tz::UTC)
}
