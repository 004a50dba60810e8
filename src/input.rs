//! JSON inputs read by the CLI: exported query results and booking details.

use std::path::Path;

use anyhow::{Context, Result};
use bookings_core::booking::{Booking, EventType, Page};
use bookings_core::export::ExportInput;
use bookings_core::viewer::Viewer;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Expand `~` in a user supplied path.
pub fn expand_path(path: &Path) -> std::path::PathBuf {
    shellexpand::tilde(&path.to_string_lossy()).into_owned().into()
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let path = expand_path(path);
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Paginated bookings query results, in fetch order.
///
/// Either a bare array of pages or an object that also carries the viewer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListingInput {
    Pages(Vec<Page>),
    WithViewer {
        #[serde(default)]
        viewer: Viewer,
        pages: Vec<Page>,
    },
}

impl ListingInput {
    pub async fn load(path: &Path) -> Result<Self> {
        read_json(path).await
    }

    pub fn into_parts(self) -> (Viewer, Vec<Page>) {
        match self {
            ListingInput::Pages(pages) => (Viewer::default(), pages),
            ListingInput::WithViewer { viewer, pages } => (viewer, pages),
        }
    }
}

/// Everything the booking detail page is rendered from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailInput {
    pub booking: Booking,
    pub event_type: EventType,
    /// Start times of the whole recurring set
    pub recurring_bookings: Option<Vec<DateTime<Utc>>>,
    #[serde(default)]
    pub viewer: Viewer,
    /// Display name of the booking page owner
    pub profile_name: Option<String>,
}

impl DetailInput {
    pub async fn load(path: &Path) -> Result<Self> {
        read_json(path).await
    }

    /// Start times of the recurring set, expanded from the event type's
    /// pattern when the input doesn't list them.
    pub fn recurring_dates(&self, tz: Tz) -> Option<Vec<DateTime<Utc>>> {
        if let Some(ref dates) = self.recurring_bookings {
            return Some(dates.clone());
        }

        self.booking.recurring_key()?;
        let pattern = self.event_type.recurring_event.as_ref()?;

        match pattern.expand(self.booking.start_time, tz) {
            Ok(dates) => Some(dates),
            Err(e) => {
                tracing::warn!(error = %e, "could not expand recurring booking");
                None
            }
        }
    }

    /// The occurrence as offered through "add to calendar".
    pub fn export_input(&self) -> ExportInput<'_> {
        let booking = &self.booking;
        let title = if booking.title.trim().is_empty() {
            &self.event_type.title
        } else {
            &booking.title
        };

        ExportInput {
            uid: Some(booking.uid.as_str()).filter(|uid| !uid.is_empty()),
            start: booking.start_time,
            duration_minutes: booking.duration_minutes(),
            title,
            description: booking
                .description
                .as_deref()
                .or(self.event_type.description.as_deref()),
            location: booking
                .video_call_url()
                .or(booking.reschedule_location())
                .or(booking.location.as_deref()),
            recurrence: booking
                .recurring_key()
                .and(self.event_type.recurring_event.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOKING: &str = r#"{
        "id": 7,
        "uid": "abc",
        "title": "Intro call",
        "startTime": "2024-03-01T10:00:00Z",
        "endTime": "2024-03-01T10:30:00Z",
        "status": "ACCEPTED"
    }"#;

    #[tokio::test]
    async fn loads_bare_page_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        std::fs::write(
            &path,
            format!(r#"[{{"bookings": [{BOOKING}], "recurringInfo": [], "nextCursor": null}}]"#),
        )
        .unwrap();

        let (viewer, pages) = ListingInput::load(&path).await.unwrap().into_parts();

        assert_eq!(viewer, Viewer::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].bookings[0].uid, "abc");
    }

    #[tokio::test]
    async fn loads_pages_with_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        std::fs::write(
            &path,
            r#"{"viewer": {"timeZone": "Asia/Tokyo", "timeFormat": 24}, "pages": [{"bookings": []}]}"#,
        )
        .unwrap();

        let (viewer, pages) = ListingInput::load(&path).await.unwrap().into_parts();

        assert_eq!(viewer.time_zone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn loads_detail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.json");
        std::fs::write(
            &path,
            format!(
                r#"{{
                    "booking": {BOOKING},
                    "eventType": {{"id": 1, "title": "Intro call", "slug": "intro", "length": 30}},
                    "profileName": "Hana"
                }}"#
            ),
        )
        .unwrap();

        let detail = DetailInput::load(&path).await.unwrap();

        assert_eq!(detail.booking.id, 7);
        assert_eq!(detail.event_type.slug, "intro");
        assert!(detail.recurring_bookings.is_none());
        assert_eq!(detail.profile_name.as_deref(), Some("Hana"));
    }

    #[tokio::test]
    async fn recurring_detail_exports_the_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.json");
        std::fs::write(
            &path,
            r#"{
                "booking": {
                    "id": 8, "uid": "rec-1", "title": "",
                    "startTime": "2024-03-04T15:00:00Z", "endTime": "2024-03-04T15:45:00Z",
                    "status": "accepted", "recurringEventId": "series-1",
                    "metadata": {"videoCallUrl": "https://meet.example.com/x"}
                },
                "eventType": {
                    "id": 2, "title": "Weekly sync", "length": 45,
                    "recurringEvent": {"freq": 2, "interval": 1, "count": 3}
                }
            }"#,
        )
        .unwrap();

        let detail = DetailInput::load(&path).await.unwrap();
        let input = detail.export_input();

        assert_eq!(input.title, "Weekly sync");
        assert_eq!(input.duration_minutes, 45);
        assert_eq!(input.location, Some("https://meet.example.com/x"));
        assert!(input.recurrence.is_some());

        let dates = detail.recurring_dates(chrono_tz::UTC).unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[2], "2024-03-18T15:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = DetailInput::load(Path::new("/nonexistent/detail.json")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/detail.json"));
    }
}
