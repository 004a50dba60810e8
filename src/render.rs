//! Colored terminal rendering for booking views.

use bookings_core::booking::{Booking, BookingStatus, RecurringInfo};
use bookings_core::format::format_time;
use bookings_core::listing::ListingStatus;
use bookings_core::presentation::PresentationState;
use bookings_core::viewer::TimeFormat;
use chrono_tz::Tz;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for PresentationState {
    fn render(&self) -> String {
        let label = self.as_str().replace('_', " ");
        match self {
            PresentationState::Scheduled => label.green().to_string(),
            PresentationState::NeedsConfirmation | PresentationState::Rerouted => {
                label.yellow().to_string()
            }
            PresentationState::Rescheduled => label.cyan().to_string(),
            PresentationState::Past => label.dimmed().to_string(),
            PresentationState::Cancelled | PresentationState::NotAttendingSeat => {
                label.red().to_string()
            }
        }
    }
}

impl Render for BookingStatus {
    fn render(&self) -> String {
        match self {
            BookingStatus::Pending => "unconfirmed".yellow().to_string(),
            BookingStatus::Accepted => String::new(),
            BookingStatus::Cancelled => "cancelled".red().to_string(),
            BookingStatus::Rejected => "rejected".red().to_string(),
        }
    }
}

/// Tab bar, with the active status highlighted.
pub fn render_tabs(active: ListingStatus) -> String {
    bookings_core::listing::VISIBLE_TABS
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.as_str()).bold().to_string()
            } else {
                tab.as_str().dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// One booking in the list: time range, title, status and recurrence.
pub fn render_row(
    booking: &Booking,
    recurring_info: Option<&RecurringInfo>,
    tz: Tz,
    format: TimeFormat,
    with_date: bool,
) -> String {
    let local = booking.start_time.with_timezone(&tz);
    let date = if with_date {
        format!("{} ", local.format("%a %b %-d"))
    } else {
        String::new()
    };
    let time = format!(
        "{}{} - {}",
        date,
        format_time(booking.start_time, tz, format),
        format_time(booking.end_time, tz, format)
    );

    let mut line = format!("  {:>22}  {}", time, booking.title);

    let status = booking.status.render();
    if !status.is_empty() {
        line.push_str(&format!(" {status}"));
    }

    if let Some(info) = recurring_info {
        let tag = match info.count {
            1 => "(1 occurrence)".to_string(),
            n => format!("({n} occurrences)"),
        };
        line.push_str(&format!(" {}", tag.dimmed()));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_renders_its_label() {
        for state in PresentationState::ALL {
            let rendered = state.render();
            assert!(rendered.contains(&state.as_str().replace('_', " ")), "{rendered}");
        }
    }

    #[test]
    fn accepted_bookings_have_no_badge() {
        assert!(BookingStatus::Accepted.render().is_empty());
        assert!(BookingStatus::Rejected.render().contains("rejected"));
    }

    #[test]
    fn tabs_list_visible_statuses() {
        let tabs = render_tabs(ListingStatus::Past);
        assert!(tabs.contains("upcoming"));
        assert!(tabs.contains("[past]"));
        assert!(tabs.contains("cancelled"));
        assert!(!tabs.contains("recurring"));
    }
}
