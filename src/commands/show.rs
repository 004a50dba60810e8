use std::path::Path;

use anyhow::Result;
use bookings_core::config::BookingsConfig;
use bookings_core::export::{ExportInput, export_affordance, google_calendar_link};
use bookings_core::format::{OccurrenceList, format_occurrence};
use bookings_core::presentation::{BookingDetail, DetailRequest, TitleContext, confirmation_title, page_title_key};
use bookings_core::recurrence::every_freq_for;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

use crate::input::DetailInput;
use crate::render::Render;

pub async fn run(
    input: &Path,
    request: DetailRequest,
    tz: Option<&str>,
    now: DateTime<Utc>,
    config: &BookingsConfig,
) -> Result<()> {
    let detail_input = DetailInput::load(input).await?;
    let booking = &detail_input.booking;
    let event_type = &detail_input.event_type;
    let viewer = &detail_input.viewer;

    let tz = viewer.timezone(tz, config.default_timezone.as_deref());
    let format = viewer.time_format(config.time_format);

    let recurring_dates = detail_input.recurring_dates(tz);
    let detail = BookingDetail::derive(
        booking,
        event_type,
        recurring_dates.as_deref(),
        &request,
        now,
    );

    if let Some(feedback) = detail.feedback {
        println!("{}", "Feedback".bold());
        if feedback.no_show {
            println!("  Reported the host as a no-show");
        }
        println!("  Rating: {}/5", feedback.rating);
        return Ok(());
    }

    println!(
        "{} {}",
        page_title_key(detail.flags.needs_confirmation, detail.recurring).dimmed(),
        detail.state.render()
    );
    println!("{}", detail.headline_key.bold());

    let title = confirmation_title(&TitleContext {
        booking,
        event_type,
        viewer,
        profile_name: detail_input.profile_name.as_deref(),
        cancelled: detail.flags.cancelled,
        needs_confirmation: detail.flags.needs_confirmation,
        recurring: detail.recurring,
    });
    if let Some(title) = title {
        let params: Vec<String> = title.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        if params.is_empty() {
            println!("{}", title.key.dimmed());
        } else {
            println!("{} {}", title.key.dimmed(), params.join(", ").dimmed());
        }
    }
    println!();

    println!("  {:<8} {}", "What".bold(), booking.title);

    match recurring_dates.as_deref() {
        Some(dates) => {
            if let Some(ref pattern) = event_type.recurring_event {
                println!("  {:<8} {}", "Repeats".bold(), every_freq_for(pattern, Some(dates.len())));
            }
            let list = OccurrenceList::new(dates);
            let mut label = "When";
            for line in list.lines(detail.duration_minutes, tz, format) {
                println!("  {:<8} {}", label.bold(), line);
                label = "";
            }
            if let Some(more) = list.more_label() {
                println!("  {:<8} {}", "", more.dimmed());
            }
        }
        None => println!(
            "  {:<8} {}",
            "When".bold(),
            format_occurrence(booking.start_time, booking.end_time, tz, format)
        ),
    }

    if let Some(host) = booking.user.as_ref() {
        println!("  {:<8} {} <{}>", "Host".bold(), host.name.as_deref().unwrap_or(""), host.email);
    }
    for attendee in &booking.attendees {
        println!("  {:<8} {} <{}>", "Guest".bold(), attendee.name, attendee.email);
    }

    let export_input = detail_input.export_input();
    if let Some(location) = shown_location(&detail, &export_input) {
        println!("  {:<8} {}", "Where".bold(), location);
    }
    if let Some(ref reason) = detail.cancellation_reason {
        println!("  {:<8} {}", detail.reason_label.bold(), reason);
    }
    println!();

    if let Some(ref href) = detail.rescheduled_to_href {
        println!("  {} {}", "Rescheduled to".dimmed(), href);
    }
    if let Some(ref href) = detail.reschedule_href {
        println!("  {} {}", "Reschedule".dimmed(), href);
    }

    if let Some(links) = calendar_links(&detail, &export_input) {
        println!("  {} {}", "Google".dimmed(), links.google);
        println!("  {} {}", "ICS".dimmed(), links.ics);
    }

    println!("  {} {}", "Back".dimmed(), detail.back_href);

    Ok(())
}

/// Meeting location, hidden once the booking is cancelled.
fn shown_location<'a>(detail: &BookingDetail, export_input: &ExportInput<'a>) -> Option<&'a str> {
    export_input.location.filter(|_| !detail.flags.cancelled)
}

struct CalendarLinks {
    google: String,
    ics: String,
}

/// "Add to calendar" links, left out when the page doesn't offer them or the
/// occurrence can't be encoded.
fn calendar_links(detail: &BookingDetail, export_input: &ExportInput<'_>) -> Option<CalendarLinks> {
    if !detail.offers_add_to_calendar {
        return None;
    }

    let export = export_affordance(export_input)?;
    Some(CalendarLinks {
        google: google_calendar_link(&export),
        ics: export.data_uri(),
    })
}
