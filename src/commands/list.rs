use std::path::Path;

use anyhow::Result;
use bookings_core::config::BookingsConfig;
use bookings_core::listing::{CivilDay, ListingStatus, ListingView, empty_state};
use bookings_core::pagination::{FetchOutcome, Paginator};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

use crate::input::ListingInput;
use crate::render::{render_row, render_tabs};
use crate::source::RecordedPages;

pub async fn run(
    input: &Path,
    status: ListingStatus,
    tz: Option<&str>,
    now: DateTime<Utc>,
    config: &BookingsConfig,
) -> Result<()> {
    let (viewer, pages) = ListingInput::load(input).await?.into_parts();

    let mut paginator = Paginator::new(RecordedPages::new(pages), config.page_size);
    let outcome = paginator.fetch_all().await;
    tracing::debug!(?outcome, pages = paginator.pages().len(), "finished loading pages");

    let notice = paginator.error_notice().map(str::to_string);
    let load_more = paginator.load_more_label();
    let pages = paginator.into_pages();

    let tz = viewer.timezone(tz, config.default_timezone.as_deref());
    let format = viewer.time_format(config.time_format);
    let day = CivilDay::new(now, tz);

    println!("{}", render_tabs(status));
    println!();

    if let Some(empty) = empty_state(&pages, status) {
        println!("{}", empty.headline_key.replace("status", status.as_str()).bold());
        println!("{}", empty.description_key.dimmed());
        print_notice(notice.as_deref());
        return Ok(());
    }

    let view = ListingView::build(&pages, status, &day);

    if view.shows_today() {
        println!("{} {}", "Today".bold(), day.key().dimmed());
        for entry in &view.today {
            println!("{}", render_row(entry.booking, entry.recurring_info, tz, format, false));
        }
        println!();
    }

    let mut rows = view.rows().peekable();
    if rows.peek().is_some() {
        if view.shows_today() {
            println!("{}", "Next".bold());
        }
        for row in rows {
            let mut line = render_row(row.booking, row.recurring_info, tz, format, true);
            if status.collapses_recurring() && row.booking.recurring_key().is_some() {
                let shown = view.occurrences_of(row.booking).len();
                if shown > 1 {
                    line.push_str(&format!(" {}", format!("[{shown} listed]").dimmed()));
                }
            }
            println!("{line}");
        }
    }

    println!();
    match outcome {
        FetchOutcome::Failed => print_notice(notice.as_deref()),
        _ => println!("{}", load_more.dimmed()),
    }

    Ok(())
}

fn print_notice(notice: Option<&str>) {
    if let Some(message) = notice {
        eprintln!("{} {}", "!".yellow(), message.yellow());
    }
}
