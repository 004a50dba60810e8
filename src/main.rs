mod commands;
mod input;
mod render;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bookings_core::config::{BookingsConfig, ConfigUpdate};
use bookings_core::listing::ListingStatus;
use bookings_core::presentation::DetailRequest;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bookings")]
#[command(about = "Inspect booking listings and booking details from exported query results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a bookings listing
    List {
        /// JSON file with the query result pages
        #[arg(short, long)]
        input: PathBuf,

        /// upcoming, recurring, past, cancelled or unconfirmed
        #[arg(short, long, default_value = "upcoming")]
        status: String,

        /// Time zone to render in (e.g. "Europe/Berlin")
        #[arg(long)]
        tz: Option<String>,

        /// Render as of this instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Show a single booking
    Show {
        /// JSON file with the booking and its event type
        #[arg(short, long)]
        input: PathBuf,

        /// Time zone to render in (e.g. "Europe/Berlin")
        #[arg(long)]
        tz: Option<String>,

        /// Seat reference the link was issued for
        #[arg(long)]
        seat: Option<String>,

        /// The booking was just rerouted
        #[arg(long)]
        rerouting: bool,

        /// Open with the cancellation form
        #[arg(long)]
        cancel: bool,

        /// Opened from the recurring tab
        #[arg(long)]
        all_remaining: bool,

        /// Report the host as a no-show
        #[arg(long)]
        no_show: bool,

        /// Rate the meeting (1-5)
        #[arg(long)]
        rating: Option<String>,

        /// Render as of this instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Write a booking as an .ics file
    Export {
        /// JSON file with the booking and its event type
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, defaults to a name derived from the event type
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the calendar payload as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Show configuration paths and settings, or change them
    Config {
        /// Time zone used when a viewer has none set
        #[arg(long)]
        timezone: Option<String>,

        /// Clock used when a viewer has no preference (12 or 24)
        #[arg(long)]
        time_format: Option<u8>,

        /// Bookings fetched per page
        #[arg(long)]
        page_size: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            input,
            status,
            tz,
            now,
        } => {
            let config = BookingsConfig::load()?;
            let status: ListingStatus = status.parse()?;
            let now = parse_now(now.as_deref())?;
            commands::list::run(&input, status, tz.as_deref(), now, &config).await
        }
        Commands::Show {
            input,
            tz,
            seat,
            rerouting,
            cancel,
            all_remaining,
            no_show,
            rating,
            now,
        } => {
            let config = BookingsConfig::load()?;
            let now = parse_now(now.as_deref())?;
            let request = DetailRequest {
                seat_reference_uid: seat,
                rerouting,
                cancellation_mode: cancel,
                all_remaining_bookings: all_remaining,
                no_show,
                rating,
            };
            commands::show::run(&input, request, tz.as_deref(), now, &config).await
        }
        Commands::Export {
            input,
            output,
            json,
        } => commands::export::run(&input, output, json).await,
        Commands::Config {
            timezone,
            time_format,
            page_size,
        } => {
            let config = BookingsConfig::load()?;
            let update = ConfigUpdate {
                default_timezone: timezone,
                time_format,
                page_size,
            };
            commands::config::run(config, update)
        }
    }
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now '{s}', expected RFC 3339"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
