use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bookings_core::export::{CalendarExport, download_filename};
use owo_colors::OwoColorize;

use crate::input::{DetailInput, expand_path};

pub async fn run(input: &Path, output: Option<PathBuf>, json: bool) -> Result<()> {
    let detail = DetailInput::load(input).await?;
    let export = CalendarExport::encode(&detail.export_input())
        .with_context(|| format!("Booking {} cannot be exported", detail.booking.uid))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    let path = match output {
        Some(path) => expand_path(&path),
        None => PathBuf::from(download_filename(&detail.event_type.title)),
    };

    tokio::fs::write(&path, export.to_ics())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} {}", "Wrote".green(), path.display());

    Ok(())
}
