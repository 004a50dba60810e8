use anyhow::Result;
use bookings_core::config::{BookingsConfig, ConfigUpdate};
use bookings_core::viewer::system_timezone;
use owo_colors::OwoColorize;

pub fn run(mut config: BookingsConfig, update: ConfigUpdate) -> Result<()> {
    let config_path = BookingsConfig::config_path()?;

    if !update.is_empty() {
        config.apply(update)?;
        config.save()?;
        println!("{} {}", "Saved".green(), config_path.display());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();

    println!("{}", "Settings".bold());
    match config.default_timezone.as_deref() {
        Some(tz) => println!("  Time zone:   {tz}"),
        None => println!(
            "  Time zone:   {} {}",
            system_timezone().name(),
            "(system)".dimmed()
        ),
    }
    match config.time_format {
        Some(format) => println!("  Time format: {}h", u8::from(format)),
        None => println!("  Time format: 12h {}", "(default)".dimmed()),
    }
    println!("  Page size:   {}", config.page_size);

    Ok(())
}
