use slug::slugify;

/// File name for a downloaded `.ics`, e.g. `intro-call.ics`.
pub fn download_filename(title: &str) -> String {
    let base = slugify(title);
    if base.is_empty() {
        return "event.ics".to_string();
    }
    format!("{base}.ics")
}
