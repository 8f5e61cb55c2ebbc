use chrono::DateTime;

use tera::Tera;

use crate::config::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE, TEMPLATE_GLOB};
use crate::error::AppError;

/// Initialize the Tera template engine
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::new(TEMPLATE_GLOB)?;

    // Add custom filters
    tera.register_filter("timefmt", timefmt_filter);
    tera.register_filter("duration", duration_filter);

    Ok(tera)
}

/// Format an RFC 3339 timestamp as a wall-clock time (e.g., "14:03:27 UTC")
fn timefmt_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("timefmt filter expects a string"))?;

    match DateTime::parse_from_rfc3339(date_str) {
        Ok(date) => Ok(tera::Value::String(
            date.format("%H:%M:%S UTC").to_string(),
        )),
        // If parsing fails, return the original string
        Err(_) => Ok(tera::Value::String(date_str.to_string())),
    }
}

/// Format a duration in whole seconds as a compact human-readable string
/// (e.g., "1h 2m 3s", "5m 0s", "42s")
fn duration_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let seconds = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("duration filter expects a number"))?;

    Ok(tera::Value::String(format_duration(seconds)))
}

fn format_duration(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
