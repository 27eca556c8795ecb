//! Display formatting shared by the subcommands and the TUI.

use chrono::{DateTime, Local};

/// Formats a backend RFC 3339 timestamp in local time; falls back to the raw
/// string when it does not parse.
pub fn upload_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
