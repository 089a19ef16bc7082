//! Date helper functions

use chrono::NaiveDateTime;

use crate::content::parse_date_string;

/// Format a date with a strftime pattern
///
/// # Examples
/// ```ignore
/// format_date(&date, "%B %-d, %Y") // -> "January 15, 2024"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    date.format(format).to_string()
}

/// Parse a raw front-matter date and format it, if it parses
pub fn format_date_str(raw: &str, format: &str) -> Option<String> {
    parse_date_string(raw).map(|date| format_date(&date, format))
}
