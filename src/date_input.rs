use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Result, ViewsError};

/// Accepted cutoff formats, tried in priority order. An ambiguous input
/// resolves to the earliest listed match, so callers that care about
/// day/month ordering must format unambiguously.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",  // 2024-10-06
    "%m/%d/%Y",  // 10/06/2024
    "%d-%m-%Y",  // 06-10-2024
    "%Y/%m/%d",  // 2024/10/06
    "%B %d, %Y", // October 6, 2024
    "%b %d, %Y", // Oct 6, 2024
];

/// Handles parsing user-supplied cutoff dates in various common formats.
pub struct CutoffParser;

impl CutoffParser {
    /// Parse a cutoff string into a calendar date.
    pub fn parse(input: &str) -> Result<NaiveDate> {
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
                return Ok(date);
            }
        }
        Err(ViewsError::InvalidDateFormat(input.to_string()))
    }
}

/// Parse the `date` field of an API record into its calendar date.
/// Handles both Z suffix and timezone info formats.
pub fn parse_post_timestamp(timestamp_str: &str) -> Result<NaiveDate> {
    let timestamp = if timestamp_str.ends_with('Z') {
        timestamp_str.replace('Z', "+00:00")
    } else {
        timestamp_str.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&timestamp) {
        return Ok(dt.date_naive());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }

    Err(ViewsError::TimestampParse(timestamp_str.to_string()))
}
