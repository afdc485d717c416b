//! Timestamp parsing and clock rendering.
//!
//! `projectedEndTime` values are shown as a local wall-clock `hour:minute`.
//! The minute is not zero-padded, so 09:05 renders as `9:5`.

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use crate::error::MontageError;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// Timestamps with an offset are converted to the local zone. Timestamps
/// without one are taken to already be local.
///
/// # Errors
///
/// Returns `MontageError::Format` if the string is not an ISO-8601
/// date-time.
pub fn parse_end_time(input: &str) -> Result<NaiveDateTime, MontageError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| MontageError::Format(format!("could not parse timestamp '{input}'")))
}

/// Render a wall-clock time as unpadded `hour:minute`.
#[must_use]
pub fn format_clock(time: &NaiveDateTime) -> String {
    format!("{}:{}", time.hour(), time.minute())
}

/// Resolve a user-entered end time for `extend --to`.
///
/// Accepts a full RFC 3339 timestamp or a bare `HH:MM` (or `HH:MM:SS`),
/// which is taken as that time today.
///
/// # Errors
///
/// Returns `MontageError::Format` for anything else, or for a local time
/// that doesn't exist today (a DST gap).
pub fn parse_target(input: &str, now: DateTime<Local>) -> Result<DateTime<Local>, MontageError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    let time = NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| {
            MontageError::Format(format!(
                "could not understand '{input}' as a time. Use HH:MM or an RFC 3339 timestamp"
            ))
        })?;

    let naive = now.date_naive().and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| MontageError::Format(format!("{input} does not exist today in the local time zone")))
}
