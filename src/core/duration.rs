//! ISO-8601 duration handling.
//!
//! Montage speaks durations as ISO-8601 literals: requests carry `PT25M`,
//! responses usually come back as whole seconds (`PT1500S`).

use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MontageError;

// `iso8601::duration` stops at the first byte it doesn't recognise, so the
// whole literal is checked against the grammar first. Components are capped
// at nine digits to stay inside `u32`.
static DURATION_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^P(?:\d{1,9}W|(?:\d{1,9}Y)?(?:\d{1,9}M)?(?:\d{1,9}D)?(?:T(?:\d{1,9}H)?(?:\d{1,9}M)?(?:\d{1,9}(?:[.,]\d{1,9})?S)?)?)$",
    )
    .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// Build the request-side duration literal for a number of minutes.
///
/// The input is embedded verbatim, so `"abc"` yields `PTabcM` and the server
/// gets to reject it.
#[must_use]
pub fn minutes_literal(minutes: &str) -> String {
    format!("PT{minutes}M")
}

/// Parse an ISO-8601 duration such as `PT1500S`, `PT25M`, `PT1H30M`, `P1W`
/// or `P1DT2.5S`.
///
/// Years and months have no fixed length and are rejected.
///
/// # Errors
///
/// Returns `MontageError::Format` if the string is not a duration, or if it
/// is too long to represent.
pub fn parse_iso_duration(input: &str) -> Result<Duration, MontageError> {
    let s = input.trim();
    let invalid = || MontageError::Format(format!("could not parse duration '{input}'"));

    // "P", "PT" and "P1DT" fit the grammar but say nothing.
    if !DURATION_SHAPE.is_match(s) || s.len() < 3 || s.ends_with('T') {
        return Err(invalid());
    }

    let parsed = iso8601::duration(s).map_err(|_| invalid())?;
    to_chrono(parsed, input)?.ok_or_else(|| {
        MontageError::Format(format!("duration '{input}' is too long"))
    })
}

fn to_chrono(parsed: iso8601::Duration, input: &str) -> Result<Option<Duration>, MontageError> {
    match parsed {
        iso8601::Duration::Weeks(weeks) => Ok(Duration::try_weeks(i64::from(weeks))),
        iso8601::Duration::YMDHMS { year, month, .. } if year != 0 || month != 0 => {
            Err(MontageError::Format(format!(
                "duration '{input}' uses years or months, which have no fixed length"
            )))
        }
        iso8601::Duration::YMDHMS {
            day,
            hour,
            minute,
            second,
            millisecond,
            ..
        } => Ok(total_millis(day, hour, minute, second, millisecond).and_then(Duration::try_milliseconds)),
    }
}

fn total_millis(day: u32, hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<i64> {
    i64::from(day)
        .checked_mul(24)?
        .checked_add(i64::from(hour))?
        .checked_mul(60)?
        .checked_add(i64::from(minute))?
        .checked_mul(60)?
        .checked_add(i64::from(second))?
        .checked_mul(1000)?
        .checked_add(i64::from(millisecond))
}

/// Minutes for display: `round(seconds / 60)`, halves rounding up.
///
/// # Errors
///
/// Returns `MontageError::Format` if the duration is too long to round.
pub fn rounded_minutes(duration: Duration) -> Result<i64, MontageError> {
    duration
        .num_milliseconds()
        .checked_add(30_000)
        .map(|ms| ms.div_euclid(60_000))
        .ok_or_else(|| MontageError::Format("duration is too long to show in minutes".to_string()))
}
