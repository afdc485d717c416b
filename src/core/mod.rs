//! Core time handling for montage-cli.
//!
//! ISO-8601 durations and timestamps as Montage sends and expects them.

mod datetime;
mod duration;

pub use datetime::{format_clock, parse_end_time, parse_target};
pub use duration::{minutes_literal, parse_iso_duration, rounded_minutes};
