use serde::Serialize;

use crate::error::MontageError;
use crate::output::Notice;

/// Format a notice as JSON.
///
/// # Errors
///
/// Returns `MontageError::Protocol` if JSON serialization fails.
pub fn format_notice_json(notice: &Notice) -> Result<String, MontageError> {
    to_json(notice)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `MontageError::Protocol` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, MontageError> {
    Ok(serde_json::to_string_pretty(value)?)
}
