//! Input validation shared by every operation that accepts user input.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Reject the input unless every named field is present and non-blank
/// after trimming. All missing fields are reported together.
#[track_caller]
pub fn require_non_blank(fields: &[(&str, Option<&str>)]) -> CoreErrorResult<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| (*name).to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let message = if missing.len() == 1 {
        format!("{} is required", missing[0])
    } else {
        format!("{} are required", missing.join(", "))
    };

    Err(CoreError::Validation {
        message,
        fields: missing,
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Canonical form of usernames and emails for storage and lookup
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}
