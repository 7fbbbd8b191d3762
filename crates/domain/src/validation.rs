// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EventSettings, FinalizeDetails, FinalizedInfo};

/// Validates a participant's display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_user_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the required fields of event settings.
///
/// # Errors
///
/// Returns an error if:
/// - The title is blank
/// - The organizer name is blank
pub fn validate_event_settings(settings: &EventSettings) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if settings.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    // Rule: organizer name must not be empty
    if settings.organizer_name.trim().is_empty() {
        return Err(DomainError::InvalidOrganizerName(String::from(
            "Organizer name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates organizer input for a finalize action.
///
/// # Errors
///
/// Returns `DomainError::MissingFinalizeTimeRange` if the time range is blank.
pub fn validate_finalize_details(details: &FinalizeDetails) -> Result<(), DomainError> {
    if details.time_range.trim().is_empty() {
        return Err(DomainError::MissingFinalizeTimeRange);
    }
    Ok(())
}

/// Maps blank form text to `None`.
#[must_use]
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Builds finalize details from raw form fields, clearing blank entries.
#[must_use]
pub fn finalize_details_from_form(
    time_range: &str,
    place: Option<&str>,
    meeting_place: Option<&str>,
    url: Option<&str>,
    notes: Option<&str>,
) -> FinalizeDetails {
    FinalizeDetails {
        time_range: time_range.trim().to_string(),
        info: FinalizedInfo {
            place: normalize_optional_text(place),
            meeting_place: normalize_optional_text(meeting_place),
            url: normalize_optional_text(url),
            notes: normalize_optional_text(notes),
        },
    }
}
