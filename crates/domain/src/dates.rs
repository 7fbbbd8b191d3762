// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire formats for calendar dates, times of day, and instants.
//!
//! Calendar dates travel as `YYYY-MM-DD`, times of day as `HH:MM`, and
//! instants as RFC 3339. There is no timezone model: a date-only voting
//! deadline is interpreted as midnight UTC of that date.

use crate::error::DomainError;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_calendar_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_calendar_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Parses an `HH:MM` time of day.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid time.
pub fn parse_time_of_day(value: &str) -> Result<Time, DomainError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a time of day as `HH:MM`.
#[must_use]
pub fn format_time_of_day(time: Time) -> String {
    time.format(format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| time.to_string())
}

/// Parses an instant, accepting either RFC 3339 or a bare `YYYY-MM-DD`.
///
/// A bare date resolves to midnight UTC of that date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if neither form parses.
pub fn parse_instant(value: &str) -> Result<OffsetDateTime, DomainError> {
    let trimmed: &str = value.trim();
    if let Ok(instant) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(instant);
    }
    parse_calendar_date(trimmed).map(|date| date.midnight().assume_utc())
}

/// Formats an instant as RFC 3339.
#[must_use]
pub fn format_instant(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.to_string())
}
