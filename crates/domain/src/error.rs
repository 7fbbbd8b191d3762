// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::{format_calendar_date, format_instant};
use crate::eligibility::VotingBlock;
use time::{Date, OffsetDateTime};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Participant display name is empty or invalid.
    InvalidName(String),
    /// Event title is empty or invalid.
    InvalidTitle(String),
    /// Organizer name is empty or invalid.
    InvalidOrganizerName(String),
    /// Availability status code is outside `0..=2`.
    InvalidAvailabilityStatus(u8),
    /// Event status string is not recognized.
    InvalidEventStatus(String),
    /// A lifecycle transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Finalization was requested without a time range.
    MissingFinalizeTimeRange,
    /// Failed to parse a date, time, or instant.
    DateParseError {
        /// The offending input.
        date_string: String,
        /// The parser's message.
        error: String,
    },
    /// The date may not receive votes from this actor.
    DateBlocked {
        /// The date that was voted on.
        date: Date,
        /// Why the date is blocked.
        reason: VotingBlock,
    },
    /// The organizer may not toggle this date.
    DateNotEditable {
        /// The date that was toggled.
        date: Date,
    },
    /// The voting deadline has passed.
    VotingClosed {
        /// The configured deadline.
        deadline: OffsetDateTime,
    },
    /// The event has been deleted and accepts no further changes.
    EventDeleted,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidOrganizerName(msg) => write!(f, "Invalid organizer name: {msg}"),
            Self::InvalidAvailabilityStatus(code) => {
                write!(
                    f,
                    "Invalid availability status: {code}. Must be 0, 1, or 2"
                )
            }
            Self::InvalidEventStatus(status) => write!(f, "Invalid event status: '{status}'"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition event from {from} to {to}: {reason}")
            }
            Self::MissingFinalizeTimeRange => {
                write!(f, "A time range is required to finalize the event")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateBlocked { date, reason } => {
                write!(
                    f,
                    "Date {} cannot receive votes: {reason}",
                    format_calendar_date(*date)
                )
            }
            Self::DateNotEditable { date } => {
                write!(
                    f,
                    "Date {} cannot be marked impossible",
                    format_calendar_date(*date)
                )
            }
            Self::VotingClosed { deadline } => {
                write!(
                    f,
                    "Voting closed at {}; votes can no longer be changed",
                    format_instant(*deadline)
                )
            }
            Self::EventDeleted => write!(f, "The event has been deleted"),
        }
    }
}

impl std::error::Error for DomainError {}
