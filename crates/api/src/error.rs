// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::request_response::RequestParseError;
use timesync::CoreError;
use timesync_domain::{DomainError, format_calendar_date, format_instant};
use timesync_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A token was presented and it is wrong.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// No organizer token was presented for an organizer action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<RequestParseError> for ApiError {
    fn from(err: RequestParseError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("user_name"),
            message: msg,
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidOrganizerName(msg) => ApiError::InvalidInput {
            field: String::from("organizer_name"),
            message: msg,
        },
        DomainError::InvalidAvailabilityStatus(code) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid availability status: {code}. Must be 0, 1, or 2"),
        },
        DomainError::InvalidEventStatus(status) => ApiError::Internal {
            message: format!("Stored event status '{status}' is not recognized"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("event_lifecycle"),
                message: format!("Cannot move event from {from} to {to}: {reason}"),
            }
        }
        DomainError::MissingFinalizeTimeRange => ApiError::InvalidInput {
            field: String::from("time_range"),
            message: String::from("A time range is required to finalize the event"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateBlocked { date, reason } => ApiError::DomainRuleViolation {
            rule: String::from(reason.as_str()),
            message: format!(
                "Date {} cannot receive votes: {reason}",
                format_calendar_date(date)
            ),
        },
        DomainError::DateNotEditable { date } => ApiError::DomainRuleViolation {
            rule: String::from("date_not_editable"),
            message: format!(
                "Date {} cannot be marked impossible",
                format_calendar_date(date)
            ),
        },
        DomainError::VotingClosed { deadline } => ApiError::DomainRuleViolation {
            rule: String::from("voting_deadline"),
            message: format!(
                "Voting closed at {}; votes can no longer be changed",
                format_instant(deadline)
            ),
        },
        DomainError::EventDeleted => ApiError::DomainRuleViolation {
            rule: String::from("event_deleted"),
            message: String::from("The event has been deleted"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event '{event_id}' does not exist"),
        },
        PersistenceError::ResponseNotFound {
            event_id,
            response_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Response"),
            message: format!("Response {response_id} does not exist in event '{event_id}'"),
        },
        PersistenceError::DuplicateDeviceResponse { device_id, .. } => {
            ApiError::DomainRuleViolation {
                rule: String::from("one_response_per_device"),
                message: format!("Device '{device_id}' already has a response; retry the vote"),
            }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
