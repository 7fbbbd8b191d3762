// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;
use timesync::CoreError;
use timesync_domain::{DomainError, VotingBlock};
use timesync_persistence::PersistenceError;

use crate::{
    ApiError, AuthError, RequestParseError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

#[test]
fn test_invalid_name_maps_to_user_name_field() {
    let err = translate_domain_error(DomainError::InvalidName(String::from(
        "Name cannot be empty",
    )));
    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("user_name"),
            message: String::from("Name cannot be empty"),
        }
    );
}

#[test]
fn test_blocked_date_rule_names_the_reason() {
    let err = translate_domain_error(DomainError::DateBlocked {
        date: date!(2024 - 05 - 01),
        reason: VotingBlock::PastDate,
    });
    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "past_date");
            assert!(message.contains("2024-05-01"));
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_uneditable_date_rule() {
    let err = translate_domain_error(DomainError::DateNotEditable {
        date: date!(2024 - 06 - 01),
    });
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "date_not_editable"
    ));
}

#[test]
fn test_lifecycle_violation_rule() {
    let err = translate_domain_error(DomainError::InvalidStatusTransition {
        from: String::from("planning"),
        to: String::from("planning"),
        reason: String::from("transition not permitted by event lifecycle rules"),
    });
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "event_lifecycle"
    ));
}

#[test]
fn test_core_internal_error_stays_internal() {
    let err = translate_core_error(CoreError::Internal(String::from("broken invariant")));
    assert!(matches!(err, ApiError::Internal { .. }));
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err = translate_core_error(CoreError::DomainViolation(DomainError::EventDeleted));
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "event_deleted"
    ));
}

#[test]
fn test_missing_event_maps_to_not_found() {
    let err = translate_persistence_error(PersistenceError::EventNotFound(String::from("abc")));
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Event"
    ));
}

#[test]
fn test_duplicate_device_maps_to_rule_violation() {
    let err = translate_persistence_error(PersistenceError::DuplicateDeviceResponse {
        event_id: String::from("abc"),
        device_id: String::from("device-1"),
    });
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "one_response_per_device"
    ));
}

#[test]
fn test_auth_error_conversion() {
    let err: ApiError = AuthError::Unauthorized {
        action: String::from("Delete"),
        required_role: String::from("organizer"),
    }
    .into();
    assert_eq!(err.to_string(), "Unauthorized: 'Delete' requires organizer role");
}

#[test]
fn test_request_parse_error_conversion_keeps_field() {
    let err: ApiError = RequestParseError::InvalidStatus { code: 7 }.into();
    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("status"),
            message: String::from("Availability status must be 0, 1, or 2 (got 7)"),
        }
    );
}
