// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, VotingBlock};
use time::macros::{date, datetime};

#[test]
fn test_invalid_status_transition_display() {
    let err = DomainError::InvalidStatusTransition {
        from: String::from("deleted"),
        to: String::from("planning"),
        reason: String::from("cannot transition from terminal state"),
    };

    assert_eq!(
        err.to_string(),
        "Cannot transition event from deleted to planning: cannot transition from terminal state"
    );
}

#[test]
fn test_date_blocked_display_uses_calendar_format() {
    let err = DomainError::DateBlocked {
        date: date!(2024 - 06 - 01),
        reason: VotingBlock::PastDate,
    };

    assert_eq!(
        err.to_string(),
        "Date 2024-06-01 cannot receive votes: the date is in the past"
    );
}

#[test]
fn test_date_not_editable_display() {
    let err = DomainError::DateNotEditable {
        date: date!(2024 - 06 - 01),
    };

    assert_eq!(
        err.to_string(),
        "Date 2024-06-01 cannot be marked impossible"
    );
}

#[test]
fn test_voting_closed_display_includes_deadline() {
    let err = DomainError::VotingClosed {
        deadline: datetime!(2024-06-10 0:00 UTC),
    };

    assert!(err.to_string().contains("2024-06-10T00:00:00Z"));
}

#[test]
fn test_invalid_availability_status_display() {
    assert_eq!(
        DomainError::InvalidAvailabilityStatus(7).to_string(),
        "Invalid availability status: 7. Must be 0, 1, or 2"
    );
}
