// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_event, create_test_event_with_deadline, create_test_event_with_limit,
};
use crate::{
    DomainError, EventStatus, VotingBlock, is_date_blocked_for_voting,
    is_date_editable_by_organizer, is_voting_closed, validate_vote_allowed, voting_block_reason,
};
use time::macros::{date, datetime};

#[test]
fn test_past_date_is_blocked_for_participants() {
    let event = create_test_event();
    let now = datetime!(2024-06-10 12:00 UTC);

    assert_eq!(
        voting_block_reason(date!(2024 - 06 - 09), &event, false, now),
        Some(VotingBlock::PastDate)
    );
    assert!(is_date_blocked_for_voting(
        date!(2024 - 06 - 09),
        &event,
        false,
        now
    ));
}

#[test]
fn test_today_is_not_past_even_late_in_the_day() {
    let event = create_test_event();
    let now = datetime!(2024-06-10 23:59 UTC);

    assert!(!is_date_blocked_for_voting(
        date!(2024 - 06 - 10),
        &event,
        false,
        now
    ));
}

#[test]
fn test_schedule_limit_day_itself_is_open() {
    let event = create_test_event_with_limit(date!(2024 - 06 - 30));
    let now = datetime!(2024-06-10 12:00 UTC);

    assert!(!is_date_blocked_for_voting(
        date!(2024 - 06 - 30),
        &event,
        false,
        now
    ));
    assert_eq!(
        voting_block_reason(date!(2024 - 07 - 01), &event, false, now),
        Some(VotingBlock::BeyondScheduleLimit)
    );
}

#[test]
fn test_organizer_bypasses_date_checks() {
    let event = create_test_event_with_limit(date!(2024 - 06 - 30));
    let now = datetime!(2024-06-10 12:00 UTC);

    assert!(!is_date_blocked_for_voting(
        date!(2024 - 01 - 01),
        &event,
        true,
        now
    ));
    assert!(!is_date_blocked_for_voting(
        date!(2025 - 01 - 01),
        &event,
        true,
        now
    ));
}

#[test]
fn test_organizer_may_block_any_date() {
    assert!(is_date_editable_by_organizer(date!(1999 - 12 - 31)));
    assert!(is_date_editable_by_organizer(date!(2099 - 01 - 01)));
}

#[test]
fn test_voting_closed_only_after_deadline() {
    let event = create_test_event_with_deadline(datetime!(2024-06-10 0:00 UTC));

    assert!(!is_voting_closed(&event, datetime!(2024-06-09 23:59 UTC)));
    assert!(is_voting_closed(&event, datetime!(2024-06-10 0:01 UTC)));
    assert!(!is_voting_closed(
        &create_test_event(),
        datetime!(2099-01-01 0:00 UTC)
    ));
}

#[test]
fn test_validate_vote_rejects_participant_after_deadline() {
    let event = create_test_event_with_deadline(datetime!(2024-06-10 0:00 UTC));
    let now = datetime!(2024-06-11 8:00 UTC);

    let result = validate_vote_allowed(date!(2024 - 06 - 20), &event, false, now);
    assert!(matches!(result, Err(DomainError::VotingClosed { .. })));

    // Organizer is not constrained by the deadline
    assert!(validate_vote_allowed(date!(2024 - 06 - 20), &event, true, now).is_ok());
}

#[test]
fn test_validate_vote_reports_block_reason() {
    let event = create_test_event_with_limit(date!(2024 - 06 - 30));
    let now = datetime!(2024-06-10 12:00 UTC);

    let result = validate_vote_allowed(date!(2024 - 07 - 02), &event, false, now);
    assert_eq!(
        result,
        Err(DomainError::DateBlocked {
            date: date!(2024 - 07 - 02),
            reason: VotingBlock::BeyondScheduleLimit,
        })
    );
}

#[test]
fn test_validate_vote_rejects_deleted_event_for_everyone() {
    let mut event = create_test_event();
    event.status = EventStatus::Deleted;
    let now = datetime!(2024-06-10 12:00 UTC);

    assert_eq!(
        validate_vote_allowed(date!(2024 - 06 - 20), &event, true, now),
        Err(DomainError::EventDeleted)
    );
}
