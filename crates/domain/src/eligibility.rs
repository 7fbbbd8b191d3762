// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date eligibility rules.
//!
//! Decides whether a calendar date may receive a vote or an organizer
//! block. The organizer bypasses every date check.
//!
//! ## Invariants
//!
//! - A date before `now`'s calendar day is blocked ("past")
//! - A date after the schedule limit's calendar day is blocked
//! - Blocking gates new writes only; stored votes for a now-blocked date
//!   still count toward the date's score

use crate::error::DomainError;
use crate::types::Event;
use time::{Date, OffsetDateTime};

/// Why a date is closed to participant votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotingBlock {
    /// The date is before today.
    PastDate,
    /// The date falls after the event's schedule limit.
    BeyondScheduleLimit,
}

impl VotingBlock {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PastDate => "past_date",
            Self::BeyondScheduleLimit => "beyond_schedule_limit",
        }
    }
}

impl std::fmt::Display for VotingBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PastDate => write!(f, "the date is in the past"),
            Self::BeyondScheduleLimit => write!(f, "the date is beyond the schedule limit"),
        }
    }
}

/// Returns why `date` is closed to votes from this actor, if it is.
///
/// Past-date takes precedence over the schedule limit.
#[must_use]
pub fn voting_block_reason(
    date: Date,
    event: &Event,
    is_organizer: bool,
    now: OffsetDateTime,
) -> Option<VotingBlock> {
    if is_organizer {
        return None;
    }

    if date < now.date() {
        return Some(VotingBlock::PastDate);
    }

    if let Some(limit) = event.schedule_limit
        && date > limit
    {
        return Some(VotingBlock::BeyondScheduleLimit);
    }

    None
}

/// Returns true if `date` may not receive a vote from this actor.
#[must_use]
pub fn is_date_blocked_for_voting(
    date: Date,
    event: &Event,
    is_organizer: bool,
    now: OffsetDateTime,
) -> bool {
    voting_block_reason(date, event, is_organizer, now).is_some()
}

/// Returns true if the organizer may toggle `date` as impossible.
///
/// Organizer blocking has no date-range restriction.
#[must_use]
pub const fn is_date_editable_by_organizer(_date: Date) -> bool {
    true
}

/// Returns true once the event's voting deadline has passed.
#[must_use]
pub fn is_voting_closed(event: &Event, now: OffsetDateTime) -> bool {
    event.voting_deadline.is_some_and(|deadline| deadline < now)
}

/// Validates that a vote for `date` may be written.
///
/// # Errors
///
/// Returns an error if:
/// - The event is deleted
/// - The actor is a participant and the voting deadline has passed
/// - The actor is a participant and the date is blocked
pub fn validate_vote_allowed(
    date: Date,
    event: &Event,
    is_organizer: bool,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if event.is_deleted() {
        return Err(DomainError::EventDeleted);
    }

    if !is_organizer
        && let Some(deadline) = event.voting_deadline
        && deadline < now
    {
        return Err(DomainError::VotingClosed { deadline });
    }

    if let Some(reason) = voting_block_reason(date, event, is_organizer, now) {
        return Err(DomainError::DateBlocked { date, reason });
    }

    Ok(())
}
