// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::format_time_of_day;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::{Date, OffsetDateTime, Time};

/// Time range recorded for a vote with no time-of-day restriction.
pub const ALL_DAY_TIME_RANGE: &str = "終日OK";

/// Title written over a soft-deleted event.
pub const DELETED_EVENT_TITLE: &str = "削除されたイベント";

/// Opaque event identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned participant response identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(i64);

impl ResponseId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-generated device identifier used to find "my response".
///
/// This is a soft identity, not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The capability an actor holds for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Presented the event's organizer token.
    Organizer,
    /// Holds only the plain share link.
    Participant,
}

impl Role {
    #[must_use]
    pub const fn is_organizer(&self) -> bool {
        matches!(self, Self::Organizer)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Participant => "participant",
        }
    }
}

/// A participant's willingness for one date.
///
/// Encoded on the wire as `0`, `1`, or `2`. Absence of an entry means
/// "no response", which is distinct from `NeedsAdjustment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AvailabilityStatus {
    /// △: possible with adjustment.
    NeedsAdjustment,
    /// 〇: fine.
    Ok,
    /// ◎: eager to attend.
    Hope,
}

impl AvailabilityStatus {
    /// Returns the wire code for this status.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::NeedsAdjustment => 0,
            Self::Ok => 1,
            Self::Hope => 2,
        }
    }

    /// Returns the base score contributed by a vote with this status.
    #[must_use]
    pub const fn base_score(&self) -> u32 {
        match self {
            Self::NeedsAdjustment => 2,
            Self::Ok => 3,
            Self::Hope => 4,
        }
    }

    /// Returns the display mark for this status.
    #[must_use]
    pub const fn mark(&self) -> &'static str {
        match self {
            Self::NeedsAdjustment => "△",
            Self::Ok => "〇",
            Self::Hope => "◎",
        }
    }
}

impl TryFrom<u8> for AvailabilityStatus {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NeedsAdjustment),
            1 => Ok(Self::Ok),
            2 => Ok(Self::Hope),
            _ => Err(DomainError::InvalidAvailabilityStatus(code)),
        }
    }
}

impl From<AvailabilityStatus> for u8 {
    fn from(status: AvailabilityStatus) -> Self {
        status.code()
    }
}

/// Builds the display time range for a vote from its raw times of day.
///
/// Neither time set yields the all-day sentinel; otherwise the range is
/// `"{start}〜{end}"` with a missing side left empty.
#[must_use]
pub fn describe_time_window(start_time: Option<Time>, end_time: Option<Time>) -> String {
    if start_time.is_none() && end_time.is_none() {
        return String::from(ALL_DAY_TIME_RANGE);
    }
    format!(
        "{}〜{}",
        start_time.map(format_time_of_day).unwrap_or_default(),
        end_time.map(format_time_of_day).unwrap_or_default()
    )
}

/// One participant's vote for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAvailability {
    #[serde(with = "crate::calendar_date")]
    pub date: Date,
    pub status: AvailabilityStatus,
    /// Display string; the all-day sentinel means no time restriction.
    pub time_range: String,
    #[serde(default)]
    pub comment: String,
    #[serde(
        default,
        with = "crate::time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<Time>,
    #[serde(
        default,
        with = "crate::time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<Time>,
}

impl DateAvailability {
    /// Creates a vote, deriving its time range from the raw times of day.
    #[must_use]
    pub fn new(
        date: Date,
        status: AvailabilityStatus,
        comment: &str,
        start_time: Option<Time>,
        end_time: Option<Time>,
    ) -> Self {
        Self {
            date,
            status,
            time_range: describe_time_window(start_time, end_time),
            comment: comment.to_string(),
            start_time,
            end_time,
        }
    }

    /// Returns true if the vote restricts the time of day.
    ///
    /// An empty time range counts as unrestricted.
    #[must_use]
    pub fn is_time_constrained(&self) -> bool {
        !self.time_range.is_empty() && self.time_range != ALL_DAY_TIME_RANGE
    }
}

/// All votes submitted from one device for one event.
///
/// Holds at most one `DateAvailability` per date; the write path keeps
/// that invariant, storage does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantResponse {
    /// `None` until the store assigns an identifier.
    pub id: Option<ResponseId>,
    pub device_id: DeviceId,
    /// Last write wins.
    pub user_name: String,
    pub availabilities: Vec<DateAvailability>,
    /// Optional comment for the whole response.
    ///
    /// Read-only: no vote sets it, and the vote write path leaves a stored
    /// value in place. Per-date notes live on `DateAvailability::comment`.
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ParticipantResponse {
    /// Returns this response's vote for `date`, if any.
    #[must_use]
    pub fn availability_for(&self, date: Date) -> Option<&DateAvailability> {
        self.availabilities.iter().find(|a| a.date == date)
    }
}

/// Event lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Collecting votes. Initial state.
    #[default]
    Planning,
    /// A date has been chosen.
    Finalized,
    /// Soft-deleted. Terminal.
    Deleted,
}

impl EventStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Finalized => "finalized",
            Self::Deleted => "deleted",
        }
    }

    /// Returns true if no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Planning` → `Finalized`
    /// - `Finalized` → `Planning` (undo)
    /// - `Planning` | `Finalized` → `Deleted`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planning, Self::Finalized)
                | (Self::Finalized, Self::Planning)
                | (Self::Planning | Self::Finalized, Self::Deleted)
        )
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: String::from("cannot transition from terminal state"),
            });
        }

        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: String::from("transition not permitted by event lifecycle rules"),
            })
        }
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(Self::Planning),
            "finalized" => Ok(Self::Finalized),
            "deleted" => Ok(Self::Deleted),
            _ => Err(DomainError::InvalidEventStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The chosen date and time for a finalized event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedDate {
    pub date: Date,
    pub time_range: String,
}

/// Descriptive details published alongside a finalized date.
///
/// Every field is independently optional. A finalize overwrites all of
/// them, so a field left out is cleared rather than kept stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinalizedInfo {
    pub place: Option<String>,
    pub meeting_place: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl FinalizedInfo {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.place.is_none()
            && self.meeting_place.is_none()
            && self.url.is_none()
            && self.notes.is_none()
    }
}

/// Organizer input for a finalize action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeDetails {
    /// Required, non-blank.
    pub time_range: String,
    pub info: FinalizedInfo,
}

/// Organizer-editable event settings.
///
/// Applied as a full replacement: an absent optional clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSettings {
    pub title: String,
    pub description: String,
    pub organizer_name: String,
    pub target_count: Option<u32>,
    pub schedule_limit: Option<Date>,
    pub voting_deadline: Option<OffsetDateTime>,
}

/// A group-scheduling event.
///
/// Invariant: `finalized_date` is `Some` iff `status` is `Finalized`. A
/// deleted event keeps whatever finalization it had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// `None` until the store assigns an identifier.
    pub id: Option<EventId>,
    pub title: String,
    pub description: String,
    pub organizer_name: String,
    /// Possession grants organizer capability. Never expires.
    pub organizer_token: String,
    pub status: EventStatus,
    /// Organizer-blocked dates, excluded from scoring.
    pub impossible_dates: BTreeSet<Date>,
    /// Dates strictly after this are closed to participant votes.
    pub schedule_limit: Option<Date>,
    /// After this instant participants may no longer vote.
    pub voting_deadline: Option<OffsetDateTime>,
    pub target_count: Option<u32>,
    pub finalized_date: Option<FinalizedDate>,
    pub finalized_info: FinalizedInfo,
    pub created_at: OffsetDateTime,
}

impl Event {
    /// Creates a new event in the `Planning` state.
    #[must_use]
    pub fn new(settings: EventSettings, organizer_token: &str, created_at: OffsetDateTime) -> Self {
        Self {
            id: None,
            title: settings.title,
            description: settings.description,
            organizer_name: settings.organizer_name,
            organizer_token: organizer_token.to_string(),
            status: EventStatus::Planning,
            impossible_dates: BTreeSet::new(),
            schedule_limit: settings.schedule_limit,
            voting_deadline: settings.voting_deadline,
            target_count: settings.target_count,
            finalized_date: None,
            finalized_info: FinalizedInfo::default(),
            created_at,
        }
    }

    /// Returns true if the organizer has excluded `date`.
    #[must_use]
    pub fn is_impossible(&self, date: Date) -> bool {
        self.impossible_dates.contains(&date)
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self.status, EventStatus::Deleted)
    }

    /// Checks the finalization invariant.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        match self.status {
            EventStatus::Planning => self.finalized_date.is_none(),
            EventStatus::Finalized => self.finalized_date.is_some(),
            EventStatus::Deleted => true,
        }
    }
}
