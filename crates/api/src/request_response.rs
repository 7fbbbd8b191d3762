// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings, times of day as
//! `HH:MM`, and instants as RFC 3339. Parsing into domain values happens
//! here so handlers only see typed input.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, OffsetDateTime, Time};
use timesync_domain::{
    AvailabilityStatus, DateAvailability, DeviceId, EventSettings, FinalizeDetails,
    finalize_details_from_form, normalize_optional_text, parse_calendar_date, parse_instant,
    parse_time_of_day,
};

/// Errors raised while turning request fields into domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestParseError {
    /// A calendar date field is malformed.
    #[error("'{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    /// A time-of-day field is malformed.
    #[error("'{value}' is not a valid time (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    /// An instant field is malformed.
    #[error("'{value}' is not a valid date or date-time")]
    InvalidInstant { field: &'static str, value: String },

    /// The availability status code is out of range.
    #[error("Availability status must be 0, 1, or 2 (got {code})")]
    InvalidStatus { code: u8 },

    /// A required field is blank.
    #[error("A value is required")]
    Missing { field: &'static str },
}

impl RequestParseError {
    /// Returns the request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { field, .. }
            | Self::InvalidTime { field, .. }
            | Self::InvalidInstant { field, .. }
            | Self::Missing { field } => field,
            Self::InvalidStatus { .. } => "status",
        }
    }
}

/// Parses a required calendar date field.
///
/// # Errors
///
/// Returns an error if the value is not `YYYY-MM-DD`.
pub fn parse_date_field(field: &'static str, value: &str) -> Result<Date, RequestParseError> {
    parse_calendar_date(value).map_err(|_| RequestParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, RequestParseError> {
    normalize_optional_text(value)
        .map(|v| parse_date_field(field, &v))
        .transpose()
}

fn parse_optional_time(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Time>, RequestParseError> {
    normalize_optional_text(value)
        .map(|v| {
            parse_time_of_day(&v).map_err(|_| RequestParseError::InvalidTime { field, value: v })
        })
        .transpose()
}

fn parse_optional_instant(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, RequestParseError> {
    normalize_optional_text(value)
        .map(|v| {
            parse_instant(&v).map_err(|_| RequestParseError::InvalidInstant { field, value: v })
        })
        .transpose()
}

/// Zero means "no target".
fn normalize_target_count(value: Option<u32>) -> Option<u32> {
    value.filter(|count| *count > 0)
}

// ========================================================================
// Capabilities
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as `true`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What the caller may do with an event.
///
/// Advisory only; every handler re-checks its own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventCapabilities {
    pub can_vote: Capability,
    pub can_block_dates: Capability,
    pub can_edit_settings: Capability,
    pub can_finalize: Capability,
    pub can_undo_finalization: Capability,
    pub can_delete: Capability,
    pub can_see_scores: Capability,
}

// ========================================================================
// Event creation and settings
// ========================================================================

/// API request to create an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub organizer_name: String,
    #[serde(default)]
    pub target_count: Option<u32>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub schedule_limit: Option<String>,
}

impl CreateEventRequest {
    /// Converts the request into event settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule limit is malformed.
    pub fn to_settings(&self) -> Result<EventSettings, RequestParseError> {
        Ok(EventSettings {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            organizer_name: self.organizer_name.trim().to_string(),
            target_count: normalize_target_count(self.target_count),
            schedule_limit: parse_optional_date("schedule_limit", self.schedule_limit.as_deref())?,
            voting_deadline: None,
        })
    }
}

/// API response for a created event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event_id: String,
    /// Shown once; possession grants organizer rights.
    pub organizer_token: String,
    pub participant_link: String,
    pub organizer_link: String,
    pub message: String,
}

/// API request replacing an event's editable settings.
///
/// Absent optionals clear the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventSettingsRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub organizer_name: String,
    #[serde(default)]
    pub target_count: Option<u32>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub schedule_limit: Option<String>,
    /// RFC 3339, or `YYYY-MM-DD` for midnight UTC.
    #[serde(default)]
    pub voting_deadline: Option<String>,
}

impl EventSettingsRequest {
    /// Converts the request into event settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a date field is malformed.
    pub fn to_settings(&self) -> Result<EventSettings, RequestParseError> {
        Ok(EventSettings {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            organizer_name: self.organizer_name.trim().to_string(),
            target_count: normalize_target_count(self.target_count),
            schedule_limit: parse_optional_date("schedule_limit", self.schedule_limit.as_deref())?,
            voting_deadline: parse_optional_instant(
                "voting_deadline",
                self.voting_deadline.as_deref(),
            )?,
        })
    }
}

/// API response for a settings update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSettingsResponse {
    pub event_id: String,
    pub message: String,
}

// ========================================================================
// Votes and blocked dates
// ========================================================================

/// API request to vote on one date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitVoteRequest {
    pub device_id: String,
    pub user_name: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `0`, `1`, or `2`.
    pub status: u8,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SubmitVoteRequest {
    /// Returns the voting device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device id is blank.
    pub fn device(&self) -> Result<DeviceId, RequestParseError> {
        let trimmed: &str = self.device_id.trim();
        if trimmed.is_empty() {
            return Err(RequestParseError::Missing { field: "device_id" });
        }
        Ok(DeviceId::new(trimmed))
    }

    /// Builds the vote this request describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the date, times, or status are malformed.
    pub fn to_availability(&self) -> Result<DateAvailability, RequestParseError> {
        let date: Date = parse_date_field("date", &self.date)?;
        let status: AvailabilityStatus = AvailabilityStatus::try_from(self.status)
            .map_err(|_| RequestParseError::InvalidStatus { code: self.status })?;
        let start_time: Option<Time> =
            parse_optional_time("start_time", self.start_time.as_deref())?;
        let end_time: Option<Time> = parse_optional_time("end_time", self.end_time.as_deref())?;
        let comment: String = self
            .comment
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Ok(DateAvailability::new(
            date, status, &comment, start_time, end_time,
        ))
    }
}

/// API response for an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitVoteResponse {
    pub response_id: i64,
    /// True if this vote created the device's response.
    pub created: bool,
    pub message: String,
}

/// API request to toggle a date's blocked state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleImpossibleDateRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
}

/// API response after toggling a blocked date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleImpossibleDateResponse {
    pub date: String,
    /// True if the date is now blocked.
    pub impossible: bool,
}

// ========================================================================
// Lifecycle
// ========================================================================

/// API request to finalize an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FinalizeRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub time_range: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub meeting_place: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FinalizeRequest {
    /// Parses the chosen date and collects the details.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is malformed.
    pub fn to_command_parts(&self) -> Result<(Date, FinalizeDetails), RequestParseError> {
        let date: Date = parse_date_field("date", &self.date)?;
        let details: FinalizeDetails = finalize_details_from_form(
            &self.time_range,
            self.place.as_deref(),
            self.meeting_place.as_deref(),
            self.url.as_deref(),
            self.notes.as_deref(),
        );
        Ok((date, details))
    }
}

/// API request to undo a finalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UndoFinalizationRequest {
    /// The organizer confirmed the undo.
    #[serde(default)]
    pub confirmed: bool,
}

/// API request to delete an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteEventRequest {
    /// Must equal the delete confirmation phrase.
    #[serde(default)]
    pub confirmation: String,
}

/// Whether a lifecycle action changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOutcome {
    Applied,
    /// Confirmation was declined; nothing was written.
    Aborted,
}

/// API response for finalize, undo, and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleResponse {
    pub event_id: String,
    pub status: String,
    pub outcome: LifecycleOutcome,
    pub message: String,
}

// ========================================================================
// Views
// ========================================================================

/// The finalized date and its details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizationInfo {
    pub date: String,
    pub time_range: String,
    pub place: Option<String>,
    pub meeting_place: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Event fields visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub organizer_name: String,
    pub status: String,
    pub target_count: Option<u32>,
    pub schedule_limit: Option<String>,
    pub voting_deadline: Option<String>,
    pub impossible_dates: Vec<String>,
    pub finalized: Option<FinalizationInfo>,
    pub created_at: String,
}

/// One entry of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedDateInfo {
    pub rank: usize,
    pub date: String,
    pub is_top: bool,
    /// Organizers only.
    pub score: Option<u32>,
    pub count: u32,
    pub hope: u32,
    pub ok: u32,
}

/// One calendar cell: a date with votes or an organizer block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDateInfo {
    pub date: String,
    pub impossible: bool,
    /// True if the caller may not vote on this date.
    pub blocked: bool,
    /// Organizers only.
    pub score: Option<u32>,
    pub count: u32,
    pub hope: u32,
    pub ok: u32,
}

/// The caller's own response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub response_id: Option<i64>,
    pub user_name: String,
    pub availabilities: Vec<DateAvailability>,
    pub comment: Option<String>,
    pub updated_at: String,
}

/// The complete view of an event for one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventViewResponse {
    pub event: EventInfo,
    pub role: String,
    pub voting_closed: bool,
    pub capabilities: EventCapabilities,
    pub participant_count: usize,
    pub ranking: Vec<RankedDateInfo>,
    /// Every voted or blocked date, ascending.
    pub calendar: Vec<CalendarDateInfo>,
    pub my_response: Option<ResponseInfo>,
}

/// One vote in a date breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteInfo {
    pub name: String,
    pub status: u8,
    pub mark: String,
    pub time: String,
    pub comment: String,
}

/// Every vote for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDetailsResponse {
    pub date: String,
    pub impossible: bool,
    /// Why the caller may not vote on this date, if they may not.
    pub block_reason: Option<String>,
    pub votes: Vec<VoteInfo>,
    /// The caller's current vote, for prefilling an edit.
    pub my_vote: Option<DateAvailability>,
    /// Organizers only.
    pub score: Option<u32>,
}

/// Plain-text announcement of the finalized date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementResponse {
    pub text: String,
}

/// Links for sharing the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinksResponse {
    pub participant_link: String,
    /// Organizers only.
    pub organizer_link: Option<String>,
}
