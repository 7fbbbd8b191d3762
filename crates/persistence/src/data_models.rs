// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Dates are stored as `YYYY-MM-DD`, instants as RFC 3339, and the
//! impossible-date set and availability list as JSON text.

use crate::diesel_schema::{events, responses};
use crate::error::PersistenceError;
use diesel::prelude::*;
use std::collections::BTreeSet;
use std::str::FromStr;
use time::Date;
use timesync::EventPatch;
use timesync_domain::{
    DateAvailability, DeviceId, Event, EventId, EventStatus, FinalizedDate, FinalizedInfo,
    ParticipantResponse, ResponseId, format_calendar_date, format_instant, parse_calendar_date,
    parse_instant,
};

/// A row of the `events` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub organizer_name: String,
    pub organizer_token: String,
    pub status: String,
    pub impossible_dates_json: String,
    pub target_count: Option<i32>,
    pub schedule_limit: Option<String>,
    pub voting_deadline: Option<String>,
    pub finalized_date: Option<String>,
    pub finalized_time_range: Option<String>,
    pub finalized_place: Option<String>,
    pub finalized_meeting_place: Option<String>,
    pub finalized_url: Option<String>,
    pub finalized_notes: Option<String>,
    pub created_at: String,
}

/// Insertable event row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub organizer_name: String,
    pub organizer_token: String,
    pub status: String,
    pub impossible_dates_json: String,
    pub target_count: Option<i32>,
    pub schedule_limit: Option<String>,
    pub voting_deadline: Option<String>,
    pub created_at: String,
}

/// Partial update of an event row.
///
/// `None` skips the column; `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = events)]
pub struct EventChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organizer_name: Option<String>,
    pub status: Option<String>,
    pub impossible_dates_json: Option<String>,
    pub target_count: Option<Option<i32>>,
    pub schedule_limit: Option<Option<String>>,
    pub voting_deadline: Option<Option<String>>,
    pub finalized_date: Option<Option<String>>,
    pub finalized_time_range: Option<Option<String>>,
    pub finalized_place: Option<Option<String>>,
    pub finalized_meeting_place: Option<Option<String>>,
    pub finalized_url: Option<Option<String>>,
    pub finalized_notes: Option<Option<String>>,
}

/// A row of the `responses` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = responses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ResponseRow {
    pub response_id: i64,
    pub event_id: String,
    pub device_id: String,
    pub user_name: String,
    pub availabilities_json: String,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Insertable response row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = responses)]
pub struct NewResponse {
    pub event_id: String,
    pub device_id: String,
    pub user_name: String,
    pub availabilities_json: String,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn encode_target_count(value: Option<u32>) -> Result<Option<i32>, PersistenceError> {
    value
        .map(|count| {
            i32::try_from(count).map_err(|_| {
                PersistenceError::SerializationError(format!("target count {count} out of range"))
            })
        })
        .transpose()
}

fn decode_target_count(value: Option<i32>) -> Result<Option<u32>, PersistenceError> {
    value
        .map(|count| {
            u32::try_from(count).map_err(|_| {
                PersistenceError::CorruptRecord(format!("negative target count {count}"))
            })
        })
        .transpose()
}

fn encode_impossible_dates(dates: &BTreeSet<Date>) -> Result<String, PersistenceError> {
    let encoded: Vec<String> = dates.iter().copied().map(format_calendar_date).collect();
    Ok(serde_json::to_string(&encoded)?)
}

fn decode_impossible_dates(json: &str) -> Result<BTreeSet<Date>, PersistenceError> {
    let encoded: Vec<String> = serde_json::from_str(json)?;
    encoded
        .iter()
        .map(|value| decode_date(value))
        .collect::<Result<BTreeSet<Date>, PersistenceError>>()
}

fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    parse_calendar_date(value).map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

fn decode_instant(value: &str) -> Result<time::OffsetDateTime, PersistenceError> {
    parse_instant(value).map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

impl NewEvent {
    /// Builds the insert row for a new event under `event_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be encoded.
    pub fn from_event(event_id: &EventId, event: &Event) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id: event_id.as_str().to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            organizer_name: event.organizer_name.clone(),
            organizer_token: event.organizer_token.clone(),
            status: event.status.as_str().to_string(),
            impossible_dates_json: encode_impossible_dates(&event.impossible_dates)?,
            target_count: encode_target_count(event.target_count)?,
            schedule_limit: event.schedule_limit.map(format_calendar_date),
            voting_deadline: event.voting_deadline.map(format_instant),
            created_at: format_instant(event.created_at),
        })
    }
}

impl EventChangeset {
    /// Translates a core patch into the columns it writes.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be encoded.
    pub fn from_patch(patch: &EventPatch) -> Result<Self, PersistenceError> {
        let mut changeset: Self = Self {
            title: patch.title.clone(),
            description: patch.description.clone(),
            organizer_name: patch.organizer_name.clone(),
            status: patch.status.map(|s| s.as_str().to_string()),
            impossible_dates_json: patch
                .impossible_dates
                .as_ref()
                .map(encode_impossible_dates)
                .transpose()?,
            target_count: patch.target_count.map(encode_target_count).transpose()?,
            schedule_limit: patch
                .schedule_limit
                .map(|limit| limit.map(format_calendar_date)),
            voting_deadline: patch
                .voting_deadline
                .map(|deadline| deadline.map(format_instant)),
            ..Self::default()
        };

        if let Some(finalized) = &patch.finalized_date {
            changeset.finalized_date =
                Some(finalized.as_ref().map(|f| format_calendar_date(f.date)));
            changeset.finalized_time_range =
                Some(finalized.as_ref().map(|f| f.time_range.clone()));
        }

        if let Some(info) = &patch.finalized_info {
            changeset.finalized_place = Some(info.place.clone());
            changeset.finalized_meeting_place = Some(info.meeting_place.clone());
            changeset.finalized_url = Some(info.url.clone());
            changeset.finalized_notes = Some(info.notes.clone());
        }

        Ok(changeset)
    }
}

impl EventRow {
    /// Rebuilds the domain event.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value does not decode.
    pub fn into_event(self) -> Result<Event, PersistenceError> {
        let status: EventStatus = EventStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;

        let finalized_date: Option<FinalizedDate> = match self.finalized_date {
            Some(date) => Some(FinalizedDate {
                date: decode_date(&date)?,
                time_range: self.finalized_time_range.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Event {
            id: Some(EventId::new(&self.event_id)),
            title: self.title,
            description: self.description,
            organizer_name: self.organizer_name,
            organizer_token: self.organizer_token,
            status,
            impossible_dates: decode_impossible_dates(&self.impossible_dates_json)?,
            schedule_limit: self.schedule_limit.as_deref().map(decode_date).transpose()?,
            voting_deadline: self
                .voting_deadline
                .as_deref()
                .map(decode_instant)
                .transpose()?,
            target_count: decode_target_count(self.target_count)?,
            finalized_date,
            finalized_info: FinalizedInfo {
                place: self.finalized_place,
                meeting_place: self.finalized_meeting_place,
                url: self.finalized_url,
                notes: self.finalized_notes,
            },
            created_at: decode_instant(&self.created_at)?,
        })
    }
}

impl NewResponse {
    /// Builds the insert row for a device's first response.
    ///
    /// # Errors
    ///
    /// Returns an error if the availability list cannot be encoded.
    pub fn from_response(
        event_id: &EventId,
        response: &ParticipantResponse,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id: event_id.as_str().to_string(),
            device_id: response.device_id.as_str().to_string(),
            user_name: response.user_name.clone(),
            availabilities_json: serde_json::to_string(&response.availabilities)?,
            comment: response.comment.clone(),
            created_at: format_instant(response.created_at),
            updated_at: format_instant(response.updated_at),
        })
    }
}

impl ResponseRow {
    /// Rebuilds the domain response.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value does not decode.
    pub fn into_response(self) -> Result<ParticipantResponse, PersistenceError> {
        let availabilities: Vec<DateAvailability> =
            serde_json::from_str(&self.availabilities_json)?;

        Ok(ParticipantResponse {
            id: Some(ResponseId::new(self.response_id)),
            device_id: DeviceId::new(&self.device_id),
            user_name: self.user_name,
            availabilities,
            comment: self.comment,
            created_at: decode_instant(&self.created_at)?,
            updated_at: decode_instant(&self.updated_at)?,
        })
    }
}
