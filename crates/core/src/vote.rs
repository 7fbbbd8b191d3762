// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The response write path.
//!
//! Each device owns at most one response per event. A vote for a date
//! replaces that device's entry for the same date and leaves its other
//! dates untouched. The replaced entry moves to the end of the list.

use crate::error::CoreError;
use time::OffsetDateTime;
use timesync_domain::{
    DateAvailability, DeviceId, ParticipantResponse, ResponseId, validate_user_name,
};

/// The single store write produced by a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseWrite {
    /// First vote from this device: create a response.
    Create(ParticipantResponse),
    /// Later vote: overwrite the name and the whole availability list.
    Update {
        response_id: ResponseId,
        user_name: String,
        availabilities: Vec<DateAvailability>,
        updated_at: OffsetDateTime,
    },
}

/// Finds the response owned by `device_id`.
#[must_use]
pub fn find_response_for_device<'a>(
    responses: &'a [ParticipantResponse],
    device_id: &DeviceId,
) -> Option<&'a ParticipantResponse> {
    responses.iter().find(|r| &r.device_id == device_id)
}

/// Removes any entry for the vote's date, then appends the vote.
#[must_use]
pub fn merge_availability(
    existing: &[DateAvailability],
    vote: DateAvailability,
) -> Vec<DateAvailability> {
    let mut merged: Vec<DateAvailability> = existing
        .iter()
        .filter(|a| a.date != vote.date)
        .cloned()
        .collect();
    merged.push(vote);
    merged
}

/// Builds the write for a device's vote.
///
/// Eligibility of the date is checked by the caller.
///
/// # Errors
///
/// Returns an error if:
/// - The user name is blank
/// - The device's stored response has no identifier
pub fn submit_vote(
    responses: &[ParticipantResponse],
    device_id: &DeviceId,
    vote: DateAvailability,
    user_name: &str,
    now: OffsetDateTime,
) -> Result<ResponseWrite, CoreError> {
    validate_user_name(user_name)?;
    let user_name: String = user_name.trim().to_string();

    let Some(existing) = find_response_for_device(responses, device_id) else {
        return Ok(ResponseWrite::Create(ParticipantResponse {
            id: None,
            device_id: device_id.clone(),
            user_name,
            availabilities: vec![vote],
            comment: None,
            created_at: now,
            updated_at: now,
        }));
    };

    let response_id: ResponseId = existing.id.ok_or_else(|| {
        CoreError::Internal(format!(
            "Stored response for device {device_id} has no identifier"
        ))
    })?;

    Ok(ResponseWrite::Update {
        response_id,
        user_name,
        availabilities: merge_availability(&existing.availabilities, vote),
        updated_at: now,
    })
}
