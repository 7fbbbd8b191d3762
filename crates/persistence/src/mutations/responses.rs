// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewResponse;
use crate::diesel_schema::responses;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use timesync_domain::{
    DateAvailability, EventId, ParticipantResponse, ResponseId, format_instant,
};
use tracing::info;

/// Inserts a device's first response and returns its new identifier.
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - The device already has a response for this event
/// - The insert fails
pub fn insert_response(
    conn: &mut SqliteConnection,
    event_id: &EventId,
    response: &ParticipantResponse,
) -> Result<ResponseId, PersistenceError> {
    let row: NewResponse = NewResponse::from_response(event_id, response)?;

    diesel::insert_into(responses::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| {
            if PersistenceError::is_unique_violation(&e) {
                PersistenceError::DuplicateDeviceResponse {
                    event_id: event_id.to_string(),
                    device_id: response.device_id.to_string(),
                }
            } else if PersistenceError::is_foreign_key_violation(&e) {
                PersistenceError::EventNotFound(event_id.to_string())
            } else {
                PersistenceError::from(e)
            }
        })?;

    let response_id: ResponseId = ResponseId::new(get_last_insert_rowid(conn)?);
    info!(event_id = %event_id, response_id = %response_id, "Inserted response");
    Ok(response_id)
}

/// Overwrites a response's name and its whole availability list.
///
/// # Errors
///
/// Returns an error if the response does not belong to the event or the
/// update fails.
pub fn update_response(
    conn: &mut SqliteConnection,
    event_id: &EventId,
    response_id: ResponseId,
    user_name: &str,
    availabilities: &[DateAvailability],
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let availabilities_json: String = serde_json::to_string(availabilities)?;

    let updated: usize = diesel::update(
        responses::table
            .filter(responses::response_id.eq(response_id.value()))
            .filter(responses::event_id.eq(event_id.as_str())),
    )
    .set((
        responses::user_name.eq(user_name),
        responses::availabilities_json.eq(availabilities_json),
        responses::updated_at.eq(format_instant(updated_at)),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ResponseNotFound {
            event_id: event_id.to_string(),
            response_id: response_id.value(),
        });
    }

    info!(event_id = %event_id, response_id = %response_id, "Updated response");
    Ok(())
}
