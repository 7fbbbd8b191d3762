// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::EventRow;
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use timesync_domain::{Event, EventId};

/// Loads an event by identifier, deleted or not.
///
/// # Errors
///
/// Returns an error if the query fails or the row does not decode.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<Option<Event>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id.as_str()))
        .select(EventRow::as_select())
        .first::<EventRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_event: {e}")))?;

    row.map(EventRow::into_event).transpose()
}

/// Returns true if an event row exists under `event_id`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn event_exists(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<bool, PersistenceError> {
    let count: i64 = events::table
        .filter(events::event_id.eq(event_id.as_str()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("event_exists: {e}")))?;
    Ok(count > 0)
}
