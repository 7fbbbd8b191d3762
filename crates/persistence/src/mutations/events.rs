// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{EventChangeset, NewEvent};
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use timesync::EventPatch;
use timesync_domain::{Event, EventId};
use tracing::{debug, info};

/// Inserts a new event under `event_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
    event: &Event,
) -> Result<(), PersistenceError> {
    let row: NewEvent = NewEvent::from_event(event_id, event)?;
    diesel::insert_into(events::table)
        .values(&row)
        .execute(conn)?;
    info!(event_id = %event_id, "Inserted event");
    Ok(())
}

/// Writes the fields named by `patch`.
///
/// An empty patch is a no-op.
///
/// # Errors
///
/// Returns an error if the event does not exist or the update fails.
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
    patch: &EventPatch,
) -> Result<(), PersistenceError> {
    if patch.is_empty() {
        debug!(event_id = %event_id, "Skipping empty event patch");
        return Ok(());
    }

    let changeset: EventChangeset = EventChangeset::from_patch(patch)?;
    let updated: usize =
        diesel::update(events::table.filter(events::event_id.eq(event_id.as_str())))
            .set(&changeset)
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EventNotFound(event_id.to_string()));
    }

    info!(
        event_id = %event_id,
        fields = ?patch.changed_fields(),
        "Updated event"
    );
    Ok(())
}
