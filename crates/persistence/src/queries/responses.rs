// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::ResponseRow;
use crate::diesel_schema::responses;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use timesync_domain::{EventId, ParticipantResponse};

/// Loads every response for an event in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn list_responses(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<Vec<ParticipantResponse>, PersistenceError> {
    let rows: Vec<ResponseRow> = responses::table
        .filter(responses::event_id.eq(event_id.as_str()))
        .order(responses::response_id.asc())
        .select(ResponseRow::as_select())
        .load::<ResponseRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_responses: {e}")))?;

    rows.into_iter().map(ResponseRow::into_response).collect()
}
