// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the TimeSync scheduler.
//!
//! Stores events and participant responses in `SQLite` through Diesel.
//! This is the concrete response store: it creates events, reads the
//! complete snapshot of an event, and applies the single-row writes the
//! core crate produces.
//!
//! ## Storage Rules
//!
//! - Deleting an event is a status change; rows are never removed
//! - Each device owns at most one response per event, enforced by a
//!   unique index on `(event_id, device_id)`
//! - Responses reference their event; foreign keys are verified at startup
//!
//! ## Testing
//!
//! Every test opens its own shared-cache in-memory database via
//! [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use timesync::{EventPatch, EventSnapshot, ResponseWrite};
use timesync_domain::{Event, EventId, ParticipantResponse, ResponseId};
use tracing::{debug, warn};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Attempts at drawing an unused random event identifier.
const EVENT_ID_ATTEMPTS: usize = 4;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for events and responses.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

/// Draws a new opaque event identifier.
fn generate_event_id() -> EventId {
    EventId::new(&format!(
        "{:016x}{:08x}",
        rand::random::<u64>(),
        rand::random::<u32>()
    ))
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:timesync_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Stores a new event under a fresh random identifier.
    ///
    /// The event's own `id` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_event(&mut self, event: &Event) -> Result<EventId, PersistenceError> {
        for _ in 0..EVENT_ID_ATTEMPTS {
            let event_id: EventId = generate_event_id();
            if queries::events::event_exists(&mut self.conn, &event_id)? {
                warn!(event_id = %event_id, "Generated event id already in use");
                continue;
            }
            mutations::events::insert_event(&mut self.conn, &event_id, event)?;
            return Ok(event_id);
        }
        Err(PersistenceError::DatabaseError(String::from(
            "Could not allocate an unused event id",
        )))
    }

    /// Loads an event, including deleted ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_event(&mut self, event_id: &EventId) -> Result<Option<Event>, PersistenceError> {
        queries::events::get_event(&mut self.conn, event_id)
    }

    /// Writes a partial update to an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or the update fails.
    pub fn update_event(
        &mut self,
        event_id: &EventId,
        patch: &EventPatch,
    ) -> Result<(), PersistenceError> {
        mutations::events::update_event(&mut self.conn, event_id, patch)
    }

    // ========================================================================
    // Responses
    // ========================================================================

    /// Loads every response for an event in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_responses(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<ParticipantResponse>, PersistenceError> {
        queries::responses::list_responses(&mut self.conn, event_id)
    }

    /// Stores a device's first response.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing or the device already responded.
    pub fn create_response(
        &mut self,
        event_id: &EventId,
        response: &ParticipantResponse,
    ) -> Result<ResponseId, PersistenceError> {
        mutations::responses::insert_response(&mut self.conn, event_id, response)
    }

    /// Persists the write produced by a vote.
    ///
    /// Returns the identifier of the response written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn apply_response_write(
        &mut self,
        event_id: &EventId,
        write: &ResponseWrite,
    ) -> Result<ResponseId, PersistenceError> {
        match write {
            ResponseWrite::Create(response) => self.create_response(event_id, response),
            ResponseWrite::Update {
                response_id,
                user_name,
                availabilities,
                updated_at,
            } => {
                mutations::responses::update_response(
                    &mut self.conn,
                    event_id,
                    *response_id,
                    user_name,
                    availabilities,
                    *updated_at,
                )?;
                Ok(*response_id)
            }
        }
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Reads the complete current state of an event.
    ///
    /// Returns `None` if no event exists under `event_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_snapshot(
        &mut self,
        event_id: &EventId,
    ) -> Result<Option<EventSnapshot>, PersistenceError> {
        let Some(event) = self.get_event(event_id)? else {
            debug!(event_id = %event_id, "Snapshot requested for unknown event");
            return Ok(None);
        };
        let responses: Vec<ParticipantResponse> = self.list_responses(event_id)?;
        Ok(Some(EventSnapshot::new(event, responses)))
    }
}
