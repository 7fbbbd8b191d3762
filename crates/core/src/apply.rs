// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{EventPatch, TransitionResult};
use std::collections::BTreeSet;
use time::Date;
use timesync_domain::{
    DELETED_EVENT_TITLE, DomainError, Event, EventStatus, FinalizedDate, FinalizedInfo,
    is_date_editable_by_organizer, validate_event_settings, validate_finalize_details,
};

/// Applies a command to an event, producing the new event and the patch to persist.
///
/// Capability checks happen before this is called; `apply` enforces only
/// the lifecycle and field rules.
///
/// # Errors
///
/// Returns an error if:
/// - The status transition is not permitted
/// - Finalization lacks a time range
/// - The settings are invalid
/// - The event is deleted and the command edits it
/// - The organizer may not toggle the date
pub fn apply(event: &Event, command: Command) -> Result<TransitionResult, CoreError> {
    let action: &'static str = command.name();

    let patch: EventPatch = match command {
        Command::Finalize { date, details } => {
            event.status.validate_transition(EventStatus::Finalized)?;
            validate_finalize_details(&details)?;

            EventPatch {
                status: Some(EventStatus::Finalized),
                finalized_date: Some(Some(FinalizedDate {
                    date,
                    time_range: details.time_range,
                })),
                finalized_info: Some(details.info),
                ..EventPatch::default()
            }
        }
        Command::UndoFinalization => {
            event.status.validate_transition(EventStatus::Planning)?;

            // Every finalize-scoped field is cleared with the date
            EventPatch {
                status: Some(EventStatus::Planning),
                finalized_date: Some(None),
                finalized_info: Some(FinalizedInfo::default()),
                ..EventPatch::default()
            }
        }
        Command::Delete => {
            event.status.validate_transition(EventStatus::Deleted)?;

            EventPatch {
                title: Some(String::from(DELETED_EVENT_TITLE)),
                status: Some(EventStatus::Deleted),
                ..EventPatch::default()
            }
        }
        Command::ToggleImpossibleDate { date } => {
            ensure_not_deleted(event)?;
            if !is_date_editable_by_organizer(date) {
                return Err(CoreError::DomainViolation(DomainError::DateNotEditable {
                    date,
                }));
            }

            EventPatch {
                impossible_dates: Some(toggled(&event.impossible_dates, date)),
                ..EventPatch::default()
            }
        }
        Command::UpdateSettings(settings) => {
            ensure_not_deleted(event)?;
            validate_event_settings(&settings)?;

            EventPatch {
                title: Some(settings.title.trim().to_string()),
                description: Some(settings.description),
                organizer_name: Some(settings.organizer_name.trim().to_string()),
                target_count: Some(settings.target_count),
                schedule_limit: Some(settings.schedule_limit),
                voting_deadline: Some(settings.voting_deadline),
                ..EventPatch::default()
            }
        }
    };

    let new_event: Event = patch.apply_to(event);
    if !new_event.is_consistent() {
        return Err(CoreError::Internal(format!(
            "{action} left event in status {} with finalized date {:?}",
            new_event.status, new_event.finalized_date
        )));
    }

    Ok(TransitionResult {
        new_event,
        patch,
        action,
    })
}

fn ensure_not_deleted(event: &Event) -> Result<(), CoreError> {
    if event.is_deleted() {
        return Err(CoreError::DomainViolation(DomainError::EventDeleted));
    }
    Ok(())
}

fn toggled(dates: &BTreeSet<Date>, date: Date) -> BTreeSet<Date> {
    let mut updated: BTreeSet<Date> = dates.clone();
    if !updated.remove(&date) {
        updated.insert(date);
    }
    updated
}
