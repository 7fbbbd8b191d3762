// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_event, create_test_settings};
use crate::{Command, CoreError, EventPatch, apply};
use std::collections::BTreeSet;
use time::macros::{date, datetime};
use timesync_domain::{DomainError, EventStatus};

#[test]
fn test_toggle_adds_then_removes_date() {
    let event = create_test_event();
    let day = date!(2024 - 06 - 01);

    let added = apply(&event, Command::ToggleImpossibleDate { date: day }).unwrap();
    assert!(added.new_event.is_impossible(day));
    assert_eq!(
        added.patch,
        EventPatch {
            impossible_dates: Some(BTreeSet::from([day])),
            ..EventPatch::default()
        }
    );

    let removed = apply(&added.new_event, Command::ToggleImpossibleDate { date: day }).unwrap();
    assert!(!removed.new_event.is_impossible(day));
    assert_eq!(removed.patch.impossible_dates, Some(BTreeSet::new()));
}

#[test]
fn test_toggle_accepts_past_dates() {
    let event = create_test_event();
    let result = apply(
        &event,
        Command::ToggleImpossibleDate {
            date: date!(2001 - 01 - 01),
        },
    );
    assert!(result.is_ok());
}

#[test]
fn test_toggle_ignores_schedule_limit() {
    let mut event = create_test_event();
    event.schedule_limit = Some(date!(2024 - 06 - 30));
    let day = date!(2030 - 01 - 01);

    let result = apply(&event, Command::ToggleImpossibleDate { date: day }).unwrap();

    assert!(result.new_event.is_impossible(day));
}

#[test]
fn test_toggle_on_deleted_event_is_rejected() {
    let mut event = create_test_event();
    event.status = EventStatus::Deleted;

    let result = apply(
        &event,
        Command::ToggleImpossibleDate {
            date: date!(2024 - 06 - 01),
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventDeleted))
    );
}

#[test]
fn test_update_settings_replaces_every_field() {
    let mut event = create_test_event();
    event.target_count = Some(8);
    event.schedule_limit = Some(date!(2024 - 07 - 01));

    let mut settings = create_test_settings();
    settings.title = String::from("  Farewell party ");
    settings.voting_deadline = Some(datetime!(2024-06-15 0:00 UTC));

    let result = apply(&event, Command::UpdateSettings(settings)).unwrap();

    assert_eq!(result.new_event.title, "Farewell party");
    assert_eq!(result.new_event.target_count, None);
    assert_eq!(result.new_event.schedule_limit, None);
    assert_eq!(
        result.new_event.voting_deadline,
        Some(datetime!(2024-06-15 0:00 UTC))
    );
    assert_eq!(result.patch.target_count, Some(None));
    assert_eq!(result.new_event.status, EventStatus::Planning);
}

#[test]
fn test_update_settings_rejects_blank_title() {
    let mut settings = create_test_settings();
    settings.title = String::new();

    let result = apply(&create_test_event(), Command::UpdateSettings(settings));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTitle(_)))
    ));
}

#[test]
fn test_patch_apply_matches_new_event() {
    let event = create_test_event();
    let result = apply(&event, Command::Delete).unwrap();

    assert_eq!(result.patch.apply_to(&event), result.new_event);
    assert!(!result.patch.is_empty());
    assert!(EventPatch::default().is_empty());
}
