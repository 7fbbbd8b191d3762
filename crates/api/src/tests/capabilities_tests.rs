// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;
use timesync_domain::{Event, EventSettings, EventStatus, FinalizedDate, Role};

use crate::{Capability, EventCapabilities, compute_event_capabilities};

use super::helpers::test_now;

fn create_planning_event() -> Event {
    Event::new(
        EventSettings {
            title: String::from("Dinner"),
            description: String::new(),
            organizer_name: String::from("Aki"),
            target_count: None,
            schedule_limit: None,
            voting_deadline: None,
        },
        "secret",
        test_now(),
    )
}

fn finalize(event: &mut Event) {
    event.status = EventStatus::Finalized;
    event.finalized_date = Some(FinalizedDate {
        date: test_now().date(),
        time_range: String::from("19:00〜21:00"),
    });
}

#[test]
fn test_organizer_capabilities_while_planning() {
    let event = create_planning_event();
    let caps: EventCapabilities = compute_event_capabilities(&event, Role::Organizer, test_now());

    assert!(caps.can_vote.is_allowed());
    assert!(caps.can_block_dates.is_allowed());
    assert!(caps.can_edit_settings.is_allowed());
    assert!(caps.can_finalize.is_allowed());
    assert!(!caps.can_undo_finalization.is_allowed());
    assert!(caps.can_delete.is_allowed());
    assert!(caps.can_see_scores.is_allowed());
}

#[test]
fn test_organizer_capabilities_when_finalized() {
    let mut event = create_planning_event();
    finalize(&mut event);
    let caps = compute_event_capabilities(&event, Role::Organizer, test_now());

    assert_eq!(caps.can_finalize, Capability::Denied);
    assert_eq!(caps.can_undo_finalization, Capability::Allowed);
}

#[test]
fn test_participant_capabilities() {
    let event = create_planning_event();
    let caps = compute_event_capabilities(&event, Role::Participant, test_now());

    assert!(caps.can_vote.is_allowed());
    assert!(!caps.can_block_dates.is_allowed());
    assert!(!caps.can_edit_settings.is_allowed());
    assert!(!caps.can_finalize.is_allowed());
    assert!(!caps.can_delete.is_allowed());
    assert!(!caps.can_see_scores.is_allowed());
}

#[test]
fn test_voting_deadline_only_closes_participant_voting() {
    let mut event = create_planning_event();
    event.voting_deadline = Some(test_now() - Duration::hours(1));

    let participant = compute_event_capabilities(&event, Role::Participant, test_now());
    let organizer = compute_event_capabilities(&event, Role::Organizer, test_now());

    assert_eq!(participant.can_vote, Capability::Denied);
    assert_eq!(organizer.can_vote, Capability::Allowed);
}

#[test]
fn test_deleted_event_denies_every_action() {
    let mut event = create_planning_event();
    event.status = EventStatus::Deleted;
    let caps = compute_event_capabilities(&event, Role::Organizer, test_now());

    assert_eq!(caps.can_vote, Capability::Denied);
    assert_eq!(caps.can_block_dates, Capability::Denied);
    assert_eq!(caps.can_edit_settings, Capability::Denied);
    assert_eq!(caps.can_finalize, Capability::Denied);
    assert_eq!(caps.can_undo_finalization, Capability::Denied);
    assert_eq!(caps.can_delete, Capability::Denied);
    assert_eq!(caps.can_see_scores, Capability::Allowed);
}

#[test]
fn test_capabilities_serialize_as_booleans() {
    let event = create_planning_event();
    let caps = compute_event_capabilities(&event, Role::Participant, test_now());
    let json = serde_json::to_value(caps).unwrap();

    assert_eq!(json["can_vote"], serde_json::Value::Bool(true));
    assert_eq!(json["can_delete"], serde_json::Value::Bool(false));
}
