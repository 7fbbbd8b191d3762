// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::OffsetDateTime;
use time::macros::datetime;
use timesync_domain::{EventId, ResponseId};
use timesync_persistence::Persistence;

use crate::{
    CreateEventRequest, CreateEventResponse, FinalizeRequest, SubmitVoteRequest, create_event,
    submit_vote,
};

pub const PUBLIC_URL: &str = "https://timesync.test";

/// 2024-05-20 12:00 UTC. Dates before 2024-05-20 are in the past.
pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-05-20 12:00 UTC)
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_valid_event_request() -> CreateEventRequest {
    CreateEventRequest {
        title: String::from("Book club"),
        description: String::from("Monthly meetup"),
        organizer_name: String::from("Aki"),
        target_count: Some(5),
        schedule_limit: None,
    }
}

/// A created event, its id and its organizer token.
pub struct TestEvent {
    pub event_id: EventId,
    pub token: String,
}

pub fn setup_test_event(persistence: &mut Persistence) -> TestEvent {
    setup_test_event_with(persistence, &create_valid_event_request())
}

pub fn setup_test_event_with(
    persistence: &mut Persistence,
    request: &CreateEventRequest,
) -> TestEvent {
    let response: CreateEventResponse =
        create_event(persistence, request, PUBLIC_URL, test_now()).expect("Failed to create event");
    TestEvent {
        event_id: EventId::new(&response.event_id),
        token: response.organizer_token,
    }
}

pub fn create_vote_request(device: &str, name: &str, date: &str, status: u8) -> SubmitVoteRequest {
    SubmitVoteRequest {
        device_id: device.to_string(),
        user_name: name.to_string(),
        date: date.to_string(),
        status,
        start_time: None,
        end_time: None,
        comment: None,
    }
}

/// Submits a participant vote that is expected to succeed.
pub fn cast_vote(
    persistence: &mut Persistence,
    event: &TestEvent,
    request: &SubmitVoteRequest,
) -> ResponseId {
    let response = submit_vote(persistence, &event.event_id, request, None, test_now())
        .expect("Vote should be accepted");
    ResponseId::new(response.response_id)
}

pub fn create_finalize_request(date: &str) -> FinalizeRequest {
    FinalizeRequest {
        date: date.to_string(),
        time_range: String::from("19:00〜21:00"),
        place: Some(String::from("Cafe Mori")),
        meeting_place: None,
        url: Some(String::from("https://maps.example/cafe")),
        notes: None,
    }
}
