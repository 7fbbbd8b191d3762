// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;
use time::{Date, OffsetDateTime, Time};
use timesync_domain::{
    AvailabilityStatus, DateAvailability, DeviceId, Event, EventId, EventSettings,
    ParticipantResponse, ResponseId,
};

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-05-20 12:00 UTC)
}

pub fn create_test_settings() -> EventSettings {
    EventSettings {
        title: String::from("Team dinner"),
        description: String::new(),
        organizer_name: String::from("Ren"),
        target_count: None,
        schedule_limit: None,
        voting_deadline: None,
    }
}

pub fn create_test_event() -> Event {
    let mut event: Event = Event::new(
        create_test_settings(),
        "organizer-token",
        datetime!(2024-05-01 9:00 UTC),
    );
    event.id = Some(EventId::new("evt-1"));
    event
}

pub fn all_day(date: Date, status: AvailabilityStatus) -> DateAvailability {
    DateAvailability::new(date, status, "", None, None)
}

pub fn from_time(date: Date, status: AvailabilityStatus, start: Time) -> DateAvailability {
    DateAvailability::new(date, status, "", Some(start), None)
}

pub fn create_response(id: i64, name: &str, votes: Vec<DateAvailability>) -> ParticipantResponse {
    ParticipantResponse {
        id: Some(ResponseId::new(id)),
        device_id: DeviceId::new(&format!("device-{id}")),
        user_name: name.to_string(),
        availabilities: votes,
        comment: None,
        created_at: test_now(),
        updated_at: test_now(),
    }
}
