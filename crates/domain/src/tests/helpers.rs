// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Event, EventSettings};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub fn create_test_settings() -> EventSettings {
    EventSettings {
        title: String::from("Summer party"),
        description: String::from("Somewhere near the station"),
        organizer_name: String::from("Aki"),
        target_count: Some(6),
        schedule_limit: None,
        voting_deadline: None,
    }
}

pub fn create_test_event() -> Event {
    Event::new(
        create_test_settings(),
        "organizer-secret",
        datetime!(2024-05-01 9:00 UTC),
    )
}

pub fn create_test_event_with_limit(limit: Date) -> Event {
    let mut event: Event = create_test_event();
    event.schedule_limit = Some(limit);
    event
}

pub fn create_test_event_with_deadline(deadline: OffsetDateTime) -> Event {
    let mut event: Event = create_test_event();
    event.voting_deadline = Some(deadline);
    event
}
