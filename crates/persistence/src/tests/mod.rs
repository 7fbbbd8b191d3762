// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use time::macros::datetime;
use time::OffsetDateTime;
use timesync_domain::{Event, EventId, EventSettings};

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-05-20 12:00 UTC)
}

pub fn create_test_event() -> Event {
    Event::new(
        EventSettings {
            title: String::from("Book club"),
            description: String::from("Chapter 4"),
            organizer_name: String::from("Yui"),
            target_count: Some(5),
            schedule_limit: None,
            voting_deadline: None,
        },
        "token-abc",
        test_now(),
    )
}

pub fn create_persisted_event(persistence: &mut Persistence) -> EventId {
    persistence.create_event(&create_test_event()).unwrap()
}
