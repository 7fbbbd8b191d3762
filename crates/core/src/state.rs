// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;
use time::{Date, OffsetDateTime};
use timesync_domain::{Event, EventStatus, FinalizedDate, FinalizedInfo};

/// A partial update to an event's persisted fields.
///
/// `None` leaves a field untouched. For nullable fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organizer_name: Option<String>,
    pub status: Option<EventStatus>,
    pub impossible_dates: Option<BTreeSet<Date>>,
    pub target_count: Option<Option<u32>>,
    pub schedule_limit: Option<Option<Date>>,
    pub voting_deadline: Option<Option<OffsetDateTime>>,
    pub finalized_date: Option<Option<FinalizedDate>>,
    /// Replaces all four descriptive fields at once.
    pub finalized_info: Option<FinalizedInfo>,
}

impl EventPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Lists the names of the fields this patch writes.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.organizer_name.is_some() {
            fields.push("organizer_name");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.impossible_dates.is_some() {
            fields.push("impossible_dates");
        }
        if self.target_count.is_some() {
            fields.push("target_count");
        }
        if self.schedule_limit.is_some() {
            fields.push("schedule_limit");
        }
        if self.voting_deadline.is_some() {
            fields.push("voting_deadline");
        }
        if self.finalized_date.is_some() {
            fields.push("finalized_date");
        }
        if self.finalized_info.is_some() {
            fields.push("finalized_info");
        }
        fields
    }

    /// Returns a copy of `event` with this patch applied.
    #[must_use]
    pub fn apply_to(&self, event: &Event) -> Event {
        let mut updated: Event = event.clone();
        if let Some(title) = &self.title {
            updated.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            updated.description.clone_from(description);
        }
        if let Some(organizer_name) = &self.organizer_name {
            updated.organizer_name.clone_from(organizer_name);
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        if let Some(impossible_dates) = &self.impossible_dates {
            updated.impossible_dates.clone_from(impossible_dates);
        }
        if let Some(target_count) = self.target_count {
            updated.target_count = target_count;
        }
        if let Some(schedule_limit) = self.schedule_limit {
            updated.schedule_limit = schedule_limit;
        }
        if let Some(voting_deadline) = self.voting_deadline {
            updated.voting_deadline = voting_deadline;
        }
        if let Some(finalized_date) = &self.finalized_date {
            updated.finalized_date.clone_from(finalized_date);
        }
        if let Some(finalized_info) = &self.finalized_info {
            updated.finalized_info.clone_from(finalized_info);
        }
        updated
    }
}

/// The result of a successful event transition.
///
/// `patch` is the single partial-field mutation the store must persist;
/// `new_event` is the event as it reads after that write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The event after the transition.
    pub new_event: Event,
    /// The fields to persist.
    pub patch: EventPatch,
    /// The name of the applied command.
    pub action: &'static str,
}
