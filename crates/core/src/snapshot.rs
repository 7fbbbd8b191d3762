// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::aggregate::{DateScore, VoteDetail, aggregate, votes_for_date};
use crate::error::CoreError;
use crate::ranking::{RankedDate, rank};
use crate::vote::{ResponseWrite, find_response_for_device, submit_vote};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};
use timesync_domain::{
    DateAvailability, DeviceId, Event, ParticipantResponse, Role, is_voting_closed,
    validate_vote_allowed,
};

/// The complete state of one event as last read from the store.
///
/// Every derived view is computed from the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSnapshot {
    pub event: Event,
    /// Responses in store order.
    pub responses: Vec<ParticipantResponse>,
}

impl EventSnapshot {
    #[must_use]
    pub const fn new(event: Event, responses: Vec<ParticipantResponse>) -> Self {
        Self { event, responses }
    }

    /// Per-date scores, excluding impossible dates.
    #[must_use]
    pub fn scores(&self) -> BTreeMap<Date, DateScore> {
        aggregate(&self.responses, &self.event.impossible_dates)
    }

    /// The top `top_n` dates by score.
    #[must_use]
    pub fn ranking(&self, top_n: usize) -> Vec<RankedDate> {
        rank(&self.scores(), top_n)
    }

    /// Every vote for `date`, including votes on impossible dates.
    #[must_use]
    pub fn votes_for_date(&self, date: Date) -> Vec<VoteDetail> {
        votes_for_date(&self.responses, date)
    }

    #[must_use]
    pub fn response_for_device(&self, device_id: &DeviceId) -> Option<&ParticipantResponse> {
        find_response_for_device(&self.responses, device_id)
    }

    /// The device's current vote for `date`, used to prefill an edit.
    #[must_use]
    pub fn existing_vote(&self, device_id: &DeviceId, date: Date) -> Option<&DateAvailability> {
        self.response_for_device(device_id)
            .and_then(|response| response.availability_for(date))
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn is_voting_closed(&self, now: OffsetDateTime) -> bool {
        is_voting_closed(&self.event, now)
    }

    /// Validates a vote against the event and builds the resulting write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The event is deleted
    /// - A participant votes after the deadline or on a blocked date
    /// - The user name is blank
    pub fn prepare_vote(
        &self,
        device_id: &DeviceId,
        vote: DateAvailability,
        user_name: &str,
        role: Role,
        now: OffsetDateTime,
    ) -> Result<ResponseWrite, CoreError> {
        validate_vote_allowed(vote.date, &self.event, role.is_organizer(), now)?;
        submit_vote(&self.responses, device_id, vote, user_name, now)
    }
}
