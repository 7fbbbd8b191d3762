// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vote aggregation.
//!
//! Folds every participant's per-date votes into one score per date.
//! Aggregation is a pure function of the full response set; it is
//! recomputed from scratch on every change rather than patched.
//!
//! ## Scoring
//!
//! - Base value by status: Hope = 4, Ok = 3, `NeedsAdjustment` = 2
//! - A time-constrained vote loses exactly one point
//! - Organizer-blocked dates contribute nothing and are absent from the result

use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use timesync_domain::{AvailabilityStatus, DateAvailability, ParticipantResponse};

/// One participant's vote as shown in a date's breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDetail {
    /// The participant's display name.
    pub name: String,
    pub status: AvailabilityStatus,
    /// The vote's time range display string.
    pub time: String,
    pub comment: String,
}

impl VoteDetail {
    fn from_vote(name: &str, vote: &DateAvailability) -> Self {
        Self {
            name: name.to_string(),
            status: vote.status,
            time: vote.time_range.clone(),
            comment: vote.comment.clone(),
        }
    }
}

/// Aggregated tallies for one candidate date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateScore {
    /// Sum of every surviving vote's contribution.
    pub score: u32,
    /// Number of surviving votes.
    pub count: u32,
    /// Number of Hope votes.
    pub hope: u32,
    /// Number of Ok votes.
    pub ok: u32,
    /// Votes in response order, then encounter order within a response.
    pub details: Vec<VoteDetail>,
}

impl DateScore {
    fn record(&mut self, name: &str, vote: &DateAvailability) {
        self.score += availability_score(vote);
        self.count += 1;
        match vote.status {
            AvailabilityStatus::Hope => self.hope += 1,
            AvailabilityStatus::Ok => self.ok += 1,
            AvailabilityStatus::NeedsAdjustment => {}
        }
        self.details.push(VoteDetail::from_vote(name, vote));
    }
}

/// Returns the score a single vote contributes to its date.
#[must_use]
pub fn availability_score(vote: &DateAvailability) -> u32 {
    let base: u32 = vote.status.base_score();
    if vote.is_time_constrained() {
        base.saturating_sub(1)
    } else {
        base
    }
}

/// Computes per-date scores across all responses.
///
/// Dates in `impossible_dates` are skipped entirely. A date with no
/// surviving vote has no entry.
#[must_use]
pub fn aggregate(
    responses: &[ParticipantResponse],
    impossible_dates: &BTreeSet<Date>,
) -> BTreeMap<Date, DateScore> {
    let mut scores: BTreeMap<Date, DateScore> = BTreeMap::new();

    for response in responses {
        for vote in &response.availabilities {
            if impossible_dates.contains(&vote.date) {
                continue;
            }
            scores
                .entry(vote.date)
                .or_default()
                .record(&response.user_name, vote);
        }
    }

    scores
}

/// Lists every vote for `date` in response order.
///
/// Impossible dates are not filtered; this is a display view.
#[must_use]
pub fn votes_for_date(responses: &[ParticipantResponse], date: Date) -> Vec<VoteDetail> {
    responses
        .iter()
        .flat_map(|response| {
            response
                .availabilities
                .iter()
                .filter(move |vote| vote.date == date)
                .map(|vote| VoteDetail::from_vote(&response.user_name, vote))
        })
        .collect()
}
