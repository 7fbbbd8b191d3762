// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dates;
mod eligibility;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

use time::{Date, Time};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(time_of_day, Time, "[hour]:[minute]");

pub use dates::{
    format_calendar_date, format_instant, format_time_of_day, parse_calendar_date, parse_instant,
    parse_time_of_day,
};
pub use eligibility::{
    VotingBlock, is_date_blocked_for_voting, is_date_editable_by_organizer, is_voting_closed,
    validate_vote_allowed, voting_block_reason,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    ALL_DAY_TIME_RANGE, AvailabilityStatus, DELETED_EVENT_TITLE, DateAvailability, DeviceId,
    Event, EventId, EventSettings, EventStatus, FinalizeDetails, FinalizedDate, FinalizedInfo,
    ParticipantResponse, ResponseId, Role, describe_time_window,
};
pub use validation::{
    finalize_details_from_form, normalize_optional_text, validate_event_settings,
    validate_finalize_details, validate_user_name,
};
