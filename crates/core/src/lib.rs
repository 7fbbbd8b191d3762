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

mod aggregate;
mod announcement;
mod apply;
mod command;
mod error;
mod ranking;
mod snapshot;
mod state;
mod vote;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use aggregate::{DateScore, VoteDetail, aggregate, availability_score, votes_for_date};
pub use announcement::{format_announcement_date, format_finalized_announcement};
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use ranking::{DEFAULT_TOP_N, RankedDate, rank};
pub use snapshot::EventSnapshot;
pub use state::{EventPatch, TransitionResult};
pub use vote::{ResponseWrite, find_response_for_device, merge_availability, submit_vote};
