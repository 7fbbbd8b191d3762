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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthorizationService, DELETE_CONFIRMATION_PHRASE, generate_organizer_token, resolve_role,
};
pub use capabilities::compute_event_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    build_event_view, create_event, delete_event, finalize_event, get_date_details,
    get_event_view, get_finalized_announcement, get_share_links, organizer_link,
    participant_link, submit_vote, toggle_impossible_date, undo_finalization,
    update_event_settings,
};
pub use request_response::{
    AnnouncementResponse, CalendarDateInfo, Capability, CreateEventRequest, CreateEventResponse,
    DateDetailsResponse, DeleteEventRequest, EventCapabilities, EventInfo, EventSettingsRequest,
    EventSettingsResponse, EventViewResponse, FinalizationInfo, FinalizeRequest,
    LifecycleOutcome, LifecycleResponse, RankedDateInfo, RequestParseError, ResponseInfo,
    ShareLinksResponse, SubmitVoteRequest, SubmitVoteResponse, ToggleImpossibleDateRequest,
    ToggleImpossibleDateResponse, UndoFinalizationRequest, VoteInfo,
};
