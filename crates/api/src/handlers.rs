// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler reads the complete event snapshot, checks the caller's
//! capability, runs the pure core logic, and persists at most one write.

use std::collections::{BTreeMap, BTreeSet};
use time::{Date, OffsetDateTime};
use timesync::{
    Command, DEFAULT_TOP_N, DateScore, EventSnapshot, RankedDate, ResponseWrite,
    TransitionResult, apply, format_finalized_announcement,
};
use timesync_domain::{
    DateAvailability, DeviceId, Event, EventId, EventSettings, EventStatus, ParticipantResponse,
    ResponseId, Role, format_calendar_date, format_instant, is_date_blocked_for_voting,
    validate_event_settings, voting_block_reason,
};
use timesync_persistence::Persistence;
use tracing::{debug, info, warn};

use crate::auth::{
    AuthorizationService, DELETE_CONFIRMATION_PHRASE, generate_organizer_token, resolve_role,
};
use crate::capabilities::compute_event_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AnnouncementResponse, CalendarDateInfo, CreateEventRequest, CreateEventResponse,
    DateDetailsResponse, DeleteEventRequest, EventInfo, EventSettingsRequest,
    EventSettingsResponse, EventViewResponse, FinalizationInfo, FinalizeRequest,
    LifecycleOutcome, LifecycleResponse, RankedDateInfo, ResponseInfo, ShareLinksResponse,
    SubmitVoteRequest, SubmitVoteResponse, ToggleImpossibleDateRequest,
    ToggleImpossibleDateResponse, UndoFinalizationRequest, VoteInfo, parse_date_field,
};

// ========================================================================
// Links
// ========================================================================

/// Builds the share link that grants participant capabilities.
#[must_use]
pub fn participant_link(public_url: &str, event_id: &EventId) -> String {
    format!("{}/events/{event_id}", public_url.trim_end_matches('/'))
}

/// Builds the share link that grants organizer capabilities.
#[must_use]
pub fn organizer_link(public_url: &str, event_id: &EventId, organizer_token: &str) -> String {
    format!(
        "{}?token={organizer_token}",
        participant_link(public_url, event_id)
    )
}

// ========================================================================
// Shared helpers
// ========================================================================

fn event_not_found(event_id: &EventId) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Event"),
        message: format!("Event '{event_id}' does not exist"),
    }
}

fn load_snapshot(
    persistence: &mut Persistence,
    event_id: &EventId,
) -> Result<EventSnapshot, ApiError> {
    persistence
        .get_snapshot(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(event_id))
}

fn load_event(persistence: &mut Persistence, event_id: &EventId) -> Result<Event, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(event_id))
}

/// Authorizes the organizer, applies `command`, and persists its patch.
fn apply_organizer_command(
    persistence: &mut Persistence,
    event: &Event,
    event_id: &EventId,
    organizer_token: Option<&str>,
    command: Command,
) -> Result<TransitionResult, ApiError> {
    let action: &'static str = command.name();

    // Enforce authorization before executing command
    AuthorizationService::authorize_organizer(event, organizer_token, action).inspect_err(
        |err| warn!(event_id = %event_id, action, error = %err, "Organizer action refused"),
    )?;

    let transition_result: TransitionResult = apply(event, command).map_err(|err| {
        warn!(event_id = %event_id, action, error = %err, "Event transition rejected");
        translate_core_error(err)
    })?;

    persistence
        .update_event(event_id, &transition_result.patch)
        .map_err(translate_persistence_error)?;

    info!(
        event_id = %event_id,
        action,
        fields = ?transition_result.patch.changed_fields(),
        "Applied event transition"
    );

    Ok(transition_result)
}

fn lifecycle_response(
    event_id: &EventId,
    status: EventStatus,
    outcome: LifecycleOutcome,
    message: &str,
) -> LifecycleResponse {
    LifecycleResponse {
        event_id: event_id.to_string(),
        status: status.as_str().to_string(),
        outcome,
        message: message.to_string(),
    }
}

// ========================================================================
// Event creation
// ========================================================================

/// Creates a new event and issues its organizer token.
///
/// # Errors
///
/// Returns an error if:
/// - The title or organizer name is blank
/// - The schedule limit is malformed
/// - The event cannot be stored
pub fn create_event(
    persistence: &mut Persistence,
    request: &CreateEventRequest,
    public_url: &str,
    now: OffsetDateTime,
) -> Result<CreateEventResponse, ApiError> {
    let settings: EventSettings = request.to_settings()?;
    validate_event_settings(&settings).map_err(translate_domain_error)?;

    let organizer_token: String = generate_organizer_token();
    let event: Event = Event::new(settings, &organizer_token, now);
    let event_id: EventId = persistence
        .create_event(&event)
        .map_err(translate_persistence_error)?;

    info!(event_id = %event_id, title = %event.title, "Created event");

    Ok(CreateEventResponse {
        participant_link: participant_link(public_url, &event_id),
        organizer_link: organizer_link(public_url, &event_id, &organizer_token),
        event_id: event_id.to_string(),
        organizer_token,
        message: format!("Created event '{}'", event.title),
    })
}

// ========================================================================
// Views
// ========================================================================

fn event_info(event: &Event) -> EventInfo {
    EventInfo {
        event_id: event.id.as_ref().map(EventId::to_string).unwrap_or_default(),
        title: event.title.clone(),
        description: event.description.clone(),
        organizer_name: event.organizer_name.clone(),
        status: event.status.as_str().to_string(),
        target_count: event.target_count,
        schedule_limit: event.schedule_limit.map(format_calendar_date),
        voting_deadline: event.voting_deadline.map(format_instant),
        impossible_dates: event
            .impossible_dates
            .iter()
            .copied()
            .map(format_calendar_date)
            .collect(),
        finalized: event
            .finalized_date
            .as_ref()
            .map(|finalized| FinalizationInfo {
                date: format_calendar_date(finalized.date),
                time_range: finalized.time_range.clone(),
                place: event.finalized_info.place.clone(),
                meeting_place: event.finalized_info.meeting_place.clone(),
                url: event.finalized_info.url.clone(),
                notes: event.finalized_info.notes.clone(),
            }),
        created_at: format_instant(event.created_at),
    }
}

fn ranked_date_info(ranked: &RankedDate, role: Role) -> RankedDateInfo {
    RankedDateInfo {
        rank: ranked.rank,
        date: format_calendar_date(ranked.date),
        is_top: ranked.is_top(),
        score: role.is_organizer().then_some(ranked.score.score),
        count: ranked.score.count,
        hope: ranked.score.hope,
        ok: ranked.score.ok,
    }
}

/// Summarizes every date that has a surviving vote or an organizer block.
///
/// Blocked dates carry zero tallies since aggregation skips them.
fn calendar_dates(
    snapshot: &EventSnapshot,
    role: Role,
    now: OffsetDateTime,
) -> Vec<CalendarDateInfo> {
    let scores: BTreeMap<Date, DateScore> = snapshot.scores();
    let dates: BTreeSet<Date> = scores
        .keys()
        .chain(snapshot.event.impossible_dates.iter())
        .copied()
        .collect();

    dates
        .into_iter()
        .map(|date| {
            let tally: Option<&DateScore> = scores.get(&date);
            CalendarDateInfo {
                date: format_calendar_date(date),
                impossible: snapshot.event.is_impossible(date),
                blocked: is_date_blocked_for_voting(
                    date,
                    &snapshot.event,
                    role.is_organizer(),
                    now,
                ),
                score: role
                    .is_organizer()
                    .then(|| tally.map_or(0, |score| score.score)),
                count: tally.map_or(0, |score| score.count),
                hope: tally.map_or(0, |score| score.hope),
                ok: tally.map_or(0, |score| score.ok),
            }
        })
        .collect()
}

fn response_info(response: &ParticipantResponse) -> ResponseInfo {
    ResponseInfo {
        response_id: response.id.map(|id| id.value()),
        user_name: response.user_name.clone(),
        availabilities: response.availabilities.clone(),
        comment: response.comment.clone(),
        updated_at: format_instant(response.updated_at),
    }
}

/// Builds the complete view of an event for one caller.
///
/// Pure; the live stream recomputes it from a fresh snapshot after
/// every change.
#[must_use]
pub fn build_event_view(
    snapshot: &EventSnapshot,
    organizer_token: Option<&str>,
    device_id: Option<&DeviceId>,
    now: OffsetDateTime,
) -> EventViewResponse {
    let role: Role = resolve_role(&snapshot.event, organizer_token);

    EventViewResponse {
        event: event_info(&snapshot.event),
        role: role.as_str().to_string(),
        voting_closed: snapshot.is_voting_closed(now),
        capabilities: compute_event_capabilities(&snapshot.event, role, now),
        participant_count: snapshot.participant_count(),
        ranking: snapshot
            .ranking(DEFAULT_TOP_N)
            .iter()
            .map(|ranked| ranked_date_info(ranked, role))
            .collect(),
        calendar: calendar_dates(snapshot, role, now),
        my_response: device_id
            .and_then(|device_id| snapshot.response_for_device(device_id))
            .map(response_info),
    }
}

/// Reads the complete view of an event.
///
/// Deleted events are still viewable.
///
/// # Errors
///
/// Returns an error if the event does not exist or the read fails.
pub fn get_event_view(
    persistence: &mut Persistence,
    event_id: &EventId,
    organizer_token: Option<&str>,
    device_id: Option<&DeviceId>,
    now: OffsetDateTime,
) -> Result<EventViewResponse, ApiError> {
    let snapshot: EventSnapshot = load_snapshot(persistence, event_id)?;
    debug!(
        event_id = %event_id,
        responses = snapshot.responses.len(),
        "Loaded event view"
    );
    Ok(build_event_view(&snapshot, organizer_token, device_id, now))
}

/// Lists every vote for one date, including organizer-blocked dates.
///
/// # Errors
///
/// Returns an error if:
/// - The date is malformed
/// - The event does not exist
pub fn get_date_details(
    persistence: &mut Persistence,
    event_id: &EventId,
    date: &str,
    organizer_token: Option<&str>,
    device_id: Option<&DeviceId>,
    now: OffsetDateTime,
) -> Result<DateDetailsResponse, ApiError> {
    let date: Date = parse_date_field("date", date)?;
    let snapshot: EventSnapshot = load_snapshot(persistence, event_id)?;
    let role: Role = resolve_role(&snapshot.event, organizer_token);

    let block_reason: Option<String> = if snapshot.event.is_deleted() {
        Some(String::from("event_deleted"))
    } else if !role.is_organizer() && snapshot.is_voting_closed(now) {
        Some(String::from("voting_deadline"))
    } else {
        voting_block_reason(date, &snapshot.event, role.is_organizer(), now)
            .map(|reason| reason.as_str().to_string())
    };

    let votes: Vec<VoteInfo> = snapshot
        .votes_for_date(date)
        .into_iter()
        .map(|detail| VoteInfo {
            name: detail.name,
            status: detail.status.code(),
            mark: detail.status.mark().to_string(),
            time: detail.time,
            comment: detail.comment,
        })
        .collect();

    let score: Option<u32> = if role.is_organizer() {
        snapshot.scores().get(&date).map(|score| score.score)
    } else {
        None
    };

    Ok(DateDetailsResponse {
        date: format_calendar_date(date),
        impossible: snapshot.event.is_impossible(date),
        block_reason,
        votes,
        my_vote: device_id
            .and_then(|device_id| snapshot.existing_vote(device_id, date))
            .cloned(),
        score,
    })
}

// ========================================================================
// Votes
// ========================================================================

/// Records one vote from a device.
///
/// The first vote from a device creates its response; later votes replace
/// that device's entry for the date and overwrite the display name.
///
/// # Errors
///
/// Returns an error if:
/// - The request is malformed
/// - The event does not exist or is deleted
/// - A participant votes after the deadline or on a blocked date
/// - The user name is blank
pub fn submit_vote(
    persistence: &mut Persistence,
    event_id: &EventId,
    request: &SubmitVoteRequest,
    organizer_token: Option<&str>,
    now: OffsetDateTime,
) -> Result<SubmitVoteResponse, ApiError> {
    let device_id: DeviceId = request.device()?;
    let vote: DateAvailability = request.to_availability()?;
    let snapshot: EventSnapshot = load_snapshot(persistence, event_id)?;
    let role: Role = resolve_role(&snapshot.event, organizer_token);
    let date: String = format_calendar_date(vote.date);

    let write: ResponseWrite = snapshot
        .prepare_vote(&device_id, vote, &request.user_name, role, now)
        .map_err(|err| {
            warn!(
                event_id = %event_id,
                device_id = %device_id,
                date = %date,
                error = %err,
                "Vote rejected"
            );
            translate_core_error(err)
        })?;
    let created: bool = matches!(write, ResponseWrite::Create(_));

    let response_id: ResponseId = persistence
        .apply_response_write(event_id, &write)
        .map_err(translate_persistence_error)?;

    info!(
        event_id = %event_id,
        response_id = %response_id,
        date = %date,
        created,
        "Recorded vote"
    );

    Ok(SubmitVoteResponse {
        response_id: response_id.value(),
        created,
        message: format!("Saved vote for {date}"),
    })
}

// ========================================================================
// Organizer actions
// ========================================================================

/// Adds a date to the blocked set, or removes it if already blocked.
///
/// # Errors
///
/// Returns an error if:
/// - The date is malformed
/// - The caller is not the organizer
/// - The event does not exist or is deleted
pub fn toggle_impossible_date(
    persistence: &mut Persistence,
    event_id: &EventId,
    request: &ToggleImpossibleDateRequest,
    organizer_token: Option<&str>,
) -> Result<ToggleImpossibleDateResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let event: Event = load_event(persistence, event_id)?;

    let transition_result: TransitionResult = apply_organizer_command(
        persistence,
        &event,
        event_id,
        organizer_token,
        Command::ToggleImpossibleDate { date },
    )?;

    Ok(ToggleImpossibleDateResponse {
        date: format_calendar_date(date),
        impossible: transition_result.new_event.is_impossible(date),
    })
}

/// Replaces the event's editable settings.
///
/// # Errors
///
/// Returns an error if:
/// - A date field is malformed
/// - The title or organizer name is blank
/// - The caller is not the organizer
/// - The event does not exist or is deleted
pub fn update_event_settings(
    persistence: &mut Persistence,
    event_id: &EventId,
    request: &EventSettingsRequest,
    organizer_token: Option<&str>,
) -> Result<EventSettingsResponse, ApiError> {
    let settings: EventSettings = request.to_settings()?;
    let event: Event = load_event(persistence, event_id)?;

    let transition_result: TransitionResult = apply_organizer_command(
        persistence,
        &event,
        event_id,
        organizer_token,
        Command::UpdateSettings(settings),
    )?;

    Ok(EventSettingsResponse {
        event_id: event_id.to_string(),
        message: format!(
            "Updated settings for '{}'",
            transition_result.new_event.title
        ),
    })
}

/// Finalizes the event on the chosen date.
///
/// # Errors
///
/// Returns an error if:
/// - The date is malformed or the time range is blank
/// - The caller is not the organizer
/// - The event is not in planning
pub fn finalize_event(
    persistence: &mut Persistence,
    event_id: &EventId,
    request: &FinalizeRequest,
    organizer_token: Option<&str>,
) -> Result<LifecycleResponse, ApiError> {
    let (date, details) = request.to_command_parts()?;
    let event: Event = load_event(persistence, event_id)?;

    let transition_result: TransitionResult = apply_organizer_command(
        persistence,
        &event,
        event_id,
        organizer_token,
        Command::Finalize { date, details },
    )?;

    Ok(lifecycle_response(
        event_id,
        transition_result.new_event.status,
        LifecycleOutcome::Applied,
        &format!("Finalized on {}", format_calendar_date(date)),
    ))
}

/// Returns a finalized event to planning.
///
/// An unconfirmed request is aborted without writing.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not the organizer
/// - The event is not finalized
pub fn undo_finalization(
    persistence: &mut Persistence,
    event_id: &EventId,
    request: &UndoFinalizationRequest,
    organizer_token: Option<&str>,
) -> Result<LifecycleResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let command: Command = Command::UndoFinalization;
    AuthorizationService::authorize_organizer(&event, organizer_token, command.name())?;

    if !request.confirmed {
        debug!(event_id = %event_id, "Undo finalization declined");
        return Ok(lifecycle_response(
            event_id,
            event.status,
            LifecycleOutcome::Aborted,
            "Undo was not confirmed; nothing changed",
        ));
    }

    let transition_result: TransitionResult =
        apply_organizer_command(persistence, &event, event_id, organizer_token, command)?;

    Ok(lifecycle_response(
        event_id,
        transition_result.new_event.status,
        LifecycleOutcome::Applied,
        "Finalization undone; voting is open again",
    ))
}

/// Soft-deletes the event.
///
/// The request must carry the delete confirmation phrase exactly, with no
/// surrounding whitespace; anything else aborts without writing.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not the organizer
/// - The event is already deleted
pub fn delete_event(
    persistence: &mut Persistence,
    event_id: &EventId,
    request: &DeleteEventRequest,
    organizer_token: Option<&str>,
) -> Result<LifecycleResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let command: Command = Command::Delete;
    AuthorizationService::authorize_organizer(&event, organizer_token, command.name())?;

    if request.confirmation != DELETE_CONFIRMATION_PHRASE {
        debug!(event_id = %event_id, "Delete confirmation phrase did not match");
        return Ok(lifecycle_response(
            event_id,
            event.status,
            LifecycleOutcome::Aborted,
            "Confirmation phrase did not match; nothing changed",
        ));
    }

    let transition_result: TransitionResult =
        apply_organizer_command(persistence, &event, event_id, organizer_token, command)?;

    Ok(lifecycle_response(
        event_id,
        transition_result.new_event.status,
        LifecycleOutcome::Applied,
        "Event deleted",
    ))
}

// ========================================================================
// Sharing
// ========================================================================

/// Builds the announcement text for a finalized event.
///
/// # Errors
///
/// Returns an error if the event does not exist or is not finalized.
pub fn get_finalized_announcement(
    persistence: &mut Persistence,
    event_id: &EventId,
    public_url: &str,
) -> Result<AnnouncementResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let not_finalized = || ApiError::ResourceNotFound {
        resource_type: String::from("Announcement"),
        message: format!("Event '{event_id}' has not been finalized"),
    };

    if event.status != EventStatus::Finalized {
        return Err(not_finalized());
    }

    let text: String =
        format_finalized_announcement(&event, &participant_link(public_url, event_id))
            .ok_or_else(not_finalized)?;

    Ok(AnnouncementResponse { text })
}

/// Returns the event's share links.
///
/// The organizer link is only disclosed to the organizer.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn get_share_links(
    persistence: &mut Persistence,
    event_id: &EventId,
    organizer_token: Option<&str>,
    public_url: &str,
) -> Result<ShareLinksResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let role: Role = resolve_role(&event, organizer_token);

    Ok(ShareLinksResponse {
        participant_link: participant_link(public_url, event_id),
        organizer_link: role
            .is_organizer()
            .then(|| organizer_link(public_url, event_id, &event.organizer_token)),
    })
}
