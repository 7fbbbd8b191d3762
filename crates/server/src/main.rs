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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod access;
mod live;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::OffsetDateTime;
use timesync_api::{
    AnnouncementResponse, ApiError, CreateEventRequest, CreateEventResponse, DateDetailsResponse,
    DeleteEventRequest, EventSettingsRequest, EventSettingsResponse, EventViewResponse,
    FinalizeRequest, LifecycleOutcome, LifecycleResponse, ShareLinksResponse, SubmitVoteRequest,
    SubmitVoteResponse, ToggleImpossibleDateRequest, ToggleImpossibleDateResponse,
    UndoFinalizationRequest, create_event, delete_event, finalize_event, get_date_details,
    get_event_view, get_finalized_announcement, get_share_links, submit_vote,
    toggle_impossible_date, undo_finalization, update_event_settings,
};
use timesync_domain::EventId;
use timesync_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::access::EventAccess;
use crate::live::{LiveEvent, LiveEventBroadcaster, live_event_handler};

/// `TimeSync` Server - HTTP server for the `TimeSync` group scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Base URL used in share links. Defaults to `http://localhost:<port>`.
    #[arg(long)]
    public_url: Option<String>,
}

impl Args {
    fn public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access. Each write holds the lock for its whole
/// read-validate-write sequence.
#[derive(Clone)]
struct AppState {
    /// The event and response store.
    persistence: Arc<Mutex<Persistence>>,
    /// Fan-out of write facts to live clients.
    live: LiveEventBroadcaster,
    /// Base URL for share links.
    public_url: Arc<str>,
}

impl AppState {
    fn new(persistence: Persistence, public_url: &str) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            live: LiveEventBroadcaster::new(),
            public_url: Arc::from(public_url),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-readable error kind.
    error: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The machine-readable error kind.
    kind: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, kind): (StatusCode, &'static str) = match &err {
            ApiError::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "authentication_failed")
            }
            ApiError::Unauthorized { .. } => (StatusCode::FORBIDDEN, "unauthorized"),
            ApiError::DomainRuleViolation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "domain_rule_violation")
            }
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

/// Broadcasts an event change if the lifecycle action wrote anything.
fn broadcast_if_applied(app_state: &AppState, response: &LifecycleResponse) {
    if response.outcome == LifecycleOutcome::Applied {
        app_state.live.broadcast(&LiveEvent::EventChanged {
            event_id: response.event_id.clone(),
        });
    }
}

/// Handler for POST `/events` endpoint.
///
/// Creates an event and returns its organizer token and share links.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), HttpError> {
    info!(title = %req.title, "Handling create event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse = create_event(
        &mut persistence,
        &req,
        &app_state.public_url,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/events/{event_id}` endpoint.
async fn handle_get_event_view(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
) -> Result<Json<EventViewResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: EventViewResponse = get_event_view(
        &mut persistence,
        &event_id,
        access.token(),
        access.device(),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/dates/{date}` endpoint.
async fn handle_get_date_details(
    AxumState(app_state): AxumState<AppState>,
    Path((event_id, date)): Path<(String, String)>,
    access: EventAccess,
) -> Result<Json<DateDetailsResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: DateDetailsResponse = get_date_details(
        &mut persistence,
        &event_id,
        &date,
        access.token(),
        access.device(),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/votes` endpoint.
async fn handle_submit_vote(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
    Json(req): Json<SubmitVoteRequest>,
) -> Result<Json<SubmitVoteResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);
    info!(event_id = %event_id, date = %req.date, "Handling vote request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitVoteResponse = submit_vote(
        &mut persistence,
        &event_id,
        &req,
        access.token(),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::ResponsesChanged {
        event_id: event_id.to_string(),
    });

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/impossible_dates` endpoint.
async fn handle_toggle_impossible_date(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
    Json(req): Json<ToggleImpossibleDateRequest>,
) -> Result<Json<ToggleImpossibleDateResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);
    info!(
        event_id = %event_id,
        date = %req.date,
        "Handling toggle impossible date request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ToggleImpossibleDateResponse =
        toggle_impossible_date(&mut persistence, &event_id, &req, access.token())?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::EventChanged {
        event_id: event_id.to_string(),
    });

    Ok(Json(response))
}

/// Handler for PUT `/events/{event_id}/settings` endpoint.
async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
    Json(req): Json<EventSettingsRequest>,
) -> Result<Json<EventSettingsResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);
    info!(event_id = %event_id, "Handling update settings request");

    let mut persistence = app_state.persistence.lock().await;
    let response: EventSettingsResponse =
        update_event_settings(&mut persistence, &event_id, &req, access.token())?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::EventChanged {
        event_id: event_id.to_string(),
    });

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/finalize` endpoint.
async fn handle_finalize(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
    Json(req): Json<FinalizeRequest>,
) -> Result<Json<LifecycleResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);
    info!(event_id = %event_id, date = %req.date, "Handling finalize request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LifecycleResponse =
        finalize_event(&mut persistence, &event_id, &req, access.token())?;
    drop(persistence);

    broadcast_if_applied(&app_state, &response);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/undo` endpoint.
async fn handle_undo_finalization(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
    Json(req): Json<UndoFinalizationRequest>,
) -> Result<Json<LifecycleResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);
    info!(
        event_id = %event_id,
        confirmed = req.confirmed,
        "Handling undo finalization request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LifecycleResponse =
        undo_finalization(&mut persistence, &event_id, &req, access.token())?;
    drop(persistence);

    broadcast_if_applied(&app_state, &response);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/delete` endpoint.
async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
    Json(req): Json<DeleteEventRequest>,
) -> Result<Json<LifecycleResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);
    info!(event_id = %event_id, "Handling delete event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LifecycleResponse =
        delete_event(&mut persistence, &event_id, &req, access.token())?;
    drop(persistence);

    broadcast_if_applied(&app_state, &response);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/announcement` endpoint.
async fn handle_get_announcement(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<AnnouncementResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: AnnouncementResponse =
        get_finalized_announcement(&mut persistence, &event_id, &app_state.public_url)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/links` endpoint.
async fn handle_get_share_links(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    access: EventAccess,
) -> Result<Json<ShareLinksResponse>, HttpError> {
    let event_id: EventId = EventId::new(&event_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: ShareLinksResponse = get_share_links(
        &mut persistence,
        &event_id,
        access.token(),
        &app_state.public_url,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route("/events/{event_id}", get(handle_get_event_view))
        .route(
            "/events/{event_id}/dates/{date}",
            get(handle_get_date_details),
        )
        .route("/events/{event_id}/votes", post(handle_submit_vote))
        .route(
            "/events/{event_id}/impossible_dates",
            post(handle_toggle_impossible_date),
        )
        .route("/events/{event_id}/settings", put(handle_update_settings))
        .route("/events/{event_id}/finalize", post(handle_finalize))
        .route("/events/{event_id}/undo", post(handle_undo_finalization))
        .route("/events/{event_id}/delete", post(handle_delete_event))
        .route(
            "/events/{event_id}/announcement",
            get(handle_get_announcement),
        )
        .route("/events/{event_id}/links", get(handle_get_share_links))
        .route("/events/{event_id}/live", get(live_event_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing TimeSync Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let public_url: String = args.public_url();
    info!(public_url = %public_url, "Share links will use this base URL");

    let app_state: AppState = AppState::new(persistence, &public_url);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
