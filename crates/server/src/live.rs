// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live event views over WebSocket.
//!
//! Every successful write broadcasts a fact naming the event it touched.
//! Each connected client re-reads the complete event from the store and
//! receives a fresh view; nothing is sent as a delta.
//!
//! # Architecture
//!
//! - Facts are broadcast to all connected clients; each client filters
//!   by the event it subscribed to
//! - A client receives a full view on connect and after every change
//! - A missing event is reported as `not_found`
//! - No commands are executed over WebSocket connections

use axum::{
    extract::{
        Path, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::SplitSink, stream::StreamExt};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use timesync_api::{EventViewResponse, build_event_view};
use timesync_domain::{DeviceId, EventId};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::access::EventAccess;

/// Maximum number of facts to buffer in the broadcast channel.
/// A client that falls further behind is sent a fresh view.
const EVENT_BUFFER_SIZE: usize = 100;

/// A fact about a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Event fields changed.
    EventChanged {
        /// The event identifier.
        event_id: String,
    },
    /// A response was created or updated.
    ResponsesChanged {
        /// The event identifier.
        event_id: String,
    },
}

impl LiveEvent {
    #[must_use]
    pub fn event_id(&self) -> &str {
        match self {
            Self::EventChanged { event_id } | Self::ResponsesChanged { event_id } => event_id,
        }
    }
}

/// A message sent to a live client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// The complete current view.
    Snapshot {
        view: Box<EventViewResponse>,
    },
    /// No event exists under the subscribed id.
    NotFound {
        event_id: String,
    },
    /// The store could not be read.
    Error {
        message: String,
    },
}

/// Broadcaster for live event facts.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts a fact to all connected clients.
    ///
    /// If no clients are connected, the fact is silently dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to future facts.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// One client's subscription.
struct LiveSubscription {
    event_id: EventId,
    organizer_token: Option<String>,
    device_id: Option<DeviceId>,
}

/// Reads the store and renders the subscriber's view.
pub(crate) async fn render_view(
    app_state: &AppState,
    event_id: &EventId,
    organizer_token: Option<&str>,
    device_id: Option<&DeviceId>,
) -> LiveMessage {
    let mut persistence = app_state.persistence.lock().await;
    let snapshot = persistence.get_snapshot(event_id);
    drop(persistence);

    match snapshot {
        Ok(Some(snapshot)) => LiveMessage::Snapshot {
            view: Box::new(build_event_view(
                &snapshot,
                organizer_token,
                device_id,
                OffsetDateTime::now_utc(),
            )),
        },
        Ok(None) => LiveMessage::NotFound {
            event_id: event_id.to_string(),
        },
        Err(e) => {
            error!(event_id = %event_id, error = %e, "Failed to read event for live view");
            LiveMessage::Error {
                message: String::from("Failed to read event"),
            }
        }
    }
}

async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &LiveMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            error!(?e, "Failed to serialize live message");
            Ok(())
        }
    }
}

/// Handler for GET `/events/{event_id}/live`.
///
/// Upgrades the connection and streams views of one event.
pub async fn live_event_handler(
    ws: WebSocketUpgrade,
    Path(event_id): Path<String>,
    access: EventAccess,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    let subscription: LiveSubscription = LiveSubscription {
        event_id: EventId::new(&event_id),
        organizer_token: access.organizer_token,
        device_id: access.device_id,
    };
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, subscription))
}

/// Handles an individual WebSocket connection.
///
/// Sends the current view, then a fresh view after every change to the
/// subscribed event, until the client disconnects.
async fn handle_socket(socket: WebSocket, app_state: AppState, subscription: LiveSubscription) {
    info!(event_id = %subscription.event_id, "Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    // Subscribe before the first read so no write can slip between them
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();

    let initial: LiveMessage = render_view(
        &app_state,
        &subscription.event_id,
        subscription.organizer_token.as_deref(),
        subscription.device_id.as_ref(),
    )
    .await;
    if send_message(&mut sender, &initial).await.is_err() {
        warn!("Failed to send initial view");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) if event.event_id() == subscription.event_id.as_str() => {}
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged; sending a fresh view");
                }
                Err(RecvError::Closed) => break,
            }

            let message: LiveMessage = render_view(
                &app_state,
                &subscription.event_id,
                subscription.organizer_token.as_deref(),
                subscription.device_id.as_ref(),
            )
            .await;
            if send_message(&mut sender, &message).await.is_err() {
                // Client disconnected
                break;
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
