// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::live::{LiveMessage, render_view};
use axum::{body::Body, http::Request};
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_PUBLIC_URL: &str = "https://timesync.test";

/// A date that stays in the future for any realistic test run.
const FUTURE_DATE: &str = "2099-06-01";

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, TEST_PUBLIC_URL)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Creates an event and returns its id and organizer token.
async fn create_test_event(app: &Router) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/events",
        Some(json!({
            "title": "Book club",
            "description": "Monthly meetup",
            "organizer_name": "Aki",
            "target_count": 4
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response: CreateEventResponse = serde_json::from_value(body).unwrap();
    (response.event_id, response.organizer_token)
}

fn vote_body(device: &str, name: &str, date: &str, status: u8) -> Value {
    json!({
        "device_id": device,
        "user_name": name,
        "date": date,
        "status": status
    })
}

#[tokio::test]
async fn test_create_event_returns_links() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(json!({ "title": "Dinner", "organizer_name": "Aki" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let response: CreateEventResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        response.participant_link,
        format!("{TEST_PUBLIC_URL}/events/{}", response.event_id)
    );
    assert!(
        response
            .organizer_link
            .ends_with(&format!("?token={}", response.organizer_token))
    );
}

#[tokio::test]
async fn test_create_event_without_title_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(json!({ "title": "  ", "organizer_name": "Aki" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, "GET", "/events/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_vote_then_view_own_response() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", FUTURE_DATE, 2)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], true);

    let (status, view) = send(
        &app,
        "GET",
        &format!("/events/{event_id}?device_id=device-1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["role"], "participant");
    assert_eq!(view["participant_count"], 1);
    assert_eq!(view["my_response"]["user_name"], "Aki");
    assert_eq!(view["ranking"][0]["date"], FUTURE_DATE);
    assert_eq!(view["ranking"][0]["score"], Value::Null);
}

#[tokio::test]
async fn test_device_id_header_is_accepted() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;
    send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-9", "Ben", FUTURE_DATE, 1)),
    )
    .await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/events/{event_id}"))
        .header(crate::access::DEVICE_ID_HEADER, "device-9")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let view: Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_eq!(view["my_response"]["user_name"], "Ben");
}

#[tokio::test]
async fn test_organizer_view_includes_scores() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, token) = create_test_event(&app).await;
    send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", FUTURE_DATE, 2)),
    )
    .await;

    let (status, view) = send(
        &app,
        "GET",
        &format!("/events/{event_id}?token={token}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["role"], "organizer");
    assert_eq!(view["ranking"][0]["score"], 4);
    assert_eq!(view["capabilities"]["can_finalize"], true);
}

#[tokio::test]
async fn test_vote_on_past_date_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", "2000-01-01", 2)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "domain_rule_violation");
}

#[tokio::test]
async fn test_vote_with_malformed_date_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;

    let (status, _body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", "tomorrow", 2)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_finalize_without_token_is_forbidden() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/finalize"),
        Some(json!({ "date": FUTURE_DATE, "time_range": "19:00〜21:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_finalize_with_wrong_token_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;

    let (status, _body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/finalize?token=guess"),
        Some(json!({ "date": FUTURE_DATE, "time_range": "19:00〜21:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_finalize_then_announcement() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, token) = create_test_event(&app).await;

    let (status, _body) =
        send(&app, "GET", &format!("/events/{event_id}/announcement"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/finalize?token={token}"),
        Some(json!({
            "date": FUTURE_DATE,
            "time_range": "19:00〜21:00",
            "place": "Cafe Mori"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["status"], "finalized");

    let (status, body) =
        send(&app, "GET", &format!("/events/{event_id}/announcement"), None).await;
    assert_eq!(status, StatusCode::OK);
    let text = body["text"].as_str().unwrap();
    assert!(text.starts_with("【Book club】"));
    assert!(text.contains("📍 会場: Cafe Mori"));
    assert!(text.contains(&format!("🔗 {TEST_PUBLIC_URL}/events/{event_id}")));
}

#[tokio::test]
async fn test_undo_requires_confirmation() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, token) = create_test_event(&app).await;
    send(
        &app,
        "POST",
        &format!("/events/{event_id}/finalize?token={token}"),
        Some(json!({ "date": FUTURE_DATE, "time_range": "終日" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/undo?token={token}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "aborted");
    assert_eq!(body["status"], "finalized");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/undo?token={token}"),
        Some(json!({ "confirmed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["status"], "planning");
}

#[tokio::test]
async fn test_delete_flow() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, token) = create_test_event(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/delete?token={token}"),
        Some(json!({ "confirmation": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "aborted");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/delete?token={token}"),
        Some(json!({ "confirmation": "削除" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (status, view) = send(&app, "GET", &format!("/events/{event_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["event"]["status"], "deleted");
    assert_eq!(view["event"]["title"], "削除されたイベント");

    let (status, _body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", FUTURE_DATE, 2)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_toggle_and_settings() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, token) = create_test_event(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/events/{event_id}/impossible_dates?token={token}"),
        Some(json!({ "date": FUTURE_DATE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["impossible"], true);

    let (status, _body) = send(
        &app,
        "PUT",
        &format!("/events/{event_id}/settings?token={token}"),
        Some(json!({
            "title": "Summer reading",
            "organizer_name": "Aki",
            "voting_deadline": "2099-05-31T12:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_status, view) = send(&app, "GET", &format!("/events/{event_id}"), None).await;
    assert_eq!(view["event"]["title"], "Summer reading");
    assert_eq!(view["event"]["impossible_dates"][0], FUTURE_DATE);
    assert_eq!(view["event"]["voting_deadline"], "2099-05-31T12:00:00Z");
    assert_eq!(view["voting_closed"], false);
}

#[tokio::test]
async fn test_date_details_route() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, _token) = create_test_event(&app).await;
    send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(json!({
            "device_id": "device-1",
            "user_name": "Aki",
            "date": FUTURE_DATE,
            "status": 1,
            "start_time": "14:00",
            "end_time": "16:00"
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/events/{event_id}/dates/{FUTURE_DATE}?device_id=device-1"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"][0]["mark"], "〇");
    assert_eq!(body["votes"][0]["time"], "14:00〜16:00");
    assert_eq!(body["my_vote"]["status"], 1);
}

#[tokio::test]
async fn test_share_links_route() {
    let app: Router = build_router(create_test_app_state());
    let (event_id, token) = create_test_event(&app).await;

    let (_status, participant) =
        send(&app, "GET", &format!("/events/{event_id}/links"), None).await;
    assert_eq!(participant["organizer_link"], Value::Null);

    let (_status, organizer) = send(
        &app,
        "GET",
        &format!("/events/{event_id}/links?token={token}"),
        None,
    )
    .await;
    let links: ShareLinksResponse = serde_json::from_value(organizer).unwrap();
    assert_eq!(
        links.organizer_link,
        Some(format!("{TEST_PUBLIC_URL}/events/{event_id}?token={token}"))
    );
}

#[tokio::test]
async fn test_writes_broadcast_live_events() {
    let app_state: AppState = create_test_app_state();
    let mut rx = app_state.live.subscribe();
    let app: Router = build_router(app_state.clone());
    let (event_id, token) = create_test_event(&app).await;

    send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", FUTURE_DATE, 2)),
    )
    .await;
    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::ResponsesChanged {
            event_id: event_id.clone()
        }
    );

    // A declined confirmation writes nothing and broadcasts nothing
    send(
        &app,
        "POST",
        &format!("/events/{event_id}/delete?token={token}"),
        Some(json!({ "confirmation": "no" })),
    )
    .await;
    assert!(rx.try_recv().is_err());

    send(
        &app,
        "POST",
        &format!("/events/{event_id}/impossible_dates?token={token}"),
        Some(json!({ "date": FUTURE_DATE })),
    )
    .await;
    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::EventChanged { event_id }
    );
}

#[tokio::test]
async fn test_rejected_write_does_not_broadcast() {
    let app_state: AppState = create_test_app_state();
    let mut rx = app_state.live.subscribe();
    let app: Router = build_router(app_state.clone());
    let (event_id, _token) = create_test_event(&app).await;

    send(
        &app,
        "POST",
        &format!("/events/{event_id}/impossible_dates"),
        Some(json!({ "date": FUTURE_DATE })),
    )
    .await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_render_view_for_missing_event() {
    let app_state: AppState = create_test_app_state();

    let message = render_view(&app_state, &EventId::new("missing"), None, None).await;

    assert!(matches!(
        message,
        LiveMessage::NotFound { ref event_id } if event_id == "missing"
    ));
}

#[tokio::test]
async fn test_render_view_reflects_latest_state() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    let (event_id, _token) = create_test_event(&app).await;
    send(
        &app,
        "POST",
        &format!("/events/{event_id}/votes"),
        Some(vote_body("device-1", "Aki", FUTURE_DATE, 2)),
    )
    .await;

    let message = render_view(&app_state, &EventId::new(&event_id), None, None).await;

    match message {
        LiveMessage::Snapshot { view } => {
            assert_eq!(view.participant_count, 1);
            assert_eq!(view.event.title, "Book club");
        }
        other => panic!("Expected Snapshot, got {other:?}"),
    }
}
