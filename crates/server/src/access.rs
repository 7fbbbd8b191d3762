// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller capability extraction for the server.
//!
//! Organizer access is carried by the `?token=` query parameter of the
//! share link. The device identifier used to find "my response" comes from
//! `?device_id=` or, failing that, the `X-Device-Id` header.

use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use timesync_domain::DeviceId;
use tracing::{debug, warn};

/// Header consulted when the query string carries no device id.
pub const DEVICE_ID_HEADER: &str = "X-Device-Id";

#[derive(Debug, Deserialize)]
struct AccessQuery {
    token: Option<String>,
    device_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// What the caller presented for one request.
///
/// Neither value is validated here; a wrong token simply resolves to the
/// participant role downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventAccess {
    pub organizer_token: Option<String>,
    pub device_id: Option<DeviceId>,
}

impl EventAccess {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.organizer_token.as_deref()
    }

    #[must_use]
    pub const fn device(&self) -> Option<&DeviceId> {
        self.device_id.as_ref()
    }
}

impl<S> FromRequestParts<S> for EventAccess
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<AccessQuery>::try_from_uri(&parts.uri).map_err(|e| {
            warn!(error = %e, "Malformed access query string");
            AccessError::MalformedQuery(e.body_text())
        })?;

        let header_device: Option<String> = parts
            .headers
            .get(DEVICE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let access: Self = Self {
            organizer_token: non_blank(query.token),
            device_id: non_blank(query.device_id)
                .or_else(|| non_blank(header_device))
                .map(|id| DeviceId::new(&id)),
        };

        debug!(
            has_token = access.organizer_token.is_some(),
            device_id = ?access.device_id,
            "Extracted event access"
        );

        Ok(access)
    }
}

/// Access extraction errors.
#[derive(Debug)]
pub enum AccessError {
    /// The query string could not be parsed.
    MalformedQuery(String),
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        match self {
            Self::MalformedQuery(reason) => (
                StatusCode::BAD_REQUEST,
                format!("Malformed query string: {reason}"),
            )
                .into_response(),
        }
    }
}
