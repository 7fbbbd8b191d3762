// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Possession-based organizer authorization.
//!
//! An event has exactly one secret organizer token. Presenting it grants
//! the organizer role for that event; anything else is a participant.
//! There are no accounts, sessions, or expiry.

use timesync_domain::{Event, Role};

use crate::error::AuthError;

/// The phrase an organizer must type to delete an event.
pub const DELETE_CONFIRMATION_PHRASE: &str = "削除";

/// Generates a fresh organizer token.
#[must_use]
pub fn generate_organizer_token() -> String {
    format!(
        "{:016x}{:016x}",
        rand::random::<u64>(),
        rand::random::<u64>()
    )
}

fn token_matches(event: &Event, token: &str) -> bool {
    !token.is_empty() && event.organizer_token == token
}

/// Resolves the caller's role for `event` from an optional token.
///
/// A wrong or missing token yields `Participant`.
#[must_use]
pub fn resolve_role(event: &Event, token: Option<&str>) -> Role {
    match token {
        Some(token) if token_matches(event, token) => Role::Organizer,
        _ => Role::Participant,
    }
}

/// Authorization checks for organizer-only actions.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that `token` is the event's organizer token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token was presented
    /// - The token does not match
    pub fn authorize_organizer(
        event: &Event,
        token: Option<&str>,
        action: &str,
    ) -> Result<(), AuthError> {
        match token {
            None => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: Role::Organizer.as_str().to_string(),
            }),
            Some(token) if token_matches(event, token) => Ok(()),
            Some(_) => Err(AuthError::AuthenticationFailed {
                reason: String::from("Organizer token does not match this event"),
            }),
        }
    }
}
