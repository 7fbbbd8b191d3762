// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions a caller is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use crate::request_response::{Capability, EventCapabilities};
use time::OffsetDateTime;
use timesync_domain::{Event, EventStatus, Role, is_voting_closed};

/// Computes the caller's capabilities for an event.
///
/// Capabilities depend on:
/// - The caller's role
/// - The event's lifecycle status
/// - The voting deadline (participants only)
#[must_use]
pub fn compute_event_capabilities(
    event: &Event,
    role: Role,
    now: OffsetDateTime,
) -> EventCapabilities {
    // Deleted events are read-only for everyone
    if event.is_deleted() {
        return EventCapabilities {
            can_vote: Capability::Denied,
            can_block_dates: Capability::Denied,
            can_edit_settings: Capability::Denied,
            can_finalize: Capability::Denied,
            can_undo_finalization: Capability::Denied,
            can_delete: Capability::Denied,
            can_see_scores: Capability::from_bool(role.is_organizer()),
        };
    }

    match role {
        Role::Organizer => EventCapabilities {
            can_vote: Capability::Allowed,
            can_block_dates: Capability::Allowed,
            can_edit_settings: Capability::Allowed,
            can_finalize: Capability::from_bool(event.status == EventStatus::Planning),
            can_undo_finalization: Capability::from_bool(event.status == EventStatus::Finalized),
            can_delete: Capability::Allowed,
            can_see_scores: Capability::Allowed,
        },
        Role::Participant => EventCapabilities {
            can_vote: Capability::from_bool(!is_voting_closed(event, now)),
            can_block_dates: Capability::Denied,
            can_edit_settings: Capability::Denied,
            can_finalize: Capability::Denied,
            can_undo_finalization: Capability::Denied,
            can_delete: Capability::Denied,
            can_see_scores: Capability::Denied,
        },
    }
}
