// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use timesync_domain::{EventSettings, FinalizeDetails};

/// An organizer's intent against an event, as data only.
///
/// Commands are the only way to request event state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose a date for the event.
    Finalize {
        /// The chosen date.
        date: Date,
        /// Time range and descriptive details.
        details: FinalizeDetails,
    },
    /// Return a finalized event to planning.
    UndoFinalization,
    /// Soft-delete the event.
    Delete,
    /// Add or remove a date from the organizer-blocked set.
    ToggleImpossibleDate {
        /// The date to toggle.
        date: Date,
    },
    /// Replace the editable event settings.
    UpdateSettings(EventSettings),
}

impl Command {
    /// Returns the action name recorded for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Finalize { .. } => "Finalize",
            Self::UndoFinalization => "UndoFinalization",
            Self::Delete => "Delete",
            Self::ToggleImpossibleDate { .. } => "ToggleImpossibleDate",
            Self::UpdateSettings(_) => "UpdateSettings",
        }
    }
}
