// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync event types.

use crate::types::{DeviceId, RoomId, RoomScope, StateId};

/// Events emitted while syncing with the backend.
///
/// # Examples
///
/// ```
/// use smarthome_sync::event::SyncEvent;
/// use smarthome_sync::types::{DeviceId, StateId};
///
/// let failed = SyncEvent::mutation_failed(DeviceId::new(7), StateId::new(4), "timeout", true);
/// assert!(failed.is_failure());
/// assert_eq!(failed.device_id(), Some(DeviceId::new(7)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A room snapshot was merged into the store.
    SnapshotApplied {
        /// The merged room.
        room_id: RoomId,
        /// The room's confirmed version.
        state_id: StateId,
        /// Local edits still waiting for the backend.
        pending: usize,
    },

    /// The room list was refreshed.
    RoomsRefreshed {
        /// Number of rooms that were not known before.
        added: usize,
    },

    /// A poll failed; the previous state is kept.
    PollFailed {
        /// What was being polled.
        scope: RoomScope,
        /// Error description.
        error: String,
    },

    /// A device change reached the backend.
    MutationSent {
        /// The changed device.
        device_id: DeviceId,
        /// Version the change was tagged with.
        state_id: StateId,
    },

    /// A device change could not be sent.
    ///
    /// The control should show a transient failure indication.
    MutationFailed {
        /// The changed device.
        device_id: DeviceId,
        /// Version the change was tagged with.
        state_id: StateId,
        /// Error description.
        error: String,
        /// Whether the local value was rolled back.
        rolled_back: bool,
    },

    /// The backend rejected the session credentials.
    ///
    /// The token has been cleared; the user needs to log in again.
    SessionExpired,
}

impl SyncEvent {
    /// Returns the device this event is about, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<DeviceId> {
        match self {
            Self::MutationSent { device_id, .. } | Self::MutationFailed { device_id, .. } => {
                Some(*device_id)
            }
            _ => None,
        }
    }

    /// Returns `true` for failure events.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::PollFailed { .. } | Self::MutationFailed { .. } | Self::SessionExpired
        )
    }

    /// Creates a mutation failed event.
    #[must_use]
    pub fn mutation_failed(
        device_id: DeviceId,
        state_id: StateId,
        error: impl Into<String>,
        rolled_back: bool,
    ) -> Self {
        Self::MutationFailed {
            device_id,
            state_id,
            error: error.into(),
            rolled_back,
        }
    }

    /// Creates a poll failed event.
    #[must_use]
    pub fn poll_failed(scope: RoomScope, error: impl Into<String>) -> Self {
        Self::PollFailed {
            scope,
            error: error.into(),
        }
    }
}
