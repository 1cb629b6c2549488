// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room records and room snapshots.

use serde::Serialize;

use crate::types::{RoomId, StateId};

use super::Device;

/// A room as last known by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Backend identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Room type tag (e.g. `"kitchen"`, `"home"`).
    pub room_type: String,
    /// Highest version the backend has confirmed for this room.
    pub state_id: StateId,
}

impl Room {
    /// Creates a room with no confirmed state yet.
    #[must_use]
    pub fn new(id: RoomId, name: impl Into<String>, room_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            room_type: room_type.into(),
            state_id: StateId::ZERO,
        }
    }

    /// Sets the confirmed state version.
    #[must_use]
    pub fn with_state_id(mut self, state_id: StateId) -> Self {
        self.state_id = state_id;
        self
    }
}

/// One room-details response: the room and every device in it.
///
/// All devices carry the room's `state_id`, the version at which the backend
/// produced their values.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    /// The room, with the backend's current `state_id`.
    pub room: Room,
    /// Devices in the room.
    pub devices: Vec<Device>,
}

impl RoomSnapshot {
    /// Returns the version the backend reported for this room.
    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.room.state_id
    }
}
