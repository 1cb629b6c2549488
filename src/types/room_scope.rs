// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addressing of room-details endpoints.

use std::fmt;

use super::RoomId;

/// Which room-details endpoint to fetch.
///
/// The backend exposes two synthetic rooms besides the numbered ones:
/// "home", aggregating whole-house switches and indoor sensors, and
/// "outside", holding outdoor sensors.
///
/// # Examples
///
/// ```
/// use smarthome_sync::types::{RoomId, RoomScope};
///
/// assert_eq!(RoomScope::Home.path(), "/api/rooms/home");
/// assert_eq!(RoomScope::Room(RoomId::new(4)).path(), "/api/rooms/4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomScope {
    /// The whole-house room.
    Home,
    /// Outdoor sensors.
    Outside,
    /// A numbered room.
    Room(RoomId),
}

impl RoomScope {
    /// Returns the endpoint path for this scope.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/api/rooms/home".to_string(),
            Self::Outside => "/api/rooms/outside".to_string(),
            Self::Room(id) => format!("/api/rooms/{id}"),
        }
    }

    /// Returns the room id if the scope addresses a numbered room.
    #[must_use]
    pub const fn room_id(&self) -> Option<RoomId> {
        match self {
            Self::Room(id) => Some(*id),
            Self::Home | Self::Outside => None,
        }
    }

    /// Returns the room type tag the backend uses for synthetic rooms.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Outside => "outside",
            Self::Room(_) => "room",
        }
    }
}

impl fmt::Display for RoomScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room(id) => write!(f, "room {id}"),
            other => f.write_str(other.tag()),
        }
    }
}

impl From<RoomId> for RoomScope {
    fn from(id: RoomId) -> Self {
        Self::Room(id)
    }
}
