// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room queries.

use crate::types::RoomScope;

use super::{Command, Method};

/// Lists all rooms.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomListCommand;

impl Command for RoomListCommand {
    fn method(&self) -> Method {
        Method::Get
    }

    fn path(&self) -> String {
        "/api/rooms".to_string()
    }
}

/// Fetches one room with all its devices.
#[derive(Debug, Clone, Copy)]
pub struct RoomCommand(pub RoomScope);

impl Command for RoomCommand {
    fn method(&self) -> Method {
        Method::Get
    }

    fn path(&self) -> String {
        self.0.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomId;

    #[test]
    fn paths() {
        assert_eq!(RoomListCommand.path(), "/api/rooms");
        assert_eq!(RoomCommand(RoomScope::Outside).path(), "/api/rooms/outside");
        assert_eq!(RoomCommand(RoomScope::Room(RoomId::new(12))).path(), "/api/rooms/12");
    }
}
