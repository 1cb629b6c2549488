// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory backend for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::command::SwitchUpdateCommand;
use crate::error::ProtocolError;
use crate::protocol::Backend;
use crate::state::{Device, DeviceKind, Room, RoomSnapshot};
use crate::types::{DeviceId, DeviceType, RoomId, StateId};

/// Replays queued responses; an empty queue answers with a connection error.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    rooms: Mutex<VecDeque<crate::Result<Vec<Room>>>>,
    snapshots: Mutex<VecDeque<crate::Result<RoomSnapshot>>>,
    updates: Mutex<VecDeque<crate::Result<()>>>,
    sent: Mutex<Vec<SwitchUpdateCommand>>,
}

impl FakeBackend {
    pub(crate) fn push_rooms(&self, result: crate::Result<Vec<Room>>) {
        self.rooms.lock().push_back(result);
    }

    pub(crate) fn push_snapshot(&self, result: crate::Result<RoomSnapshot>) {
        self.snapshots.lock().push_back(result);
    }

    pub(crate) fn push_update(&self, result: crate::Result<()>) {
        self.updates.lock().push_back(result);
    }

    pub(crate) fn sent(&self) -> Vec<SwitchUpdateCommand> {
        self.sent.lock().clone()
    }
}

fn nothing_queued() -> crate::Error {
    ProtocolError::ConnectionFailed("no response queued".to_string()).into()
}

impl Backend for FakeBackend {
    async fn fetch_rooms(&self) -> crate::Result<Vec<Room>> {
        self.rooms.lock().pop_front().unwrap_or_else(|| Err(nothing_queued()))
    }

    async fn fetch_room(&self, _scope: crate::types::RoomScope) -> crate::Result<RoomSnapshot> {
        self.snapshots
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(nothing_queued()))
    }

    async fn update_switch(&self, command: SwitchUpdateCommand) -> crate::Result<()> {
        self.sent.lock().push(command);
        self.updates.lock().pop_front().unwrap_or(Ok(()))
    }
}

pub(crate) const HOME: RoomId = RoomId::new(1);

/// Home room at `state_id` holding one power switch with id 7.
pub(crate) fn home_snapshot(state_id: u64, enabled: bool) -> RoomSnapshot {
    let state_id = StateId::new(state_id);
    RoomSnapshot {
        room: Room::new(HOME, "Home", "home").with_state_id(state_id),
        devices: vec![Device {
            id: DeviceId::new(7),
            name: "Power".to_string(),
            device_type: DeviceType::from(DeviceType::POWER),
            room_id: HOME,
            state_id,
            kind: DeviceKind::Switch { enabled },
        }],
    }
}

pub(crate) fn auth_failure() -> crate::Error {
    ProtocolError::AuthenticationFailed { code: 401 }.into()
}

pub(crate) fn server_error() -> crate::Error {
    ProtocolError::Status {
        code: 500,
        reason: "Internal Server Error".to_string(),
    }
    .into()
}
