// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client-side room and device state.
//!
//! This module holds the records the client shows ([`Room`], [`Device`]), the
//! version counter used to tag client mutations ([`StateVersionRegistry`]),
//! and the store that reconciles optimistic local changes with backend
//! snapshots ([`DeviceStateStore`]).
//!
//! A device is locked while its `state_id` is ahead of its room's confirmed
//! `state_id`, i.e. while the backend has not yet caught up with a change the
//! client issued.
//!
//! # Examples
//!
//! ```
//! use smarthome_sync::state::{
//!     Device, DeviceKind, DeviceStateStore, Room, RoomSnapshot, StateChange,
//!     StateVersionRegistry,
//! };
//! use smarthome_sync::types::{DeviceId, DeviceType, RoomId, StateId};
//!
//! let registry = StateVersionRegistry::new();
//! let mut store = DeviceStateStore::new();
//!
//! let room = Room::new(RoomId::new(1), "Home", "home").with_state_id(StateId::new(3));
//! registry.observe(room.state_id);
//! store.apply_snapshot(RoomSnapshot {
//!     room,
//!     devices: vec![Device {
//!         id: DeviceId::new(7),
//!         name: "Lights".to_string(),
//!         device_type: DeviceType::new(DeviceType::LIGHT),
//!         room_id: RoomId::new(1),
//!         state_id: StateId::new(3),
//!         kind: DeviceKind::Switch { enabled: false },
//!     }],
//! });
//!
//! let id = registry.next_state_id();
//! store.apply_local(DeviceId::new(7), StateChange::switch(true), id).unwrap();
//! assert!(store.is_locked(DeviceId::new(7)));
//! ```

mod device;
mod registry;
mod room;
mod shared;
mod state_change;
mod store;

pub use device::{Device, DeviceKey, DeviceKind, DeviceNamespace};
pub use registry::StateVersionRegistry;
pub use room::{Room, RoomSnapshot};
pub use shared::SharedStore;
pub use state_change::StateChange;
pub use store::{DeviceStateStore, MergeOutcome, PendingMutation, SyncStatus, merge_devices};
