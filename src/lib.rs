// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `smarthome_sync` - Keep a smart-home client in sync with its REST backend.
//!
//! The library holds an observable, in-memory view of rooms, switches, range
//! switches and sensors. It refreshes that view by polling the backend and
//! lets the user change devices optimistically: a change shows up at once,
//! is tagged with a fresh state version, and stays locked until a backend
//! snapshot confirms it.
//!
//! # State versions
//!
//! Every room snapshot carries a `stateId`. Each device remembers the
//! version of its value. When a snapshot arrives, a device keeps its local
//! value only if that value is newer than the snapshot:
//!
//! ```
//! use smarthome_sync::state::{Device, DeviceKind, merge_devices};
//! use smarthome_sync::types::{DeviceId, DeviceType, RoomId, StateId};
//!
//! let device = |enabled, state_id| Device {
//!     id: DeviceId::new(7),
//!     name: "Power".to_string(),
//!     device_type: DeviceType::from("power"),
//!     room_id: RoomId::new(1),
//!     state_id: StateId::new(state_id),
//!     kind: DeviceKind::Switch { enabled },
//! };
//!
//! // Toggled locally at version 4, backend still reports version 3.
//! let local = [device(true, 4)];
//! let merged = merge_devices(&local, StateId::new(3), vec![device(false, 3)]);
//! assert_eq!(merged[0].enabled(), Some(true));
//!
//! // Backend caught up.
//! let merged = merge_devices(&local, StateId::new(4), vec![device(true, 4)]);
//! assert_eq!(merged[0].state_id, StateId::new(4));
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use smarthome_sync::HomeSync;
//! use smarthome_sync::event::SyncEvent;
//! use smarthome_sync::protocol::ApiConfig;
//! use smarthome_sync::sync::PollConfig;
//! use smarthome_sync::types::DeviceId;
//!
//! #[tokio::main]
//! async fn main() -> smarthome_sync::Result<()> {
//!     let home = HomeSync::connect(ApiConfig::new("http://192.168.1.10:8080"))?;
//!     home.login("alice", "secret").await?;
//!
//!     // Polls home and outside every 5 seconds until dropped
//!     let _poll = home.start_polling(PollConfig::new());
//!
//!     let mut events = home.subscribe();
//!     home.toggle(DeviceId::new(7)).await?;
//!
//!     while let Ok(event) = events.recv().await {
//!         if event == SyncEvent::SessionExpired {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `http` (default): the [`reqwest`](https://docs.rs/reqwest) based
//!   [`protocol::ApiClient`]. Without it, plug in your own
//!   [`protocol::Backend`].

pub mod auth;
pub mod command;
pub mod error;
pub mod event;
mod home;
pub mod protocol;
pub mod response;
pub mod state;
pub mod sync;
pub mod types;

pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{EventBus, SyncEvent};
pub use home::HomeSync;
#[cfg(feature = "http")]
pub use protocol::{ApiClient, ApiConfig};
pub use protocol::Backend;
pub use state::{
    Device, DeviceKey, DeviceKind, DeviceNamespace, DeviceStateStore, MergeOutcome, Room,
    RoomSnapshot, SharedStore, StateChange, StateVersionRegistry, SyncStatus,
};
pub use sync::{PollConfig, PollHandle, RemoteMutationClient, SyncReconciler};
pub use types::{DeviceId, DeviceType, RoomId, RoomScope, StateId};
