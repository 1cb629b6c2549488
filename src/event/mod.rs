// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for sync activity.
//!
//! The [`EventBus`] uses tokio's broadcast channel to notify any number of
//! subscribers about merged snapshots, failed polls, failed mutations, and
//! session expiry. Store contents themselves are observed through
//! [`SharedStore::subscribe`](crate::state::SharedStore::subscribe).
//!
//! # Examples
//!
//! ```
//! use smarthome_sync::event::{EventBus, SyncEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(SyncEvent::SessionExpired);
//! ```

mod event_bus;
mod sync_event;

pub use event_bus::EventBus;
pub use sync_event::SyncEvent;
