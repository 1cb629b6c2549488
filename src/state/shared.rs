// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store shared between the poll loop and mutation callers.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::DeviceStateStore;

/// Thread-safe handle to a [`DeviceStateStore`] with change notification.
///
/// Every mutation runs as one short synchronous critical section. No network
/// I/O happens while the lock is held. After a mutation that changed
/// something, observers holding a [`watch::Receiver`] see the new store.
///
/// # Examples
///
/// ```
/// use smarthome_sync::state::{Room, SharedStore};
/// use smarthome_sync::types::RoomId;
///
/// let store = SharedStore::new();
/// let observer = store.subscribe();
///
/// store.update(|s| {
///     let added = s.merge_rooms([Room::new(RoomId::new(1), "Kitchen", "kitchen")]);
///     (added, added > 0)
/// });
///
/// assert!(observer.has_changed().unwrap());
/// assert_eq!(observer.borrow().rooms().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<DeviceStateStore>,
    state_tx: watch::Sender<DeviceStateStore>,
}

impl SharedStore {
    /// Creates an empty shared store.
    #[must_use]
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(DeviceStateStore::new());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(DeviceStateStore::new()),
                state_tx,
            }),
        }
    }

    /// Reads the store.
    pub fn read<R>(&self, f: impl FnOnce(&DeviceStateStore) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Returns a copy of the current store.
    #[must_use]
    pub fn snapshot(&self) -> DeviceStateStore {
        self.inner.state.lock().clone()
    }

    /// Mutates the store.
    ///
    /// The closure returns its result and whether it changed the store;
    /// observers are notified only in the latter case.
    pub fn update<R>(&self, f: impl FnOnce(&mut DeviceStateStore) -> (R, bool)) -> R {
        let mut state = self.inner.state.lock();
        let (result, changed) = f(&mut state);
        if changed {
            // Published under the lock so observers see updates in order.
            self.inner.state_tx.send_replace(state.clone());
        }
        result
    }

    /// Subscribes to store changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DeviceStateStore> {
        self.inner.state_tx.subscribe()
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}
