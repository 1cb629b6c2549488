// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel for sync events.

use tokio::sync::broadcast;

use super::SyncEvent;

/// Events buffered per subscriber before the oldest are dropped.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of [`SyncEvent`]s to any number of subscribers.
///
/// Clones publish into the same channel. A subscriber that falls more than
/// the capacity behind gets `RecvError::Lagged` and skips the oldest events;
/// the store itself is never affected.
///
/// # Examples
///
/// ```
/// use smarthome_sync::event::{EventBus, SyncEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SyncEvent::RoomsRefreshed { added: 2 });
/// assert_eq!(rx.try_recv().unwrap(), SyncEvent::RoomsRefreshed { added: 2 });
///
/// // Late subscribers only see later events
/// let mut late = bus.subscribe();
/// assert!(late.try_recv().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    /// Creates a bus buffering 256 events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus buffering `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event. Without subscribers it is dropped.
    pub fn publish(&self, event: SyncEvent) {
        tracing::trace!(?event, "Publishing sync event");
        if self.sender.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
