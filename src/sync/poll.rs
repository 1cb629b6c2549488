// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll loop configuration and handle.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::types::RoomScope;

/// Settings for the background poll loop.
///
/// # Examples
///
/// ```
/// use smarthome_sync::sync::PollConfig;
/// use smarthome_sync::types::{RoomId, RoomScope};
/// use std::time::Duration;
///
/// let config = PollConfig::new()
///     .with_interval(Duration::from_secs(2))
///     .with_scope(RoomScope::Room(RoomId::new(3)));
///
/// assert_eq!(config.interval(), Duration::from_secs(2));
/// assert_eq!(config.scopes().len(), 3);
/// assert!(config.refresh_room_list());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    scopes: Vec<RoomScope>,
    refresh_room_list: bool,
}

impl PollConfig {
    /// Default time between two polls.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Shortest accepted interval.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// Polls home and outside every five seconds and fetches the room list
    /// once on start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            scopes: vec![RoomScope::Home, RoomScope::Outside],
            refresh_room_list: true,
        }
    }

    /// Sets the poll interval, clamped to [`Self::MIN_INTERVAL`].
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Self::MIN_INTERVAL);
        self
    }

    /// Replaces the polled scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = RoomScope>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    /// Adds a scope unless it is already polled.
    #[must_use]
    pub fn with_scope(mut self, scope: RoomScope) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Sets whether the room list is fetched when the loop starts.
    #[must_use]
    pub fn with_room_list_refresh(mut self, refresh: bool) -> Self {
        self.refresh_room_list = refresh;
        self
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the polled scopes, in poll order.
    #[must_use]
    pub fn scopes(&self) -> &[RoomScope] {
        &self.scopes
    }

    /// Returns whether the room list is fetched on start.
    #[must_use]
    pub fn refresh_room_list(&self) -> bool {
        self.refresh_room_list
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running poll loop.
///
/// The loop stops when [`stop`](Self::stop) is called or the handle is
/// dropped, e.g. when the screen showing the rooms goes away.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stops the loop. An in-flight request is abandoned.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Returns `true` once the loop has ended, either stopped or after an
    /// authentication failure.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomId;

    #[test]
    fn defaults() {
        let config = PollConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(5));
        assert_eq!(config.scopes(), &[RoomScope::Home, RoomScope::Outside]);
        assert!(config.refresh_room_list());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = PollConfig::new().with_interval(Duration::ZERO);
        assert_eq!(config.interval(), PollConfig::MIN_INTERVAL);
    }

    #[test]
    fn scopes_are_not_duplicated() {
        let config = PollConfig::new()
            .with_scopes([RoomScope::Room(RoomId::new(1))])
            .with_scope(RoomScope::Room(RoomId::new(1)))
            .with_scope(RoomScope::Home)
            .with_room_list_refresh(false);
        assert_eq!(
            config.scopes(),
            &[RoomScope::Room(RoomId::new(1)), RoomScope::Home]
        );
        assert!(!config.refresh_room_list());
    }

    #[tokio::test]
    async fn dropping_handle_aborts_task() {
        let task = tokio::spawn(std::future::pending::<()>());
        let handle = PollHandle::new(task);
        assert!(!handle.is_finished());

        handle.stop();
        for _ in 0..10 {
            if handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.is_finished());
    }
}
