// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session-wide state version counter.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::StateId;

/// Issues state ids for client-initiated mutations.
///
/// The registry has two writers: the client, which takes a fresh id for every
/// mutation it sends, and the poll loop, which folds in the `stateId` the
/// backend reports. Every id returned by [`next_state_id`](Self::next_state_id)
/// is strictly greater than anything issued or observed before it.
///
/// The registry is owned by one session and shared through an `Arc`. It is
/// not persisted: ids from a previous process carry no meaning.
///
/// # Examples
///
/// ```
/// use smarthome_sync::state::StateVersionRegistry;
/// use smarthome_sync::types::StateId;
///
/// let registry = StateVersionRegistry::new();
/// let first = registry.next_state_id();
///
/// registry.observe(StateId::new(40));
/// let second = registry.next_state_id();
///
/// assert!(second > first);
/// assert_eq!(second, StateId::new(41));
/// ```
#[derive(Debug, Default)]
pub struct StateVersionRegistry {
    current: AtomicU64,
}

impl StateVersionRegistry {
    /// Creates a registry starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose next issued id is `current + 1`.
    #[must_use]
    pub fn starting_at(current: StateId) -> Self {
        Self {
            current: AtomicU64::new(current.get()),
        }
    }

    /// Returns a fresh id, strictly greater than any issued or observed id.
    ///
    /// Returns `None` once the counter has reached [`StateId::MAX`], which
    /// only happens if the backend reported that id.
    pub fn try_next_state_id(&self) -> Option<StateId> {
        match self
            .current
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |id| id.checked_add(1))
        {
            Ok(previous) => {
                let id = StateId::new(previous).next();
                tracing::trace!(state_id = %id, "Issued state id");
                Some(id)
            }
            Err(_) => {
                tracing::warn!("State id counter exhausted");
                None
            }
        }
    }

    /// Returns a fresh id, saturating at [`StateId::MAX`].
    ///
    /// Once saturated, ids are no longer strictly increasing; use
    /// [`try_next_state_id`](Self::try_next_state_id) where that matters.
    pub fn next_state_id(&self) -> StateId {
        self.try_next_state_id().unwrap_or(StateId::MAX)
    }

    /// Folds a backend-reported id into the counter if it is larger.
    pub fn observe(&self, server_state_id: StateId) {
        let previous = self
            .current
            .fetch_max(server_state_id.get(), Ordering::AcqRel);
        if server_state_id.get() > previous {
            tracing::debug!(
                previous,
                observed = %server_state_id,
                "Advanced state counter to backend id"
            );
        }
    }

    /// Returns the highest id issued or observed so far.
    #[must_use]
    pub fn current(&self) -> StateId {
        StateId::new(self.current.load(Ordering::Acquire))
    }
}
