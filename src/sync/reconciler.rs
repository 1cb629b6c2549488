// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pulling room snapshots into the store.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;

use crate::auth::Session;
use crate::error::Error;
use crate::event::{EventBus, SyncEvent};
use crate::protocol::Backend;
use crate::state::{MergeOutcome, SharedStore, StateVersionRegistry};
use crate::types::RoomScope;

use super::expire_session;
use super::poll::{PollConfig, PollHandle};

/// Merges backend snapshots into the shared store.
///
/// Failures never disturb the store:
///
/// - transport errors and non-auth HTTP statuses publish
///   [`SyncEvent::PollFailed`] and are retried on the next tick;
/// - malformed bodies are logged and discarded;
/// - 401 and 403 clear the session, publish [`SyncEvent::SessionExpired`]
///   and end the poll loop.
pub struct SyncReconciler<B> {
    backend: Arc<B>,
    store: SharedStore,
    registry: Arc<StateVersionRegistry>,
    session: Session,
    events: EventBus,
}

impl<B> Clone for SyncReconciler<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            store: self.store.clone(),
            registry: Arc::clone(&self.registry),
            session: self.session.clone(),
            events: self.events.clone(),
        }
    }
}

impl<B> std::fmt::Debug for SyncReconciler<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncReconciler")
            .field("registry", &self.registry)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> SyncReconciler<B> {
    /// Creates a reconciler over shared session components.
    #[must_use]
    pub fn new(
        backend: Arc<B>,
        store: SharedStore,
        registry: Arc<StateVersionRegistry>,
        session: Session,
        events: EventBus,
    ) -> Self {
        Self {
            backend,
            store,
            registry,
            session,
            events,
        }
    }

    /// Fetches one room and merges it into the store.
    ///
    /// The snapshot's `stateId` is folded into the registry even when the
    /// snapshot itself turns out to be stale.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after applying the failure policy.
    pub async fn poll_once(&self, scope: RoomScope) -> crate::Result<MergeOutcome> {
        let snapshot = match self.backend.fetch_room(scope).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.report_poll_failure(scope, &e);
                return Err(e);
            }
        };

        let room_id = snapshot.room.id;
        self.registry.observe(snapshot.state_id());

        let outcome = self.store.update(|store| {
            let outcome = store.apply_snapshot(snapshot);
            (outcome, outcome.changed())
        });

        if let MergeOutcome::Applied {
            state_id, pending, ..
        } = outcome
        {
            self.events.publish(SyncEvent::SnapshotApplied {
                room_id,
                state_id,
                pending,
            });
        }

        Ok(outcome)
    }

    /// Fetches the room list and adds rooms not known yet.
    ///
    /// Returns the number of rooms added.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; authentication failures clear the session.
    pub async fn refresh_rooms(&self) -> crate::Result<usize> {
        let rooms = match self.backend.fetch_rooms().await {
            Ok(rooms) => rooms,
            Err(e) => {
                if e.is_authentication_failure() {
                    expire_session(&self.session, &self.events, &e);
                } else {
                    tracing::warn!(error = %e, "Failed to fetch room list");
                }
                return Err(e);
            }
        };

        let added = self.store.update(|store| {
            let added = store.merge_rooms(rooms);
            (added, added > 0)
        });
        self.events.publish(SyncEvent::RoomsRefreshed { added });
        Ok(added)
    }

    fn report_poll_failure(&self, scope: RoomScope, error: &Error) {
        if error.is_authentication_failure() {
            expire_session(&self.session, &self.events, error);
            return;
        }

        if matches!(error, Error::Parse(_)) {
            tracing::warn!(%scope, error = %error, "Discarding malformed room response");
        } else {
            tracing::warn!(
                %scope,
                error = %error,
                transient = error.is_transient(),
                "Room poll failed"
            );
        }
        self.events
            .publish(SyncEvent::poll_failed(scope, error.to_string()));
    }
}

impl<B: Backend + 'static> SyncReconciler<B> {
    /// Starts polling in the background.
    ///
    /// The first round runs immediately, then once per interval. Every
    /// configured scope is polled each round, in order. The loop ends on an
    /// authentication failure or when the returned handle is stopped or
    /// dropped.
    #[must_use = "dropping the handle stops the poll loop"]
    pub fn spawn(&self, config: PollConfig) -> PollHandle {
        let reconciler = self.clone();
        PollHandle::new(tokio::spawn(reconciler.run(config)))
    }

    async fn run(self, config: PollConfig) {
        tracing::debug!(
            interval_ms = u64::try_from(config.interval().as_millis()).unwrap_or(u64::MAX),
            scopes = config.scopes().len(),
            "Starting poll loop"
        );

        if config.refresh_room_list()
            && let Err(e) = self.refresh_rooms().await
            && e.is_authentication_failure()
        {
            tracing::info!("Poll loop stopped: not authenticated");
            return;
        }

        let mut ticker = tokio::time::interval(config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            for &scope in config.scopes() {
                if let Err(e) = self.poll_once(scope).await
                    && e.is_authentication_failure()
                {
                    tracing::info!("Poll loop stopped: not authenticated");
                    return;
                }
            }
        }
    }
}
