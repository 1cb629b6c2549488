// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One sync session, wired together.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::auth::Session;
use crate::event::{EventBus, SyncEvent};
use crate::protocol::Backend;
use crate::state::{
    DeviceStateStore, MergeOutcome, SharedStore, StateChange, StateVersionRegistry,
};
use crate::sync::{PollConfig, PollHandle, RemoteMutationClient, SyncReconciler};
use crate::types::{DeviceId, RoomScope, StateId};

#[cfg(feature = "http")]
use crate::{
    auth::AuthToken,
    protocol::{ApiClient, ApiConfig},
    response::SensorHistory,
};

/// Store, version registry, session and event bus for one backend.
///
/// Everything is dropped with the `HomeSync`; nothing is persisted.
///
/// # Examples
///
/// ```no_run
/// use smarthome_sync::HomeSync;
/// use smarthome_sync::protocol::ApiConfig;
/// use smarthome_sync::sync::PollConfig;
/// use smarthome_sync::types::{DeviceId, RoomScope};
///
/// # async fn example() -> smarthome_sync::Result<()> {
/// let home = HomeSync::connect(ApiConfig::new("http://192.168.1.10:8080"))?;
/// home.login("alice", "secret").await?;
///
/// let _poll = home.start_polling(PollConfig::new());
/// let mut store = home.watch_store();
///
/// store.changed().await.ok();
/// if let Some(t) = store.borrow().reading(home_room(), "temperature") {
///     println!("inside: {t} °C");
/// }
///
/// home.toggle(DeviceId::new(7)).await?;
/// # Ok(())
/// # }
/// # fn home_room() -> smarthome_sync::types::RoomId { smarthome_sync::types::RoomId::new(1) }
/// ```
pub struct HomeSync<B> {
    backend: Arc<B>,
    store: SharedStore,
    registry: Arc<StateVersionRegistry>,
    session: Session,
    events: EventBus,
}

impl<B> std::fmt::Debug for HomeSync<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeSync")
            .field("registry", &self.registry)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> HomeSync<B> {
    /// Creates a session over `backend`.
    ///
    /// `session` must be the one the backend reads its token from.
    #[must_use]
    pub fn new(backend: B, session: Session) -> Self {
        Self {
            backend: Arc::new(backend),
            store: SharedStore::new(),
            registry: Arc::new(StateVersionRegistry::new()),
            session,
            events: EventBus::new(),
        }
    }

    /// Uses an existing version registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<StateVersionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Uses an event bus with a custom buffer size.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.events = EventBus::with_capacity(capacity);
        self
    }

    /// Returns the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the shared store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Returns a copy of the current store.
    #[must_use]
    pub fn snapshot(&self) -> DeviceStateStore {
        self.store.snapshot()
    }

    /// Subscribes to store changes.
    #[must_use]
    pub fn watch_store(&self) -> watch::Receiver<DeviceStateStore> {
        self.store.subscribe()
    }

    /// Returns the version registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<StateVersionRegistry> {
        &self.registry
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Subscribes to sync events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Returns a reconciler bound to this session.
    #[must_use]
    pub fn reconciler(&self) -> SyncReconciler<B> {
        SyncReconciler::new(
            Arc::clone(&self.backend),
            self.store.clone(),
            Arc::clone(&self.registry),
            self.session.clone(),
            self.events.clone(),
        )
    }

    /// Returns a mutation client bound to this session.
    #[must_use]
    pub fn mutations(&self) -> RemoteMutationClient<B> {
        RemoteMutationClient::new(
            Arc::clone(&self.backend),
            self.store.clone(),
            Arc::clone(&self.registry),
            self.session.clone(),
            self.events.clone(),
        )
    }

    /// Forgets the session token. Returns `true` if there was one.
    pub fn logout(&self) -> bool {
        self.session.clear()
    }

    /// See [`SyncReconciler::poll_once`].
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn poll_once(&self, scope: RoomScope) -> crate::Result<MergeOutcome> {
        self.reconciler().poll_once(scope).await
    }

    /// See [`SyncReconciler::refresh_rooms`].
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn refresh_rooms(&self) -> crate::Result<usize> {
        self.reconciler().refresh_rooms().await
    }

    /// See [`RemoteMutationClient::set_device_state`].
    ///
    /// # Errors
    ///
    /// Returns the local rejection or request error.
    pub async fn set_device_state(
        &self,
        device_id: DeviceId,
        change: StateChange,
    ) -> crate::Result<StateId> {
        self.mutations().set_device_state(device_id, change).await
    }

    /// See [`RemoteMutationClient::toggle`].
    ///
    /// # Errors
    ///
    /// Returns the local rejection or request error.
    pub async fn toggle(&self, device_id: DeviceId) -> crate::Result<StateId> {
        self.mutations().toggle(device_id).await
    }
}

impl<B: Backend + 'static> HomeSync<B> {
    /// Starts the background poll loop.
    #[must_use = "dropping the handle stops the poll loop"]
    pub fn start_polling(&self, config: PollConfig) -> PollHandle {
        self.reconciler().spawn(config)
    }
}

#[cfg(feature = "http")]
impl HomeSync<ApiClient> {
    /// Creates a session over HTTP.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn connect(config: ApiConfig) -> crate::Result<Self> {
        let session = Session::new();
        let client = config.into_client(session.clone())?;
        Ok(Self::new(client, session))
    }

    /// Logs in; the token is kept for this session.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are refused or the request fails.
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> crate::Result<AuthToken> {
        self.backend.login(username, password).await
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns error if registration is refused or the request fails.
    pub async fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> crate::Result<()> {
        self.backend.register(username, password).await
    }

    /// Fetches the recorded values of a sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn sensor_history(&self, sensor_id: DeviceId) -> crate::Result<SensorHistory> {
        self.backend.sensor_history(sensor_id).await
    }
}
