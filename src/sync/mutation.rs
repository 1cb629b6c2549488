// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic device changes.

use std::sync::Arc;

use crate::auth::Session;
use crate::command::SwitchUpdateCommand;
use crate::error::Error;
use crate::event::{EventBus, SyncEvent};
use crate::protocol::Backend;
use crate::state::{PendingMutation, SharedStore, StateChange, StateVersionRegistry};
use crate::types::{DeviceId, StateId};

use super::expire_session;

/// Sends device changes to the backend, applying them locally first.
///
/// A change that passes local validation takes a fresh id from the
/// registry, lands in the store at once and locks the device until a
/// snapshot confirms it. If the request fails the last value the backend
/// confirmed comes back, unless something newer has replaced the change in
/// the meantime.
pub struct RemoteMutationClient<B> {
    backend: Arc<B>,
    store: SharedStore,
    registry: Arc<StateVersionRegistry>,
    session: Session,
    events: EventBus,
}

impl<B> Clone for RemoteMutationClient<B> {
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

impl<B> std::fmt::Debug for RemoteMutationClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMutationClient")
            .field("registry", &self.registry)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> RemoteMutationClient<B> {
    /// Creates a mutation client over shared session components.
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

    /// Applies `change` locally, then sends it to the backend.
    ///
    /// Returns the state id the change was tagged with.
    ///
    /// # Errors
    ///
    /// Returns an error without contacting the backend if the change is
    /// rejected locally (unknown, locked or read-only device, value out of
    /// range). Returns the request error after rolling back otherwise.
    pub async fn set_device_state(
        &self,
        device_id: DeviceId,
        change: StateChange,
    ) -> crate::Result<StateId> {
        let (pending, command) = self.prepare(device_id, change)?;
        self.send(pending, command).await
    }

    /// Flips a switch or range switch on or off.
    ///
    /// # Errors
    ///
    /// Same as [`set_device_state`](Self::set_device_state).
    pub async fn toggle(&self, device_id: DeviceId) -> crate::Result<StateId> {
        let change = self.toggle_change(device_id)?;
        self.set_device_state(device_id, change).await
    }

    fn toggle_change(&self, device_id: DeviceId) -> crate::Result<StateChange> {
        let kind = self
            .store
            .read(|s| s.controllable(device_id).map(|d| d.kind))?;
        Ok(StateChange::toggle_of(device_id, &kind)?)
    }

    fn prepare(
        &self,
        device_id: DeviceId,
        change: StateChange,
    ) -> crate::Result<(PendingMutation, SwitchUpdateCommand)> {
        let pending = self.store.update(|store| {
            let result = store.check_local(device_id, change).and_then(|()| {
                let state_id = self
                    .registry
                    .try_next_state_id()
                    .ok_or_else(|| Error::StateIdsExhausted(self.registry.current()))?;
                store.apply_local(device_id, change, state_id)
            });
            let changed = result.is_ok();
            (result, changed)
        })?;
        let command = SwitchUpdateCommand::new(device_id, change, pending.state_id());
        Ok((pending, command))
    }

    async fn send(
        &self,
        pending: PendingMutation,
        command: SwitchUpdateCommand,
    ) -> crate::Result<StateId> {
        let device_id = pending.device_id();
        let state_id = pending.state_id();

        match self.backend.update_switch(command).await {
            Ok(()) => {
                tracing::debug!(%device_id, %state_id, "Device change sent");
                self.events
                    .publish(SyncEvent::MutationSent { device_id, state_id });
                Ok(state_id)
            }
            Err(e) => {
                let rolled_back = self.store.update(|store| {
                    let restored = store.rollback(&pending);
                    (restored, restored)
                });
                tracing::warn!(
                    %device_id,
                    %state_id,
                    rolled_back,
                    error = %e,
                    "Device change failed"
                );

                if e.is_authentication_failure() {
                    expire_session(&self.session, &self.events, &e);
                }
                self.events.publish(SyncEvent::mutation_failed(
                    device_id,
                    state_id,
                    e.to_string(),
                    rolled_back,
                ));
                Err(e)
            }
        }
    }
}

impl<B: Backend + 'static> RemoteMutationClient<B> {
    /// Applies `change` locally and sends it from a background task.
    ///
    /// Returns as soon as the store holds the optimistic value. The outcome
    /// of the request is reported as [`SyncEvent::MutationSent`] or
    /// [`SyncEvent::MutationFailed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the change is rejected locally.
    pub fn spawn_set_device_state(
        &self,
        device_id: DeviceId,
        change: StateChange,
    ) -> crate::Result<StateId> {
        let (pending, command) = self.prepare(device_id, change)?;
        let state_id = pending.state_id();
        let client = self.clone();

        tokio::spawn(async move {
            // Outcome is published on the event bus.
            let _ = client.send(pending, command).await;
        });

        Ok(state_id)
    }

    /// Background variant of [`toggle`](Self::toggle).
    ///
    /// # Errors
    ///
    /// Returns an error if the change is rejected locally.
    pub fn spawn_toggle(&self, device_id: DeviceId) -> crate::Result<StateId> {
        let change = self.toggle_change(device_id)?;
        self.spawn_set_device_state(device_id, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthToken;
    use crate::error::{DeviceError, ValueError};
    use crate::state::{Device, DeviceKind, Room, RoomSnapshot, SyncStatus};
    use crate::sync::fake::{FakeBackend, HOME, auth_failure, home_snapshot, server_error};
    use crate::types::DeviceType;

    const POWER: DeviceId = DeviceId::new(7);

    struct Harness {
        backend: Arc<FakeBackend>,
        client: RemoteMutationClient<FakeBackend>,
        store: SharedStore,
        session: Session,
        events: EventBus,
    }

    fn harness(registry_start: u64) -> Harness {
        let backend = Arc::new(FakeBackend::default());
        let store = SharedStore::new();
        store.update(|s| (s.apply_snapshot(home_snapshot(3, false)), true));
        let registry = Arc::new(StateVersionRegistry::starting_at(StateId::new(
            registry_start,
        )));
        let session = Session::with_token(AuthToken::new("token"));
        let events = EventBus::new();
        let client = RemoteMutationClient::new(
            Arc::clone(&backend),
            store.clone(),
            registry,
            session.clone(),
            events.clone(),
        );
        Harness {
            backend,
            client,
            store,
            session,
            events,
        }
    }

    fn power(store: &SharedStore) -> Device {
        store.read(|s| s.switch(POWER).cloned()).unwrap()
    }

    #[tokio::test]
    async fn successful_change_stays_pending_until_confirmed() {
        let h = harness(3);
        let mut rx = h.events.subscribe();

        let state_id = h.client.toggle(POWER).await.unwrap();

        assert_eq!(state_id, StateId::new(4));
        let device = power(&h.store);
        assert_eq!(device.kind, DeviceKind::Switch { enabled: true });
        assert_eq!(device.state_id, StateId::new(4));
        assert!(h.store.read(|s| s.is_locked(POWER)));

        let sent = h.backend.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].switch_id(), POWER);
        assert_eq!(sent[0].state_id(), StateId::new(4));
        assert_eq!(
            rx.recv().await.unwrap(),
            SyncEvent::MutationSent {
                device_id: POWER,
                state_id: StateId::new(4),
            }
        );
    }

    #[tokio::test]
    async fn failed_send_rolls_back() {
        let h = harness(3);
        let mut rx = h.events.subscribe();
        h.backend.push_update(Err(server_error()));

        let err = h.client.toggle(POWER).await.unwrap_err();

        assert!(err.is_transient());
        let device = power(&h.store);
        assert_eq!(device.kind, DeviceKind::Switch { enabled: false });
        assert_eq!(device.state_id, StateId::new(3));
        assert_eq!(
            h.store.read(|s| s.sync_status(POWER)),
            Some(SyncStatus::Synced)
        );
        assert!(h.session.is_authenticated());
        assert!(matches!(
            rx.recv().await.unwrap(),
            SyncEvent::MutationFailed {
                device_id: POWER,
                rolled_back: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn auth_failure_rolls_back_and_expires_session() {
        let h = harness(3);
        let mut rx = h.events.subscribe();
        h.backend.push_update(Err(auth_failure()));

        assert!(h.client.toggle(POWER).await.is_err());

        assert!(!h.session.is_authenticated());
        assert_eq!(rx.recv().await.unwrap(), SyncEvent::SessionExpired);
        assert!(matches!(
            rx.recv().await.unwrap(),
            SyncEvent::MutationFailed { .. }
        ));
        assert_eq!(power(&h.store).state_id, StateId::new(3));
    }

    #[tokio::test]
    async fn locked_device_rejects_second_change() {
        let h = harness(3);
        h.client.toggle(POWER).await.unwrap();

        let err = h.client.toggle(POWER).await.unwrap_err();

        assert!(matches!(err, Error::Device(DeviceError::Locked(id)) if id == POWER));
        assert_eq!(h.backend.sent().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_value_is_rejected_locally() {
        let h = harness(3);
        let dimmer = DeviceId::new(9);
        h.store.update(|s| {
            let snapshot = RoomSnapshot {
                room: Room::new(HOME, "Home", "home").with_state_id(StateId::new(3)),
                devices: vec![Device {
                    id: dimmer,
                    name: "Dimmer".to_string(),
                    device_type: DeviceType::from(DeviceType::LIGHT),
                    room_id: HOME,
                    state_id: StateId::new(3),
                    kind: DeviceKind::RangeSwitch {
                        enabled: true,
                        value: 50.0,
                        min: 0.0,
                        max: 100.0,
                    },
                }],
            };
            (s.apply_snapshot(snapshot), true)
        });

        let err = h
            .client
            .set_device_state(dimmer, StateChange::range(true, 150.0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Value(ValueError::OutOfRange { actual, .. }) if (actual - 150.0).abs() < f64::EPSILON
        ));
        assert!(h.backend.sent().is_empty());
    }

    #[tokio::test]
    async fn state_ids_follow_the_registry() {
        let h = harness(20);
        let state_id = h.client.toggle(POWER).await.unwrap();
        assert_eq!(state_id, StateId::new(21));
    }

    #[tokio::test]
    async fn spawned_change_is_applied_before_send_completes() {
        let h = harness(3);
        let mut rx = h.events.subscribe();

        let state_id = h.client.spawn_toggle(POWER).unwrap();

        assert_eq!(power(&h.store).state_id, state_id);
        assert_eq!(
            rx.recv().await.unwrap(),
            SyncEvent::MutationSent {
                device_id: POWER,
                state_id,
            }
        );
    }

    #[tokio::test]
    async fn rejected_change_does_not_consume_a_state_id() {
        let h = harness(3);
        h.client.toggle(POWER).await.unwrap();
        assert_eq!(h.client.registry.current(), StateId::new(4));

        let locked = h.client.toggle(POWER).await.unwrap_err();
        assert!(matches!(locked, Error::Device(DeviceError::Locked(_))));
        let unknown = h
            .client
            .set_device_state(DeviceId::new(99), StateChange::switch(true))
            .await
            .unwrap_err();
        assert!(matches!(unknown, Error::DeviceNotFound(_)));

        assert_eq!(h.client.registry.current(), StateId::new(4));
    }

    #[tokio::test]
    async fn exhausted_registry_rejects_change_before_sending() {
        let h = harness(3);
        h.client.registry.observe(StateId::MAX);

        let err = h.client.toggle(POWER).await.unwrap_err();

        assert!(matches!(err, Error::StateIdsExhausted(id) if id == StateId::MAX));
        assert!(h.backend.sent().is_empty());
        assert_eq!(power(&h.store).state_id, StateId::new(3));
        assert!(!h.store.read(|s| s.is_locked(POWER)));
    }

    #[tokio::test]
    async fn toggling_a_sensor_is_read_only() {
        let h = harness(3);
        h.store.update(|s| {
            let snapshot = RoomSnapshot {
                room: Room::new(HOME, "Home", "home").with_state_id(StateId::new(3)),
                devices: vec![Device {
                    id: DeviceId::new(12),
                    name: "Thermometer".to_string(),
                    device_type: DeviceType::from(DeviceType::TEMPERATURE),
                    room_id: HOME,
                    state_id: StateId::new(3),
                    kind: DeviceKind::Sensor { value: 20.0 },
                }],
            };
            (s.apply_snapshot(snapshot), true)
        });

        let err = h.client.toggle(DeviceId::new(12)).await.unwrap_err();

        assert!(matches!(err, Error::Device(DeviceError::ReadOnly(_))));
        assert_eq!(h.client.registry.current(), StateId::new(3));
    }

    #[tokio::test]
    async fn unknown_device_is_reported() {
        let h = harness(3);
        let err = h.client.toggle(DeviceId::new(99)).await.unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id == DeviceId::new(99)));
    }
}
