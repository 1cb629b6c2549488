// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory room and device store.

use std::collections::{BTreeMap, HashMap};

use crate::error::{DeviceError, Error};
use crate::types::{DeviceId, RoomId, StateId};

use super::{Device, DeviceKey, DeviceKind, Room, RoomSnapshot, StateChange};

/// Merges an incoming room snapshot with the local records of that room.
///
/// Devices are matched by [`DeviceKey`], so a switch and a sensor sharing an
/// id are distinct records. For each incoming device, the local record is
/// kept if its `state_id` is strictly greater than `room_state_id` (a local
/// edit the backend has not confirmed yet); otherwise the incoming record
/// wins. Local devices that are absent from `incoming` are dropped.
///
/// # Examples
///
/// ```
/// use smarthome_sync::state::{merge_devices, Device, DeviceKind};
/// use smarthome_sync::types::{DeviceId, DeviceType, RoomId, StateId};
///
/// let switch = |enabled, state_id| Device {
///     id: DeviceId::new(7),
///     name: "Kettle".to_string(),
///     device_type: DeviceType::new(DeviceType::POWER),
///     room_id: RoomId::new(1),
///     state_id: StateId::new(state_id),
///     kind: DeviceKind::Switch { enabled },
/// };
///
/// // Local toggle at version 4, backend still at version 3: keep local.
/// let merged = merge_devices([&switch(true, 4)], StateId::new(3), vec![switch(false, 3)]);
/// assert_eq!(merged[0].enabled(), Some(true));
///
/// // Backend caught up: take the backend's record.
/// let merged = merge_devices([&switch(true, 4)], StateId::new(4), vec![switch(false, 4)]);
/// assert_eq!(merged[0].enabled(), Some(false));
/// ```
#[must_use]
pub fn merge_devices<'a>(
    local: impl IntoIterator<Item = &'a Device>,
    room_state_id: StateId,
    incoming: Vec<Device>,
) -> Vec<Device> {
    merge(local, room_state_id, incoming).devices
}

struct Merged {
    devices: Vec<Device>,
    /// Backend records that lost to a pending local edit.
    overridden: Vec<Device>,
}

fn merge<'a>(
    local: impl IntoIterator<Item = &'a Device>,
    room_state_id: StateId,
    incoming: Vec<Device>,
) -> Merged {
    let local: HashMap<DeviceKey, &Device> = local.into_iter().map(|d| (d.key(), d)).collect();
    let mut overridden = Vec::new();

    let devices = incoming
        .into_iter()
        .map(|device| match local.get(&device.key()) {
            Some(existing) if existing.state_id > room_state_id => {
                overridden.push(device);
                (*existing).clone()
            }
            _ => device,
        })
        .collect();

    Merged {
        devices,
        overridden,
    }
}

/// Whether a device's value is confirmed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// The backend has confirmed the device's current value.
    Synced,
    /// The client changed the device and is waiting for confirmation.
    ///
    /// The device is locked against further edits in this state.
    PendingLocal {
        /// Version of the local change.
        pending: StateId,
        /// Version the backend has confirmed for the room so far.
        confirmed: StateId,
    },
}

impl SyncStatus {
    /// Returns `true` if the device is waiting for the backend.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::PendingLocal { .. })
    }
}

/// Result of merging a room snapshot into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The snapshot was merged.
    Applied {
        /// The room's new confirmed version.
        state_id: StateId,
        /// Number of devices now in the room.
        devices: usize,
        /// Number of local edits kept because the snapshot predates them.
        pending: usize,
        /// Whether anything in the store changed.
        changed: bool,
    },
    /// The snapshot is older than what the store already confirmed.
    Stale {
        /// Version already confirmed for the room.
        confirmed: StateId,
        /// Version carried by the discarded snapshot.
        received: StateId,
    },
}

impl MergeOutcome {
    /// Returns `true` if the store was modified.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied { changed: true, .. })
    }
}

/// Record of an optimistic change, used to roll it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMutation {
    device_id: DeviceId,
    state_id: StateId,
    change: StateChange,
    previous_state_id: StateId,
}

impl PendingMutation {
    /// Returns the changed switch.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Returns the version the change was tagged with.
    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    /// Returns the requested change.
    #[must_use]
    pub fn change(&self) -> StateChange {
        self.change
    }

    /// Returns the version the device had before the change.
    #[must_use]
    pub fn previous_state_id(&self) -> StateId {
        self.previous_state_id
    }
}

/// Rooms and devices for the active session.
///
/// Devices are keyed by [`DeviceKey`]. Client changes only target switches,
/// so the mutation-side methods ([`apply_local`](Self::apply_local),
/// [`sync_status`](Self::sync_status), [`is_locked`](Self::is_locked)) take
/// a switch id.
///
/// All operations are synchronous and return their result directly. Sharing
/// between the poll loop and mutation callers goes through
/// [`SharedStore`](super::SharedStore).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceStateStore {
    rooms: BTreeMap<RoomId, Room>,
    devices: BTreeMap<DeviceKey, Device>,
    /// Last backend record of every device with a pending local change.
    confirmed: BTreeMap<DeviceKey, Device>,
}

impl DeviceStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Queries ==========

    /// Returns a room by id.
    #[must_use]
    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    /// Returns all known rooms ordered by id.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Returns a device by key.
    #[must_use]
    pub fn device(&self, key: DeviceKey) -> Option<&Device> {
        self.devices.get(&key)
    }

    /// Returns a switch or range switch by id.
    #[must_use]
    pub fn switch(&self, device_id: DeviceId) -> Option<&Device> {
        self.device(DeviceKey::switch(device_id))
    }

    /// Returns a sensor by id.
    #[must_use]
    pub fn sensor(&self, device_id: DeviceId) -> Option<&Device> {
        self.device(DeviceKey::sensor(device_id))
    }

    /// Returns all known devices, switches first, each namespace by id.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Returns the devices of one room in [`devices`](Self::devices) order.
    pub fn devices_in(&self, room_id: RoomId) -> impl Iterator<Item = &Device> {
        self.devices.values().filter(move |d| d.room_id == room_id)
    }

    /// Returns the latest reading of the first sensor of type `tag` in a room.
    ///
    /// ```
    /// use smarthome_sync::state::DeviceStateStore;
    /// use smarthome_sync::types::{DeviceType, RoomId};
    ///
    /// let store = DeviceStateStore::new();
    /// assert_eq!(store.reading(RoomId::new(1), DeviceType::TEMPERATURE), None);
    /// ```
    #[must_use]
    pub fn reading(&self, room_id: RoomId, tag: &str) -> Option<f64> {
        self.devices_in(room_id)
            .find(|d| d.is_sensor() && d.device_type.is(tag))
            .and_then(Device::value)
    }

    /// Returns the confirmed version of a device's room.
    fn confirmed_state_id(&self, device: &Device) -> StateId {
        self.rooms
            .get(&device.room_id)
            .map_or(StateId::ZERO, |room| room.state_id)
    }

    /// Returns whether a switch's value is confirmed.
    ///
    /// Sensors are never changed locally and are always in sync.
    #[must_use]
    pub fn sync_status(&self, device_id: DeviceId) -> Option<SyncStatus> {
        let device = self.switch(device_id)?;
        let confirmed = self.confirmed_state_id(device);

        if confirmed < device.state_id {
            Some(SyncStatus::PendingLocal {
                pending: device.state_id,
                confirmed,
            })
        } else {
            Some(SyncStatus::Synced)
        }
    }

    /// Returns `true` if a switch is waiting for the backend.
    ///
    /// Unknown devices are not locked.
    #[must_use]
    pub fn is_locked(&self, device_id: DeviceId) -> bool {
        self.sync_status(device_id)
            .is_some_and(|status| status.is_locked())
    }

    /// Returns the switch a client change would target.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ReadOnly`] if only a sensor has this id, and
    /// [`Error::DeviceNotFound`] if nothing does.
    pub fn controllable(&self, device_id: DeviceId) -> crate::Result<&Device> {
        match self.switch(device_id) {
            Some(device) => Ok(device),
            None if self.sensor(device_id).is_some() => {
                Err(DeviceError::ReadOnly(device_id).into())
            }
            None => Err(Error::DeviceNotFound(device_id)),
        }
    }

    /// Checks that a client change can be applied, without applying it.
    ///
    /// Callers use this to reject a change before issuing a state id for it.
    ///
    /// # Errors
    ///
    /// Same as [`apply_local`](Self::apply_local).
    pub fn check_local(&self, device_id: DeviceId, change: StateChange) -> crate::Result<()> {
        self.validate(device_id, change).map(drop)
    }

    fn validate(&self, device_id: DeviceId, change: StateChange) -> crate::Result<DeviceKind> {
        if self.is_locked(device_id) {
            return Err(DeviceError::Locked(device_id).into());
        }
        let device = self.controllable(device_id)?;
        change.apply_to(device_id, &device.kind)
    }

    // ========== Backend updates ==========

    /// Adds rooms from the room list that are not known yet.
    ///
    /// Known rooms keep their confirmed version; only their name and type
    /// are refreshed. Returns the number of rooms added.
    pub fn merge_rooms(&mut self, rooms: impl IntoIterator<Item = Room>) -> usize {
        let mut added = 0;
        for room in rooms {
            match self.rooms.get_mut(&room.id) {
                Some(existing) => {
                    existing.name = room.name;
                    existing.room_type = room.room_type;
                    existing.state_id = existing.state_id.max(room.state_id);
                }
                None => {
                    tracing::debug!(room_id = %room.id, name = %room.name, "Adding room");
                    self.rooms.insert(room.id, room);
                    added += 1;
                }
            }
        }
        added
    }

    /// Merges a room snapshot from the backend.
    ///
    /// Snapshots older than the room's confirmed version are discarded, so a
    /// slow response cannot undo a newer one. For devices whose local change
    /// is still pending, the snapshot's record becomes the value a failed
    /// change rolls back to.
    pub fn apply_snapshot(&mut self, snapshot: RoomSnapshot) -> MergeOutcome {
        let RoomSnapshot { room, devices } = snapshot;
        let room_id = room.id;
        let received = room.state_id;

        if let Some(existing) = self.rooms.get(&room_id)
            && received < existing.state_id
        {
            tracing::debug!(
                %room_id,
                confirmed = %existing.state_id,
                %received,
                "Discarding stale room snapshot"
            );
            return MergeOutcome::Stale {
                confirmed: existing.state_id,
                received,
            };
        }

        let local: Vec<Device> = self.devices_in(room_id).cloned().collect();
        let Merged {
            devices: merged,
            overridden,
        } = merge(&local, received, devices);

        let changed = self.rooms.get(&room_id) != Some(&room) || local != merged;

        self.devices.retain(|_, d| d.room_id != room_id);
        let count = merged.len();
        for device in merged {
            self.devices.insert(device.key(), device);
        }
        self.rooms.insert(room_id, room);

        let pending = overridden.len();
        self.confirmed.retain(|_, d| d.room_id != room_id);
        for device in overridden {
            self.confirmed.insert(device.key(), device);
        }

        tracing::debug!(
            %room_id,
            state_id = %received,
            devices = count,
            pending,
            changed,
            "Merged room snapshot"
        );

        MergeOutcome::Applied {
            state_id: received,
            devices: count,
            pending,
            changed,
        }
    }

    // ========== Optimistic updates ==========

    /// Applies a client change to a switch ahead of backend confirmation.
    ///
    /// The device takes `state_id` and stays locked until a snapshot with at
    /// least that version arrives for its room.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch is unknown, locked by a previous
    /// change, of the wrong kind, or the value is out of range. An id that
    /// only names a sensor is [`DeviceError::ReadOnly`].
    pub fn apply_local(
        &mut self,
        device_id: DeviceId,
        change: StateChange,
        state_id: StateId,
    ) -> crate::Result<PendingMutation> {
        let new_kind = self.validate(device_id, change)?;
        let key = DeviceKey::switch(device_id);
        let device = self
            .devices
            .get_mut(&key)
            .ok_or(Error::DeviceNotFound(device_id))?;

        let pending = PendingMutation {
            device_id,
            state_id,
            change,
            previous_state_id: device.state_id,
        };
        // Unlocked, so the current record is the confirmed one.
        self.confirmed.insert(key, device.clone());

        device.kind = new_kind;
        device.state_id = state_id;

        tracing::debug!(%device_id, %state_id, ?change, "Applied local change");
        Ok(pending)
    }

    /// Undoes an optimistic change whose request failed.
    ///
    /// The switch goes back to the last record the backend confirmed for
    /// it, which may come from a snapshot received while the change was in
    /// flight. Nothing is restored if the record has been superseded since
    /// (a newer change, or a snapshot that already confirms the change).
    /// Returns `true` if a confirmed record was restored.
    pub fn rollback(&mut self, pending: &PendingMutation) -> bool {
        let key = DeviceKey::switch(pending.device_id);
        let Some(device) = self.devices.get(&key) else {
            return false;
        };
        let confirmed = self.confirmed_state_id(device);

        if device.state_id != pending.state_id || confirmed >= pending.state_id {
            tracing::debug!(
                device_id = %pending.device_id,
                state_id = %pending.state_id,
                current = %device.state_id,
                %confirmed,
                "Skipping rollback of superseded change"
            );
            return false;
        }

        let Some(restored) = self.confirmed.remove(&key) else {
            tracing::warn!(
                device_id = %pending.device_id,
                state_id = %pending.state_id,
                "No confirmed record to roll back to"
            );
            return false;
        };
        tracing::debug!(
            device_id = %pending.device_id,
            state_id = %pending.state_id,
            restored = %restored.state_id,
            "Rolled back local change"
        );
        self.devices.insert(key, restored);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::types::DeviceType;

    const ROOM: RoomId = RoomId::new(1);

    fn switch(id: i64, enabled: bool, state_id: u64) -> Device {
        Device {
            id: DeviceId::new(id),
            name: format!("Switch {id}"),
            device_type: DeviceType::new(DeviceType::POWER),
            room_id: ROOM,
            state_id: StateId::new(state_id),
            kind: DeviceKind::Switch { enabled },
        }
    }

    fn snapshot(state_id: u64, devices: Vec<Device>) -> RoomSnapshot {
        RoomSnapshot {
            room: Room::new(ROOM, "Kitchen", "kitchen").with_state_id(StateId::new(state_id)),
            devices,
        }
    }

    fn synced_store() -> DeviceStateStore {
        let mut store = DeviceStateStore::new();
        store.apply_snapshot(snapshot(3, vec![switch(7, false, 3)]));
        store
    }

    #[test]
    fn merge_keeps_newer_local_record() {
        let local = switch(7, true, 5);
        let merged = merge_devices([&local], StateId::new(4), vec![switch(7, false, 4)]);
        assert_eq!(merged, vec![local]);
    }

    #[test]
    fn merge_replaces_when_room_caught_up() {
        let local = switch(7, true, 5);
        let merged = merge_devices([&local], StateId::new(5), vec![switch(7, false, 5)]);
        assert_eq!(merged, vec![switch(7, false, 5)]);
    }

    #[test]
    fn merge_drops_devices_missing_from_snapshot() {
        let a = switch(1, true, 1);
        let b = switch(2, true, 1);
        let merged = merge_devices([&a, &b], StateId::new(1), vec![switch(1, false, 1)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, DeviceId::new(1));
    }

    #[test]
    fn merge_adds_new_devices() {
        let merged = merge_devices(Vec::<&Device>::new(), StateId::new(1), vec![switch(9, true, 1)]);
        assert_eq!(merged, vec![switch(9, true, 1)]);
    }

    #[test]
    fn first_snapshot_creates_records() {
        let store = synced_store();
        assert_eq!(store.room(ROOM).unwrap().state_id, StateId::new(3));
        assert_eq!(store.devices_in(ROOM).count(), 1);
        assert_eq!(store.sync_status(DeviceId::new(7)), Some(SyncStatus::Synced));
    }

    #[test]
    fn stale_snapshot_is_discarded() {
        let mut store = synced_store();
        let outcome = store.apply_snapshot(snapshot(2, vec![switch(7, true, 2)]));

        assert_eq!(
            outcome,
            MergeOutcome::Stale {
                confirmed: StateId::new(3),
                received: StateId::new(2),
            }
        );
        assert_eq!(store.switch(DeviceId::new(7)).unwrap().enabled(), Some(false));
    }

    #[test]
    fn identical_snapshot_reports_unchanged() {
        let mut store = synced_store();
        let outcome = store.apply_snapshot(snapshot(3, vec![switch(7, false, 3)]));
        assert!(!outcome.changed());
    }

    #[test]
    fn local_change_locks_device() {
        let mut store = synced_store();
        let pending = store
            .apply_local(DeviceId::new(7), StateChange::switch(true), StateId::new(4))
            .unwrap();

        assert_eq!(pending.previous_state_id(), StateId::new(3));
        assert!(store.is_locked(DeviceId::new(7)));
        assert_eq!(
            store.sync_status(DeviceId::new(7)),
            Some(SyncStatus::PendingLocal {
                pending: StateId::new(4),
                confirmed: StateId::new(3),
            })
        );

        let err = store
            .apply_local(DeviceId::new(7), StateChange::switch(false), StateId::new(5))
            .unwrap_err();
        assert!(matches!(err, Error::Device(DeviceError::Locked(_))));
    }

    #[test]
    fn pending_change_survives_stale_poll_then_confirms() {
        let mut store = synced_store();
        store
            .apply_local(DeviceId::new(7), StateChange::switch(true), StateId::new(4))
            .unwrap();

        let outcome = store.apply_snapshot(snapshot(3, vec![switch(7, false, 3)]));
        assert!(matches!(outcome, MergeOutcome::Applied { pending: 1, .. }));
        assert!(store.is_locked(DeviceId::new(7)));
        assert_eq!(store.switch(DeviceId::new(7)).unwrap().enabled(), Some(true));

        store.apply_snapshot(snapshot(4, vec![switch(7, true, 4)]));
        assert!(!store.is_locked(DeviceId::new(7)));
        assert_eq!(store.switch(DeviceId::new(7)).unwrap().enabled(), Some(true));
    }

    #[test]
    fn rollback_restores_previous_value() {
        let mut store = synced_store();
        let pending = store
            .apply_local(DeviceId::new(7), StateChange::switch(true), StateId::new(4))
            .unwrap();

        assert!(store.rollback(&pending));
        let device = store.switch(DeviceId::new(7)).unwrap();
        assert_eq!(device.enabled(), Some(false));
        assert_eq!(device.state_id, StateId::new(3));
        assert!(!store.is_locked(DeviceId::new(7)));
    }

    #[test]
    fn rollback_restores_record_confirmed_mid_flight() {
        let mut store = synced_store();
        let pending = store
            .apply_local(DeviceId::new(7), StateChange::switch(false), StateId::new(5))
            .unwrap();

        // Another client switched it on; the backend is at 4, before our 5.
        let outcome = store.apply_snapshot(snapshot(4, vec![switch(7, true, 4)]));
        assert!(matches!(outcome, MergeOutcome::Applied { pending: 1, .. }));
        assert!(store.is_locked(DeviceId::new(7)));

        assert!(store.rollback(&pending));
        assert_eq!(store.switch(DeviceId::new(7)), Some(&switch(7, true, 4)));
        assert_eq!(store.sync_status(DeviceId::new(7)), Some(SyncStatus::Synced));
    }

    #[test]
    fn rollback_skipped_after_confirmation() {
        let mut store = synced_store();
        let pending = store
            .apply_local(DeviceId::new(7), StateChange::switch(true), StateId::new(4))
            .unwrap();
        store.apply_snapshot(snapshot(4, vec![switch(7, true, 4)]));

        assert!(!store.rollback(&pending));
        assert_eq!(store.switch(DeviceId::new(7)).unwrap().enabled(), Some(true));
    }

    #[test]
    fn switch_and_sensor_with_same_id_are_both_kept() {
        let mut store = DeviceStateStore::new();
        let mut thermometer = switch(1, false, 1);
        thermometer.device_type = DeviceType::new(DeviceType::TEMPERATURE);
        thermometer.kind = DeviceKind::Sensor { value: 21.5 };

        let outcome = store.apply_snapshot(snapshot(1, vec![switch(1, true, 1), thermometer]));

        assert!(matches!(outcome, MergeOutcome::Applied { devices: 2, .. }));
        assert_eq!(store.devices().count(), 2);
        assert_eq!(store.switch(DeviceId::new(1)).unwrap().enabled(), Some(true));
        assert_eq!(store.sensor(DeviceId::new(1)).unwrap().value(), Some(21.5));

        store
            .apply_local(DeviceId::new(1), StateChange::switch(false), StateId::new(2))
            .unwrap();
        assert_eq!(store.sensor(DeviceId::new(1)).unwrap().value(), Some(21.5));
    }

    #[test]
    fn sensor_only_id_is_read_only() {
        let mut store = DeviceStateStore::new();
        let mut thermometer = switch(5, false, 1);
        thermometer.kind = DeviceKind::Sensor { value: 19.0 };
        store.apply_snapshot(snapshot(1, vec![thermometer]));

        let err = store
            .check_local(DeviceId::new(5), StateChange::switch(true))
            .unwrap_err();
        assert!(matches!(err, Error::Device(DeviceError::ReadOnly(_))));
    }

    #[test]
    fn check_local_does_not_modify_store() {
        let mut store = synced_store();
        let before = store.clone();

        store
            .check_local(DeviceId::new(7), StateChange::switch(true))
            .unwrap();
        assert_eq!(store, before);

        store
            .apply_local(DeviceId::new(7), StateChange::switch(true), StateId::new(4))
            .unwrap();
        assert!(matches!(
            store.check_local(DeviceId::new(7), StateChange::switch(false)),
            Err(Error::Device(DeviceError::Locked(_)))
        ));
    }

    #[test]
    fn unknown_device_is_rejected() {
        let mut store = synced_store();
        let err = store
            .apply_local(DeviceId::new(99), StateChange::switch(true), StateId::new(4))
            .unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id == DeviceId::new(99)));
    }

    #[test]
    fn failed_validation_leaves_device_untouched() {
        let mut store = DeviceStateStore::new();
        let mut dimmer = switch(3, true, 1);
        dimmer.kind = DeviceKind::RangeSwitch {
            enabled: true,
            value: 10.0,
            min: 0.0,
            max: 50.0,
        };
        store.apply_snapshot(snapshot(1, vec![dimmer.clone()]));

        let err = store
            .apply_local(DeviceId::new(3), StateChange::range(true, 70.0), StateId::new(2))
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::OutOfRange { .. })));
        assert_eq!(store.switch(DeviceId::new(3)), Some(&dimmer));
    }

    #[test]
    fn merge_rooms_never_lowers_state() {
        let mut store = synced_store();
        let added = store.merge_rooms(vec![
            Room::new(ROOM, "Kitchen", "kitchen"),
            Room::new(RoomId::new(2), "Hall", "hall"),
        ]);

        assert_eq!(added, 1);
        assert_eq!(store.room(ROOM).unwrap().state_id, StateId::new(3));
        assert_eq!(store.rooms().count(), 2);
    }

    #[test]
    fn reading_finds_sensor_by_type() {
        let mut store = DeviceStateStore::new();
        let mut thermometer = switch(5, false, 1);
        thermometer.device_type = DeviceType::new(DeviceType::TEMPERATURE);
        thermometer.kind = DeviceKind::Sensor { value: 21.5 };
        store.apply_snapshot(snapshot(1, vec![thermometer]));

        assert_eq!(store.reading(ROOM, DeviceType::TEMPERATURE), Some(21.5));
        assert_eq!(store.reading(ROOM, DeviceType::HUMIDITY), None);
    }
}
