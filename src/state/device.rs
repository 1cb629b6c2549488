// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records.

use std::fmt;

use serde::Serialize;

use crate::types::{DeviceId, DeviceType, RoomId, StateId};

/// Id space a device id belongs to.
///
/// Switches and range switches are both patched through `/api/switches` and
/// share ids; sensors are numbered separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceNamespace {
    /// Switches and range switches.
    Switch,
    /// Sensors.
    Sensor,
}

/// Store key of a device: its id within its namespace.
///
/// ```
/// use smarthome_sync::state::DeviceKey;
/// use smarthome_sync::types::DeviceId;
///
/// let id = DeviceId::new(1);
/// assert_ne!(DeviceKey::switch(id), DeviceKey::sensor(id));
/// assert_eq!(DeviceKey::sensor(id).to_string(), "sensor 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeviceKey {
    /// Id space of `id`.
    pub namespace: DeviceNamespace,
    /// Backend identifier.
    pub id: DeviceId,
}

impl DeviceKey {
    /// Key of a switch or range switch.
    #[must_use]
    pub const fn switch(id: DeviceId) -> Self {
        Self {
            namespace: DeviceNamespace::Switch,
            id,
        }
    }

    /// Key of a sensor.
    #[must_use]
    pub const fn sensor(id: DeviceId) -> Self {
        Self {
            namespace: DeviceNamespace::Sensor,
            id,
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            DeviceNamespace::Switch => write!(f, "switch {}", self.id),
            DeviceNamespace::Sensor => write!(f, "sensor {}", self.id),
        }
    }
}

/// A switch, range switch, or sensor as last known by the client.
///
/// `state_id` is the version at which the device's value was last
/// legitimately set: either the owning room's confirmed version when the
/// record came from the backend, or the id of a mutation the client issued
/// and has not seen confirmed yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    /// Backend identifier.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// What the device controls or measures.
    pub device_type: DeviceType,
    /// Owning room.
    pub room_id: RoomId,
    /// Version of the current value.
    pub state_id: StateId,
    /// Kind-specific state.
    pub kind: DeviceKind,
}

/// Kind-specific device state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceKind {
    /// On/off switch.
    Switch {
        /// Whether the switch is on.
        enabled: bool,
    },
    /// Switch with an adjustable level.
    RangeSwitch {
        /// Whether the switch is on.
        enabled: bool,
        /// Current level, within `[min, max]`.
        value: f64,
        /// Lowest level.
        min: f64,
        /// Highest level.
        max: f64,
    },
    /// Read-only measurement.
    Sensor {
        /// Latest reading.
        value: f64,
    },
}

impl DeviceKind {
    /// Returns a short name for the kind, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Switch { .. } => "switch",
            Self::RangeSwitch { .. } => "range switch",
            Self::Sensor { .. } => "sensor",
        }
    }
}

impl Device {
    /// Returns the device's store key.
    #[must_use]
    pub const fn key(&self) -> DeviceKey {
        match self.kind {
            DeviceKind::Sensor { .. } => DeviceKey::sensor(self.id),
            DeviceKind::Switch { .. } | DeviceKind::RangeSwitch { .. } => {
                DeviceKey::switch(self.id)
            }
        }
    }

    /// Returns `true` if the client can change this device.
    #[must_use]
    pub fn is_controllable(&self) -> bool {
        !matches!(self.kind, DeviceKind::Sensor { .. })
    }

    /// Returns the on/off state, or `None` for sensors.
    #[must_use]
    pub fn enabled(&self) -> Option<bool> {
        match self.kind {
            DeviceKind::Switch { enabled } | DeviceKind::RangeSwitch { enabled, .. } => {
                Some(enabled)
            }
            DeviceKind::Sensor { .. } => None,
        }
    }

    /// Returns the numeric value, or `None` for plain switches.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self.kind {
            DeviceKind::RangeSwitch { value, .. } | DeviceKind::Sensor { value } => Some(value),
            DeviceKind::Switch { .. } => None,
        }
    }

    /// Returns `true` if this device is a sensor.
    #[must_use]
    pub fn is_sensor(&self) -> bool {
        matches!(self.kind, DeviceKind::Sensor { .. })
    }
}
