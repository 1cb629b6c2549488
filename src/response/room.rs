// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room endpoint responses.

use serde::Deserialize;

use crate::error::ParseError;
use crate::state::{Device, DeviceKind, Room, RoomSnapshot};
use crate::types::{DeviceId, DeviceType, RoomId, RoomScope, StateId};

/// Bounds assumed for range switches when the backend omits them.
const DEFAULT_RANGE: (f64, f64) = (0.0, 100.0);

/// Response of `GET /api/rooms`.
///
/// ```
/// use smarthome_sync::response::RoomListResponse;
///
/// let json = r#"{"rooms": [{"id": 1, "name": "Kitchen", "type": "kitchen"}]}"#;
/// let response: RoomListResponse = serde_json::from_str(json).unwrap();
/// let rooms = response.into_rooms();
/// assert_eq!(rooms[0].name, "Kitchen");
/// assert_eq!(rooms[0].state_id.get(), 0);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RoomListResponse {
    /// Listed rooms.
    pub rooms: Vec<RoomRecord>,
}

impl RoomListResponse {
    /// Converts the listed rooms. Their state is not confirmed yet.
    #[must_use]
    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms
            .into_iter()
            .map(|r| Room::new(r.id, r.name, r.room_type))
            .collect()
    }
}

/// A room entry of the room list.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRecord {
    /// Room id.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Room type tag.
    #[serde(rename = "type")]
    pub room_type: String,
}

/// A switch as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchRecord {
    /// Switch id.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Device type tag.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Whether the switch is on.
    pub enabled: bool,
}

/// A range switch as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSwitchRecord {
    /// Switch id.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Device type tag.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Whether the switch is on.
    pub enabled: bool,
    /// Current level.
    pub value: f64,
    /// Lowest level, if reported.
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Highest level, if reported.
    #[serde(default)]
    pub max_value: Option<f64>,
}

/// A sensor as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorRecord {
    /// Sensor id.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Device type tag.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Latest reading.
    pub value: f64,
}

/// Response of `GET /api/rooms/{id}`, `/api/rooms/home` and
/// `/api/rooms/outside`.
///
/// Every device array is optional; the home room, for instance, only carries
/// whole-house switches and sensors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailsResponse {
    /// Room id. Numbered-room responses may omit it.
    #[serde(default)]
    pub id: Option<RoomId>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Room type tag.
    #[serde(default, rename = "type")]
    pub room_type: Option<String>,
    /// The room's current state version.
    pub state_id: StateId,
    /// Switches in the room.
    #[serde(default)]
    pub switches: Vec<SwitchRecord>,
    /// Range switches in the room.
    #[serde(default)]
    pub range_switches: Vec<RangeSwitchRecord>,
    /// Sensors in the room.
    #[serde(default)]
    pub sensors: Vec<SensorRecord>,
}

impl RoomDetailsResponse {
    /// Validates the response and converts it into a room snapshot.
    ///
    /// `scope` is the endpoint the response came from; it supplies the room
    /// id when the body omits it. Every device is tagged with the room's
    /// `stateId`.
    ///
    /// # Errors
    ///
    /// Returns an error if the room id cannot be determined, a number is not
    /// finite, or the backend reports inverted bounds for a range switch. A
    /// range switch whose value lies outside its reported bounds is left out
    /// of the snapshot instead.
    pub fn into_snapshot(self, scope: RoomScope) -> Result<RoomSnapshot, ParseError> {
        let room_id = self
            .id
            .or_else(|| scope.room_id())
            .ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        let state_id = self.state_id;

        let room = Room {
            id: room_id,
            name: self.name.unwrap_or_else(|| scope.tag().to_string()),
            room_type: self.room_type.unwrap_or_else(|| scope.tag().to_string()),
            state_id,
        };

        let device = |id, name, device_type, kind| Device {
            id,
            name,
            device_type,
            room_id,
            state_id,
            kind,
        };

        let mut devices =
            Vec::with_capacity(self.switches.len() + self.range_switches.len() + self.sensors.len());

        for s in self.switches {
            devices.push(device(
                s.id,
                s.name,
                s.device_type,
                DeviceKind::Switch { enabled: s.enabled },
            ));
        }

        for r in self.range_switches {
            if let Some(kind) = range_kind(&r)? {
                devices.push(device(r.id, r.name, r.device_type, kind));
            }
        }

        for s in self.sensors {
            finite(s.id, "value", s.value)?;
            devices.push(device(
                s.id,
                s.name,
                s.device_type,
                DeviceKind::Sensor { value: s.value },
            ));
        }

        Ok(RoomSnapshot { room, devices })
    }
}

fn finite(id: DeviceId, field: &str, value: f64) -> Result<f64, ParseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidValue {
            field: format!("device {id} {field}"),
            message: format!("{value} is not a finite number"),
        })
    }
}

/// Converts a range switch record, or `None` if it has to be skipped.
///
/// Missing bounds default to `[0, 100]`, widened to include the reported
/// value. A value outside bounds the backend did report drops only that
/// switch.
fn range_kind(record: &RangeSwitchRecord) -> Result<Option<DeviceKind>, ParseError> {
    let id = record.id;
    let value = finite(id, "value", record.value)?;
    let min = match record.min_value {
        Some(min) => finite(id, "minValue", min)?,
        None => DEFAULT_RANGE.0.min(value),
    };
    let max = match record.max_value {
        Some(max) => finite(id, "maxValue", max)?,
        None => DEFAULT_RANGE.1.max(value),
    };

    if record.min_value.is_some() && record.max_value.is_some() && min > max {
        return Err(ParseError::InvalidValue {
            field: format!("device {id} range"),
            message: format!("min {min} is greater than max {max}"),
        });
    }
    if value < min || value > max {
        tracing::warn!(
            device_id = %id,
            value,
            min,
            max,
            "Skipping range switch with value outside its bounds"
        );
        return Ok(None);
    }

    Ok(Some(DeviceKind::RangeSwitch {
        enabled: record.enabled,
        value,
        min,
        max,
    }))
}
