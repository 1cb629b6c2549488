// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client-initiated device changes.
//!
//! A [`StateChange`] is what the user asks for: flip a switch, or set a range
//! switch to a level. It is applied optimistically to the local store and
//! sent to the backend tagged with a fresh state id.
//!
//! # Examples
//!
//! ```
//! use smarthome_sync::state::StateChange;
//!
//! let on = StateChange::switch(true);
//! let dim = StateChange::range(true, 35.0);
//!
//! assert_eq!(on.enabled(), true);
//! assert_eq!(dim.value(), Some(35.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, ValueError};
use crate::types::DeviceId;

use super::DeviceKind;

/// A change the client wants to make to a device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// Turn a switch on or off.
    Switch {
        /// The new on/off state.
        enabled: bool,
    },

    /// Set a range switch's on/off state and level.
    Range {
        /// The new on/off state.
        enabled: bool,
        /// The new level.
        value: f64,
    },
}

impl StateChange {
    /// Creates a switch change.
    #[must_use]
    pub const fn switch(enabled: bool) -> Self {
        Self::Switch { enabled }
    }

    /// Creates a range switch change.
    #[must_use]
    pub const fn range(enabled: bool, value: f64) -> Self {
        Self::Range { enabled, value }
    }

    /// Returns the requested on/off state.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        match self {
            Self::Switch { enabled } | Self::Range { enabled, .. } => *enabled,
        }
    }

    /// Returns the requested level, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Switch { .. } => None,
            Self::Range { value, .. } => Some(*value),
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Switch { .. } => "switch",
            Self::Range { .. } => "range",
        }
    }

    /// Returns the change that flips the on/off state of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ReadOnly`] for sensors.
    pub fn toggle_of(device_id: DeviceId, kind: &DeviceKind) -> Result<Self, DeviceError> {
        match *kind {
            DeviceKind::Switch { enabled } => Ok(Self::switch(!enabled)),
            DeviceKind::RangeSwitch { enabled, value, .. } => Ok(Self::range(!enabled, value)),
            DeviceKind::Sensor { .. } => Err(DeviceError::ReadOnly(device_id)),
        }
    }

    /// Applies this change to `kind`, returning the new kind state.
    ///
    /// # Errors
    ///
    /// Returns an error if the change does not fit the device kind, if the
    /// device is a sensor, or if a range value is outside the device bounds.
    pub(crate) fn apply_to(
        &self,
        device_id: DeviceId,
        kind: &DeviceKind,
    ) -> crate::Result<DeviceKind> {
        match (*self, *kind) {
            (_, DeviceKind::Sensor { .. }) => Err(DeviceError::ReadOnly(device_id).into()),
            (Self::Switch { enabled }, DeviceKind::Switch { .. }) => {
                Ok(DeviceKind::Switch { enabled })
            }
            (Self::Range { enabled, value }, DeviceKind::RangeSwitch { min, max, .. }) => {
                if !value.is_finite() {
                    return Err(ValueError::NotFinite(value).into());
                }
                if value < min || value > max {
                    return Err(ValueError::OutOfRange {
                        min,
                        max,
                        actual: value,
                    }
                    .into());
                }
                Ok(DeviceKind::RangeSwitch {
                    enabled,
                    value,
                    min,
                    max,
                })
            }
            (change, kind) => Err(DeviceError::KindMismatch {
                device_id,
                kind: kind.name(),
                change: change.name(),
            }
            .into()),
        }
    }
}
