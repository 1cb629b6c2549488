// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device type tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a device controls or measures.
///
/// The backend uses an open set of string tags, so this is a thin wrapper
/// around the raw tag with constants for the tags known to be in use.
/// Unknown tags are preserved as-is.
///
/// # Examples
///
/// ```
/// use smarthome_sync::types::DeviceType;
///
/// let tag = DeviceType::new("temperature");
/// assert_eq!(tag, DeviceType::TEMPERATURE);
/// assert!(tag.is(DeviceType::TEMPERATURE));
///
/// let custom = DeviceType::new("garage-door");
/// assert_eq!(custom.as_str(), "garage-door");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceType(String);

impl DeviceType {
    /// Mains power switch or electricity meter.
    pub const POWER: &'static str = "power";
    /// Door lock.
    pub const LOCK: &'static str = "lock";
    /// Light.
    pub const LIGHT: &'static str = "light";
    /// Climate control. The backend spells it without the trailing "e".
    pub const CLIMATE: &'static str = "climat";
    /// Temperature sensor.
    pub const TEMPERATURE: &'static str = "temperature";
    /// Humidity sensor.
    pub const HUMIDITY: &'static str = "humidity";

    /// Wraps a raw tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the given tag.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for DeviceType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for DeviceType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
