// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State version type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version tag for room and device state.
///
/// The backend reports a `stateId` for every room it returns; the client
/// tags each mutation it sends with a fresh, larger id. Comparing the two
/// decides whether a local edit is still pending.
///
/// # Examples
///
/// ```
/// use smarthome_sync::types::StateId;
///
/// let confirmed = StateId::new(3);
/// let pending = confirmed.next();
/// assert!(pending > confirmed);
/// assert_eq!(pending.get(), 4);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StateId(u64);

impl StateId {
    /// The initial version, before anything has been confirmed.
    pub const ZERO: Self = Self(0);

    /// The largest representable version.
    pub const MAX: Self = Self(u64::MAX);

    /// Wraps a raw version number.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the version directly after this one, or `None` at
    /// [`StateId::MAX`].
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the version directly after this one, saturating at
    /// [`StateId::MAX`].
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StateId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(StateId::default(), StateId::ZERO);
    }

    #[test]
    fn next_saturates_at_max() {
        assert_eq!(StateId::new(3).checked_next(), Some(StateId::new(4)));
        assert_eq!(StateId::MAX.checked_next(), None);
        assert_eq!(StateId::MAX.next(), StateId::MAX);
    }

    #[test]
    fn deserializes_from_number() {
        let id: StateId = serde_json::from_str("17").unwrap();
        assert_eq!(id.get(), 17);
    }
}
