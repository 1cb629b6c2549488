// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch update request.

use serde::Serialize;

use crate::state::StateChange;
use crate::types::{DeviceId, StateId};

use super::{Command, Method};

/// Sets a switch or range switch, tagged with the client-issued state id.
///
/// Plain switches send `{enabled, stateId}`; range switches also send
/// `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchUpdateCommand {
    switch_id: DeviceId,
    body: SwitchUpdateBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchUpdateBody {
    enabled: bool,
    state_id: StateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

impl SwitchUpdateCommand {
    /// Creates an update from a state change.
    #[must_use]
    pub fn new(switch_id: DeviceId, change: StateChange, state_id: StateId) -> Self {
        Self {
            switch_id,
            body: SwitchUpdateBody {
                enabled: change.enabled(),
                state_id,
                value: change.value(),
            },
        }
    }

    /// Creates an on/off update.
    #[must_use]
    pub fn switch(switch_id: DeviceId, enabled: bool, state_id: StateId) -> Self {
        Self::new(switch_id, StateChange::switch(enabled), state_id)
    }

    /// Returns the targeted switch.
    #[must_use]
    pub fn switch_id(&self) -> DeviceId {
        self.switch_id
    }

    /// Returns the state id the update is tagged with.
    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.body.state_id
    }
}

impl Command for SwitchUpdateCommand {
    fn method(&self) -> Method {
        Method::Patch
    }

    fn path(&self) -> String {
        format!("/api/switches/{}", self.switch_id)
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self.body).ok()
    }
}
