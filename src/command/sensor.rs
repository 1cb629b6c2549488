// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor history query.

use crate::types::DeviceId;

use super::{Command, Method};

/// Fetches the recorded values of a sensor.
#[derive(Debug, Clone, Copy)]
pub struct SensorHistoryCommand(pub DeviceId);

impl Command for SensorHistoryCommand {
    fn method(&self) -> Method {
        Method::Get
    }

    fn path(&self) -> String {
        format!("/api/sensors/{}/history", self.0)
    }
}
