// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for backend JSON responses.
//!
//! Wire records are deserialized with serde and then validated while being
//! converted into the library's own types, so malformed records never reach
//! the store.

mod auth;
mod history;
mod room;

pub use auth::{ErrorResponse, TokenResponse};
pub use history::{HistoryPoint, SensorHistory, SensorHistoryResponse};
pub use room::{
    RangeSwitchRecord, RoomDetailsResponse, RoomListResponse, RoomRecord, SensorRecord,
    SwitchRecord,
};
