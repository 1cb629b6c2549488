// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the library.
//!
//! # Types
//!
//! - [`DeviceId`] / [`RoomId`] - Backend-assigned identifiers
//! - [`StateId`] - Version of a room or device state
//! - [`DeviceType`] - Open tag describing what a device controls or measures
//! - [`RoomScope`] - Which room-details endpoint to fetch

mod device_type;
mod ids;
mod room_scope;
mod state_id;

pub use device_type::DeviceType;
pub use ids::{DeviceId, RoomId};
pub use room_scope::RoomScope;
pub use state_id::StateId;
