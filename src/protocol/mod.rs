// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend communication.
//!
//! The sync components talk to the backend through the [`Backend`] trait.
//! [`ApiClient`] implements it over HTTP; tests substitute in-memory fakes.
//!
//! # Status handling
//!
//! - 2xx: success
//! - 401 / 403: [`ProtocolError::AuthenticationFailed`]
//! - anything else: [`ProtocolError::Status`], a failed fetch and never a
//!   panic

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{ApiClient, ApiConfig};

use std::future::Future;

use crate::command::SwitchUpdateCommand;
use crate::error::{ParseError, ProtocolError};
use crate::state::{Room, RoomSnapshot};
use crate::types::RoomScope;

/// Raw response body from the backend.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw JSON response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Maps an HTTP status code to a protocol error, or `None` on success.
///
/// ```
/// use smarthome_sync::error::ProtocolError;
/// use smarthome_sync::protocol::status_error;
///
/// assert!(status_error(204, None).is_none());
/// assert!(matches!(
///     status_error(403, None),
///     Some(ProtocolError::AuthenticationFailed { code: 403 })
/// ));
/// ```
#[must_use]
pub fn status_error(code: u16, reason: Option<&str>) -> Option<ProtocolError> {
    match code {
        200..=299 => None,
        401 | 403 => Some(ProtocolError::AuthenticationFailed { code }),
        _ => Some(ProtocolError::Status {
            code,
            reason: reason.unwrap_or("Unknown").to_string(),
        }),
    }
}

/// The backend operations the sync components depend on.
///
/// All futures are `Send` so the poll loop can run on a spawned task.
pub trait Backend: Send + Sync {
    /// Fetches the room list (`GET /api/rooms`).
    ///
    /// Listed rooms carry no confirmed state.
    fn fetch_rooms(&self) -> impl Future<Output = crate::Result<Vec<Room>>> + Send;

    /// Fetches one room with all its devices.
    fn fetch_room(&self, scope: RoomScope)
    -> impl Future<Output = crate::Result<RoomSnapshot>> + Send;

    /// Sends a switch update (`PATCH /api/switches/{id}`).
    fn update_switch(
        &self,
        command: SwitchUpdateCommand,
    ) -> impl Future<Output = crate::Result<()>> + Send;
}
