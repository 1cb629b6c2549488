// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend request definitions.
//!
//! Each request the client sends is a typed [`Command`]: an HTTP method, a
//! path under the backend base URL, and an optional JSON body.
//!
//! # Available Commands
//!
//! | Command | Endpoint |
//! |---------|----------|
//! | [`LoginCommand`] | `POST /api/auth/login` |
//! | [`RegisterCommand`] | `POST /api/auth/register` |
//! | [`RoomListCommand`] | `GET /api/rooms` |
//! | [`RoomCommand`] | `GET /api/rooms/{id}`, `/home`, `/outside` |
//! | [`SwitchUpdateCommand`] | `PATCH /api/switches/{id}` |
//! | [`SensorHistoryCommand`] | `GET /api/sensors/{id}/history` |
//!
//! # Examples
//!
//! ```
//! use smarthome_sync::command::{Command, Method, SwitchUpdateCommand};
//! use smarthome_sync::types::{DeviceId, StateId};
//!
//! let cmd = SwitchUpdateCommand::switch(DeviceId::new(7), true, StateId::new(4));
//!
//! assert_eq!(cmd.method(), Method::Patch);
//! assert_eq!(cmd.path(), "/api/switches/7");
//! assert_eq!(
//!     cmd.body(),
//!     Some(serde_json::json!({ "enabled": true, "stateId": 4 }))
//! );
//! ```

mod auth;
mod room;
mod sensor;
mod switch;

pub use auth::{LoginCommand, RegisterCommand};
pub use room::{RoomCommand, RoomListCommand};
pub use sensor::SensorHistoryCommand;
pub use switch::SwitchUpdateCommand;

use std::fmt;

/// HTTP method of a backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that can be sent to the backend.
pub trait Command {
    /// Returns the HTTP method.
    fn method(&self) -> Method;

    /// Returns the path, starting with `/api/`.
    fn path(&self) -> String;

    /// Returns the JSON body, if any.
    fn body(&self) -> Option<serde_json::Value> {
        None
    }

    /// Returns `true` if the request needs the session bearer token.
    fn requires_auth(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn defaults_are_authenticated_without_body() {
        let cmd = RoomListCommand;
        assert!(cmd.requires_auth());
        assert_eq!(cmd.body(), None);
    }
}
