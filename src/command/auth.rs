// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login and registration requests.

use std::fmt;

use super::{Command, Method};

/// Username and password pair sent to the auth endpoints.
#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Exchanges credentials for a bearer token.
#[derive(Debug, Clone)]
pub struct LoginCommand(Credentials);

impl LoginCommand {
    /// Creates a login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self(Credentials {
            username: username.into(),
            password: password.into(),
        })
    }
}

impl Command for LoginCommand {
    fn method(&self) -> Method {
        Method::Post
    }

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        Some(self.0.to_json())
    }

    fn requires_auth(&self) -> bool {
        false
    }
}

/// Creates a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand(Credentials);

impl RegisterCommand {
    /// Creates a registration request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self(Credentials {
            username: username.into(),
            password: password.into(),
        })
    }
}

impl Command for RegisterCommand {
    fn method(&self) -> Method {
        Method::Post
    }

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        Some(self.0.to_json())
    }

    fn requires_auth(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body() {
        let cmd = LoginCommand::new("alice", "pw");
        assert_eq!(cmd.path(), "/api/auth/login");
        assert!(!cmd.requires_auth());
        assert_eq!(
            cmd.body(),
            Some(serde_json::json!({ "username": "alice", "password": "pw" }))
        );
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", RegisterCommand::new("bob", "hunter2"));
        assert!(debug.contains("bob"));
        assert!(!debug.contains("hunter2"));
    }
}
