// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory session token.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;

/// Bearer token issued by the backend at login.
///
/// The `Debug` output is redacted so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Shared, clearable session token.
///
/// Clones share the same token, so clearing it in the poll loop after a 401
/// is visible to every component of the session.
///
/// # Examples
///
/// ```
/// use smarthome_sync::auth::{AuthToken, Session};
///
/// let session = Session::new();
/// assert!(!session.is_authenticated());
///
/// session.set_token(AuthToken::new("abc"));
/// assert_eq!(session.token().unwrap().bearer(), "Bearer abc");
///
/// session.clear();
/// assert!(session.token().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<AuthToken>>>,
}

impl Session {
    /// Creates a session without a token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from a previously issued token.
    #[must_use]
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }

    /// Returns the current token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    /// Returns `true` if a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Stores a new token.
    pub fn set_token(&self, token: AuthToken) {
        *self.token.write() = Some(token);
        tracing::info!("Session token stored");
    }

    /// Forgets the token. Returns `true` if there was one.
    pub fn clear(&self) -> bool {
        let had_token = self.token.write().take().is_some();
        if had_token {
            tracing::info!("Session token cleared");
        }
        had_token
    }
}
