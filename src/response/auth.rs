// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Auth endpoint responses.

use serde::Deserialize;

use crate::auth::AuthToken;

/// Successful login response: `{"token": "..."}`.
///
/// ```
/// use smarthome_sync::response::TokenResponse;
///
/// let response: TokenResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
/// assert_eq!(response.token.as_str(), "abc");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The issued bearer token.
    pub token: AuthToken,
}

/// Error body returned by the auth endpoints: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_body() {
        let response: ErrorResponse =
            serde_json::from_str(r#"{"error": "User already exists"}"#).unwrap();
        assert_eq!(response.error, "User already exists");
    }

    #[test]
    fn missing_token_is_an_error() {
        assert!(serde_json::from_str::<TokenResponse>("{}").is_err());
    }
}
