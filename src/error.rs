// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `smarthome_sync` library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: value validation, backend communication, response parsing, and
//! local device operations.
//!
//! Two classifiers drive the sync policy:
//!
//! - [`Error::is_authentication_failure`] is the only condition that clears
//!   the session token.
//! - [`Error::is_transient`] failures are retried on the next poll tick.

use thiserror::Error;

use crate::types::{DeviceId, StateId};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the backend.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a backend response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A local device operation was rejected.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// No session token is available for an authenticated request.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Device is not present in the store.
    #[error("device {0} not found")]
    DeviceNotFound(DeviceId),

    /// The state counter reached its maximum; no larger id can be issued.
    #[error("state ids exhausted at {0}")]
    StateIdsExhausted(StateId),
}

impl Error {
    /// Returns `true` if the backend rejected the session credentials.
    ///
    /// Only HTTP 401 and 403 responses (or a missing token) count as
    /// authentication failures. Transport errors and other status codes
    /// do not.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Protocol(ProtocolError::AuthenticationFailed { .. })
        )
    }

    /// Returns `true` if retrying the same request later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Protocol(err) => err.is_transient(),
            _ => false,
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
        /// The actual value that was provided.
        actual: f64,
    },

    /// A value is NaN or infinite.
    #[error("value {0} is not a finite number")]
    NotFinite(f64),
}

/// Errors related to backend communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the transport level.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the backend failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The backend answered 401 or 403.
    #[error("authentication failed (HTTP {code})")]
    AuthenticationFailed {
        /// The HTTP status code.
        code: u16,
    },

    /// The backend answered with a non-success status.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// The backend rejected the request with an explanatory message.
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ProtocolError {
    /// Returns `true` for failures worth retrying on the next poll.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(_) => true,
            Self::ConnectionFailed(_) | Self::Timeout(_) => true,
            Self::Status { code, .. } => *code >= 500 || *code == 408 || *code == 429,
            Self::InvalidAddress(_) | Self::AuthenticationFailed { .. } | Self::Rejected(_) => {
                false
            }
        }
    }
}

/// Errors related to parsing backend responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to validate a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// Two arrays that must be parallel have different lengths.
    #[error("length mismatch: {left} timestamps but {right} values")]
    LengthMismatch {
        /// Length of the first array.
        left: usize,
        /// Length of the second array.
        right: usize,
    },
}

/// Errors related to local device operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device is waiting for the backend to confirm a previous change.
    #[error("device {0} has a pending change")]
    Locked(DeviceId),

    /// The device cannot be changed by the client.
    #[error("device {0} is read-only")]
    ReadOnly(DeviceId),

    /// The requested change does not fit the device kind.
    #[error("device {device_id} is a {kind}, cannot apply {change}")]
    KindMismatch {
        /// The targeted device.
        device_id: DeviceId,
        /// The device kind.
        kind: &'static str,
        /// The attempted change.
        change: &'static str,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0.0,
            max: 100.0,
            actual: 150.0,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn exhausted_state_ids_are_neither_auth_nor_transient() {
        let err = Error::StateIdsExhausted(StateId::MAX);
        assert_eq!(err.to_string(), format!("state ids exhausted at {}", u64::MAX));
        assert!(!err.is_transient());
        assert!(!err.is_authentication_failure());
    }

    #[test]
    fn auth_failure_classification() {
        let err: Error = ProtocolError::AuthenticationFailed { code: 401 }.into();
        assert!(err.is_authentication_failure());
        assert!(!err.is_transient());

        assert!(Error::NotAuthenticated.is_authentication_failure());
    }

    #[test]
    fn server_errors_are_transient_not_auth() {
        let err: Error = ProtocolError::Status {
            code: 504,
            reason: "Gateway Timeout".to_string(),
        }
        .into();
        assert!(err.is_transient());
        assert!(!err.is_authentication_failure());
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err: Error = ProtocolError::Status {
            code: 404,
            reason: "Not Found".to_string(),
        }
        .into();
        assert!(!err.is_transient());
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::KindMismatch {
            device_id: DeviceId::new(7),
            kind: "sensor",
            change: "switch",
        };
        assert_eq!(err.to_string(), "device 7 is a sensor, cannot apply switch");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::LengthMismatch { left: 3, right: 2 };
        assert_eq!(err.to_string(), "length mismatch: 3 timestamps but 2 values");
    }
}
