// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the backend API.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::auth::{AuthToken, Session};
use crate::command::{
    Command, LoginCommand, Method, RegisterCommand, RoomCommand, RoomListCommand,
    SensorHistoryCommand, SwitchUpdateCommand,
};
use crate::error::{Error, ProtocolError};
use crate::protocol::{Backend, CommandResponse, status_error};
use crate::response::{
    ErrorResponse, RoomDetailsResponse, RoomListResponse, SensorHistory, SensorHistoryResponse,
    TokenResponse,
};
use crate::state::{Room, RoomSnapshot};
use crate::types::{DeviceId, RoomScope};

// ============================================================================
// ApiConfig - Connection settings
// ============================================================================

/// Configuration for the backend connection.
///
/// # Examples
///
/// ```
/// use smarthome_sync::protocol::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new("http://192.168.1.10:8080/")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.10:8080");
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the backend at `base_url`.
    ///
    /// A trailing slash is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `ApiClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL has no `http://` or `https://` scheme or
    /// the HTTP client cannot be created.
    pub fn into_client(self, session: Session) -> Result<ApiClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(ApiClient {
            base_url: self.base_url,
            client,
            session,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// ApiClient - HTTP client for the backend
// ============================================================================

/// HTTP client for the smart-home backend.
///
/// Authenticated requests carry `Authorization: Bearer <token>` from the
/// shared [`Session`]. The client never clears the session itself; that
/// decision belongs to the sync components.
///
/// # Examples
///
/// ```no_run
/// use smarthome_sync::auth::Session;
/// use smarthome_sync::protocol::ApiConfig;
/// use smarthome_sync::types::RoomScope;
///
/// # async fn example() -> smarthome_sync::Result<()> {
/// let client = ApiConfig::new("http://192.168.1.10:8080").into_client(Session::new())?;
/// client.login("alice", "secret").await?;
///
/// let home = client.room(RoomScope::Home).await?;
/// println!("{} devices at home", home.devices.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: Session,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ProtocolError> {
        ApiConfig::new(base_url).into_client(session)
    }

    /// Returns the base URL of the backend.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the session used for authenticated requests.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Builds the URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(millis)
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }

    /// Sends a command and returns the status and raw body.
    async fn execute<C: Command + Sync>(&self, command: &C) -> Result<(StatusCode, String), Error> {
        let url = self.build_url(&command.path());

        let mut request = match command.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
        };

        if command.requires_auth() {
            let token = self.session.token().ok_or(Error::NotAuthenticated)?;
            request = request.header(reqwest::header::AUTHORIZATION, token.bearer());
        }

        if let Some(body) = command.body() {
            request = request.json(&body);
        }

        tracing::debug!(method = %command.method(), url = %url, "Sending request");

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        tracing::debug!(
            status = status.as_u16(),
            body = %LoggedBody::of(command, &body),
            "Received response"
        );

        Ok((status, body))
    }

    /// Sends a command and returns the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if the command needs a token and
    /// the session has none, a [`ProtocolError`] on transport failure or
    /// non-success status.
    pub async fn send<C: Command + Sync>(&self, command: &C) -> Result<CommandResponse, Error> {
        let (status, body) = self.execute(command).await?;
        match status_error(status.as_u16(), status.canonical_reason()) {
            Some(err) => Err(err.into()),
            None => Ok(CommandResponse::new(body)),
        }
    }

    /// Maps a failed auth request, preferring the backend's own message.
    fn auth_error(status: StatusCode, body: &str) -> Error {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) => ProtocolError::Rejected(response.error).into(),
            Err(_) => status_error(status.as_u16(), status.canonical_reason())
                .unwrap_or_else(|| ProtocolError::Rejected(format!("HTTP {status}")))
                .into(),
        }
    }

    // ========== Auth ==========

    /// Logs in and stores the issued token in the session.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Rejected`] with the backend's message when
    /// the credentials are refused, or a transport/parse error.
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AuthToken, Error> {
        let (status, body) = self.execute(&LoginCommand::new(username, password)).await?;
        if !status.is_success() {
            return Err(Self::auth_error(status, &body));
        }

        let response: TokenResponse = CommandResponse::new(body).parse()?;
        self.session.set_token(response.token.clone());
        tracing::info!("Logged in");
        Ok(response.token)
    }

    /// Creates an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Rejected`] with the backend's message when
    /// registration is refused, or a transport error.
    pub async fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), Error> {
        let (status, body) = self
            .execute(&RegisterCommand::new(username, password))
            .await?;
        if !status.is_success() {
            return Err(Self::auth_error(status, &body));
        }
        tracing::info!("Registered account");
        Ok(())
    }

    // ========== Rooms ==========

    /// Fetches the room list.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn rooms(&self) -> Result<Vec<Room>, Error> {
        let response: RoomListResponse = self.send(&RoomListCommand).await?.parse()?;
        Ok(response.into_rooms())
    }

    /// Fetches one room with its devices.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn room(&self, scope: RoomScope) -> Result<RoomSnapshot, Error> {
        let response: RoomDetailsResponse = self.send(&RoomCommand(scope)).await?.parse()?;
        Ok(response.into_snapshot(scope)?)
    }

    // ========== Devices ==========

    /// Sends a switch update.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_switch(&self, command: &SwitchUpdateCommand) -> Result<(), Error> {
        self.send(command).await?;
        Ok(())
    }

    /// Fetches the recorded values of a sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn sensor_history(&self, sensor_id: DeviceId) -> Result<SensorHistory, Error> {
        let response: SensorHistoryResponse =
            self.send(&SensorHistoryCommand(sensor_id)).await?.parse()?;
        Ok(SensorHistory::try_from(response)?)
    }
}

impl Backend for ApiClient {
    async fn fetch_rooms(&self) -> crate::Result<Vec<Room>> {
        self.rooms().await
    }

    async fn fetch_room(&self, scope: RoomScope) -> crate::Result<RoomSnapshot> {
        self.room(scope).await
    }

    async fn update_switch(&self, command: SwitchUpdateCommand) -> crate::Result<()> {
        self.set_switch(&command).await
    }
}

/// Response body as written to debug logs.
///
/// Bodies of unauthenticated commands (login, register) can carry a token
/// and are reduced to their length.
enum LoggedBody<'a> {
    Full(&'a str),
    Redacted(usize),
}

impl<'a> LoggedBody<'a> {
    fn of<C: Command>(command: &C, body: &'a str) -> Self {
        if command.requires_auth() {
            Self::Full(body)
        } else {
            Self::Redacted(body.len())
        }
    }
}

impl std::fmt::Display for LoggedBody<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full(body) => f.write_str(body),
            Self::Redacted(len) => write!(f, "<{len} bytes redacted>"),
        }
    }
}
