// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTPS client for the iComfort web service.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, ParseError, ProtocolError, Result};
use crate::protocol::VendorApi;
use crate::response::{
    GatewayInfoResponse, SetpointAck, SetpointUpdate, SystemsInfoResponse, ThermostatInfoResponse,
};

// ============================================================================
// IComfortConfig - account credentials and endpoint settings
// ============================================================================

/// Configuration for an iComfort account.
///
/// Credentials are held here and handed to the client at construction; there
/// is no process-wide credential state.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::protocol::IComfortConfig;
/// use std::time::Duration;
///
/// let config = IComfortConfig::new("user@example.com", "secret")
///     .with_base_url("http://localhost:8080/svc/")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://localhost:8080/svc");
/// assert_eq!(config.username(), "user@example.com");
/// ```
#[derive(Clone)]
pub struct IComfortConfig {
    username: String,
    password: String,
    base_url: String,
    timeout: Duration,
}

impl IComfortConfig {
    /// Default service root.
    pub const DEFAULT_BASE_URL: &'static str =
        "https://services.myicomfort.com/DBAcessService.svc";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given account.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the service root. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the account user name, which is also the account id.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the service root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `IComfortClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not HTTP(S) or the HTTP client cannot
    /// be created.
    pub fn into_client(self) -> std::result::Result<IComfortClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(IComfortClient {
            base_url: self.base_url,
            client,
            username: self.username,
            password: self.password,
        })
    }
}

impl fmt::Debug for IComfortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IComfortConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// IComfortClient - HTTP implementation of VendorApi
// ============================================================================

/// HTTP client for the iComfort web service.
///
/// Every call is one request with HTTP basic authentication. Temperatures are
/// always requested in Fahrenheit (`TempUnit=0`).
///
/// # Examples
///
/// ```no_run
/// use icomfort_bridge::protocol::{IComfortConfig, VendorApi};
///
/// # async fn example() -> icomfort_bridge::Result<()> {
/// let client = IComfortConfig::new("user@example.com", "secret").into_client()?;
/// let systems = client.systems_info("user@example.com").await?;
/// for system in &systems.systems {
///     println!("{} ({})", system.friendly_name(), system.gateway_sn);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IComfortClient {
    base_url: String,
    client: Client,
    username: String,
    password: String,
}

impl fmt::Debug for IComfortClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IComfortClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl IComfortClient {
    /// Returns the service root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a service operation.
    fn build_url(&self, operation: &str, query: &[(&str, &str)]) -> String {
        let query = query
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}/{operation}", self.base_url)
        } else {
            format!("{}/{operation}?{query}", self.base_url)
        }
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// `subject` names the account or gateway for not-found errors.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, subject: &str) -> Result<T> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed.into());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(Error::DeviceNotFound(subject.to_string()));
        }
        if !status.is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received iComfort response");

        serde_json::from_str(&body).map_err(|e| ParseError::Json(e).into())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> Result<T> {
        let url = self.build_url(operation, query);

        tracing::debug!(url = %url, "Sending iComfort request");

        self.execute(self.client.get(&url), subject).await
    }
}

impl VendorApi for IComfortClient {
    async fn systems_info(&self, user_id: &str) -> Result<SystemsInfoResponse> {
        self.get("GetSystemsInfo", &[("UserId", user_id)], user_id)
            .await
    }

    async fn thermostat_info(&self, gateway_sn: &str) -> Result<ThermostatInfoResponse> {
        self.get(
            "GetTStatInfoList",
            &[("GatewaySN", gateway_sn), ("TempUnit", "0")],
            gateway_sn,
        )
        .await
    }

    async fn gateway_info(&self, gateway_sn: &str) -> Result<GatewayInfoResponse> {
        self.get(
            "GetGatewayInfo",
            &[("GatewaySN", gateway_sn), ("TempUnit", "0")],
            gateway_sn,
        )
        .await
    }

    async fn set_thermostat_info(&self, update: &SetpointUpdate) -> Result<SetpointAck> {
        let url = self.build_url("SetTStatInfo", &[]);

        tracing::debug!(url = %url, ?update, "Sending iComfort setpoint write");

        self.execute(self.client.put(&url).json(update), &update.gateway_sn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> IComfortClient {
        IComfortConfig::new("user@example.com", "pass")
            .into_client()
            .unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = IComfortConfig::new("user", "pass");
        assert_eq!(config.base_url(), IComfortConfig::DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_debug_hides_password() {
        let config = IComfortConfig::new("user", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn config_rejects_non_http_base_url() {
        let result = IComfortConfig::new("user", "pass")
            .with_base_url("ftp://example.com")
            .into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn build_url_encodes_query() {
        let url = client().build_url("GetSystemsInfo", &[("UserId", "user@example.com")]);
        assert_eq!(
            url,
            "https://services.myicomfort.com/DBAcessService.svc/GetSystemsInfo?UserId=user%40example.com"
        );
    }

    #[test]
    fn build_url_multiple_params() {
        let url = client().build_url("GetGatewayInfo", &[("GatewaySN", "WS 1"), ("TempUnit", "0")]);
        assert!(url.ends_with("/GetGatewayInfo?GatewaySN=WS%201&TempUnit=0"));
    }

    #[test]
    fn build_url_without_query() {
        let url = client().build_url("SetTStatInfo", &[]);
        assert!(url.ends_with("/DBAcessService.svc/SetTStatInfo"));
    }
}
