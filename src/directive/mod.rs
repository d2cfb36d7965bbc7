// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound assistant directives.
//!
//! Directives arrive as JSON of the form:
//!
//! ```json
//! {
//!   "directive": {
//!     "header": {
//!       "namespace": "Alexa.ThermostatController",
//!       "name": "SetTargetTemperature",
//!       "payloadVersion": "3",
//!       "messageId": "1bd5d003-31b9-476f-ad03-71d471922820",
//!       "correlationToken": "dFMb0z+PgpgdDmluhJ1LddFvSqZ/jCc8ptlAKulUj90jSqg=="
//!     },
//!     "endpoint": { "endpointId": "WS12345678" },
//!     "payload": { "targetSetpoint": { "value": 21.5, "scale": "CELSIUS" } }
//!   }
//! }
//! ```
//!
//! [`Directive::kind`] classifies the request and
//! [`Directive::temperature_request`] runs the [`interpret`] step on change
//! payloads. The older three-verb payload shape is handled separately in
//! [`legacy`].
//!
//! # Examples
//!
//! ```
//! use icomfort_bridge::directive::{DirectiveEnvelope, DirectiveKind};
//! use icomfort_bridge::setpoint::TemperatureRequest;
//! use icomfort_bridge::types::Scale;
//!
//! let json = r#"{"directive": {
//!     "header": {"namespace": "Alexa.ThermostatController", "name": "SetTargetTemperature",
//!                "payloadVersion": "3", "messageId": "abc"},
//!     "endpoint": {"endpointId": "WS1"},
//!     "payload": {"targetSetpoint": {"value": 20.0, "scale": "CELSIUS"}}
//! }}"#;
//!
//! let envelope: DirectiveEnvelope = serde_json::from_str(json).unwrap();
//! let directive = envelope.directive;
//! assert_eq!(directive.kind().unwrap(), DirectiveKind::SetTargetTemperature);
//! assert_eq!(
//!     directive.temperature_request().unwrap(),
//!     TemperatureRequest::Absolute { target: 68.0, scale: Scale::Celsius },
//! );
//! ```

mod interpreter;
pub mod legacy;

pub use interpreter::{SetpointPayload, interpret};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ParseError, Result};
use crate::setpoint::TemperatureRequest;

/// Outer wrapper of an inbound directive.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectiveEnvelope {
    /// The directive itself.
    pub directive: Directive,
}

/// A single assistant directive.
#[derive(Debug, Clone, Deserialize)]
pub struct Directive {
    /// Routing and correlation data.
    pub header: DirectiveHeader,
    /// Target endpoint; absent for discovery.
    #[serde(default)]
    pub endpoint: Option<DirectiveEndpoint>,
    /// Directive-specific payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Header of an inbound directive.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveHeader {
    /// Interface namespace, e.g. `Alexa.ThermostatController`.
    pub namespace: String,
    /// Directive name, e.g. `SetTargetTemperature`.
    pub name: String,
    /// Payload version, `"3"` for this shape.
    #[serde(default)]
    pub payload_version: String,
    /// Unique id of this message.
    #[serde(default)]
    pub message_id: String,
    /// Token to echo in the response, when the directive expects one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

/// Endpoint addressed by a directive.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveEndpoint {
    /// Endpoint id; the vendor gateway serial number.
    pub endpoint_id: String,
    /// Authorization scope, passed through untouched.
    #[serde(default)]
    pub scope: Option<serde_json::Value>,
}

/// The directives this bridge answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// List the thermostats on the account.
    Discover,
    /// Report the current state of one thermostat.
    ReportState,
    /// Set an absolute target or a target range.
    SetTargetTemperature,
    /// Move the target relative to the current temperature.
    AdjustTargetTemperature,
}

impl DirectiveKind {
    /// Returns the directive name on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Discover => "Discover",
            Self::ReportState => "ReportState",
            Self::SetTargetTemperature => "SetTargetTemperature",
            Self::AdjustTargetTemperature => "AdjustTargetTemperature",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectiveKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Discover" => Ok(Self::Discover),
            "ReportState" => Ok(Self::ReportState),
            "SetTargetTemperature" => Ok(Self::SetTargetTemperature),
            "AdjustTargetTemperature" => Ok(Self::AdjustTargetTemperature),
            other => Err(Error::UnsupportedDirective(other.to_string())),
        }
    }
}

impl Directive {
    /// Classifies the directive by its header name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDirective`] for any other name.
    pub fn kind(&self) -> Result<DirectiveKind> {
        self.header.name.parse()
    }

    /// Returns the addressed endpoint id.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` when the directive has no endpoint.
    pub fn endpoint_id(&self) -> Result<&str> {
        self.endpoint
            .as_ref()
            .map(|e| e.endpoint_id.as_str())
            .ok_or_else(|| ParseError::MissingField("endpoint.endpointId".to_string()).into())
    }

    /// Decodes the payload of a change directive into a request.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the payload is not a setpoint payload, or
    /// [`Error::UnsupportedDirective`] if it carries none of the known fields.
    pub fn temperature_request(&self) -> Result<TemperatureRequest> {
        let payload = SetpointPayload::deserialize(&self.payload).map_err(ParseError::Json)?;
        interpret(&payload)
    }
}
