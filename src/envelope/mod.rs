// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound assistant events.
//!
//! Every answer is an [`EventEnvelope`]:
//!
//! ```json
//! {
//!   "event": {
//!     "header": { "namespace": "Alexa", "name": "Response", "payloadVersion": "3",
//!                 "messageId": "...", "correlationToken": "..." },
//!     "endpoint": { "endpointId": "WS12345678" },
//!     "payload": {}
//!   },
//!   "context": { "properties": [ ... ] }
//! }
//! ```
//!
//! Each event gets a fresh message id; the correlation token of the directive
//! is echoed when it had one.

mod discovery;

pub use discovery::{Capability, CapabilityProperties, DiscoveredEndpoint, SupportedProperty};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::directive::DirectiveHeader;
use crate::error::Error;
use crate::response::SystemInfo;
use crate::setpoint::ReconciliationResult;
use crate::state::DeviceState;
use crate::types::{Temperature, ThermostatMode};

/// Payload version of every event.
pub const PAYLOAD_VERSION: &str = "3";
/// Reported uncertainty of every property sample.
pub const UNCERTAINTY_MS: u32 = 1000;

const ALEXA: &str = "Alexa";
const DISCOVERY: &str = "Alexa.Discovery";
pub(crate) const THERMOSTAT_CONTROLLER: &str = "Alexa.ThermostatController";
pub(crate) const TEMPERATURE_SENSOR: &str = "Alexa.TemperatureSensor";

/// A complete outbound message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventEnvelope {
    /// The event itself.
    pub event: Event,
    /// Current property values, for state reports and change responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

/// Event body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Routing and correlation data.
    pub header: Header,
    /// Endpoint the event is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    /// Event-specific payload.
    pub payload: serde_json::Value,
}

/// Header of an outbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Interface namespace.
    pub namespace: String,
    /// Event name.
    pub name: String,
    /// Always [`PAYLOAD_VERSION`].
    pub payload_version: String,
    /// Fresh id of this message.
    pub message_id: String,
    /// Token from the directive being answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

impl Header {
    fn new(namespace: &str, name: &str, correlation_token: Option<String>) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            payload_version: PAYLOAD_VERSION.to_string(),
            message_id: Uuid::new_v4().to_string(),
            correlation_token,
        }
    }
}

/// Endpoint reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Gateway serial number.
    pub endpoint_id: String,
}

/// Property values attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    /// Reported properties.
    pub properties: Vec<Property>,
}

/// One reported property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Interface the property belongs to.
    pub namespace: String,
    /// Property name.
    pub name: String,
    /// Property value; a temperature object or a mode string.
    pub value: serde_json::Value,
    /// When the value was sampled.
    pub time_of_sample: DateTime<Utc>,
    /// Always [`UNCERTAINTY_MS`].
    pub uncertainty_in_milliseconds: u32,
}

impl Property {
    fn new(
        namespace: &str,
        name: &str,
        value: serde_json::Value,
        time_of_sample: DateTime<Utc>,
    ) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            value,
            time_of_sample,
            uncertainty_in_milliseconds: UNCERTAINTY_MS,
        }
    }

    fn temperature(
        namespace: &str,
        name: &str,
        value: Temperature,
        time_of_sample: DateTime<Utc>,
    ) -> Self {
        Self::new(
            namespace,
            name,
            serde_json::json!({ "value": value.value, "scale": value.scale }),
            time_of_sample,
        )
    }

    fn mode(mode: ThermostatMode, time_of_sample: DateTime<Utc>) -> Self {
        Self::new(
            THERMOSTAT_CONTROLLER,
            "thermostatMode",
            serde_json::Value::String(mode.as_str().to_string()),
            time_of_sample,
        )
    }

    fn setpoints(
        target: Temperature,
        lower: Temperature,
        upper: Temperature,
        mode: ThermostatMode,
        time_of_sample: DateTime<Utc>,
    ) -> Vec<Self> {
        vec![
            Self::temperature(THERMOSTAT_CONTROLLER, "targetSetpoint", target, time_of_sample),
            Self::temperature(THERMOSTAT_CONTROLLER, "lowerSetpoint", lower, time_of_sample),
            Self::temperature(THERMOSTAT_CONTROLLER, "upperSetpoint", upper, time_of_sample),
            Self::mode(mode, time_of_sample),
        ]
    }
}

impl EventEnvelope {
    /// Builds a discovery response with one endpoint per system.
    ///
    /// # Examples
    ///
    /// ```
    /// use icomfort_bridge::envelope::EventEnvelope;
    /// use icomfort_bridge::response::SystemInfo;
    ///
    /// let systems = vec![SystemInfo {
    ///     gateway_sn: "WS1".to_string(),
    ///     system_name: "Upstairs".to_string(),
    ///     firmware_version: None,
    /// }];
    /// let envelope = EventEnvelope::discovery(&systems);
    /// assert_eq!(envelope.event.header.name, "Discover.Response");
    /// assert_eq!(envelope.event.payload["endpoints"][0]["endpointId"], "WS1");
    /// ```
    #[must_use]
    pub fn discovery(systems: &[SystemInfo]) -> Self {
        let endpoints: Vec<DiscoveredEndpoint> =
            systems.iter().map(DiscoveredEndpoint::from).collect();
        Self {
            event: Event {
                header: Header::new(DISCOVERY, "Discover.Response", None),
                endpoint: None,
                payload: serde_json::json!({ "endpoints": endpoints }),
            },
            context: None,
        }
    }

    /// Builds a state report for a thermostat.
    ///
    /// The indoor temperature and setpoints are given in the device's
    /// preferred scale; the mode is the configured one, or the side the room
    /// is closer to when the vendor did not report it.
    #[must_use]
    pub fn state_report(
        directive: &DirectiveHeader,
        endpoint_id: &str,
        state: &DeviceState,
    ) -> Self {
        let scale = state.preferred_scale();
        let sampled = state.last_updated();
        let in_scale = |f: f64| Temperature::fahrenheit(f).to_scale(scale);
        let mode = state.operating_mode().unwrap_or(if state.colder_outside() {
            ThermostatMode::Heat
        } else {
            ThermostatMode::Cool
        });

        let mut properties = vec![Property::temperature(
            TEMPERATURE_SENSOR,
            "temperature",
            state.indoor_temperature(),
            sampled,
        )];
        properties.extend(Property::setpoints(
            in_scale(state.display_target()),
            in_scale(state.heat_setpoint()),
            in_scale(state.cool_setpoint()),
            mode,
            sampled,
        ));

        Self::with_context(directive, ALEXA, "StateReport", endpoint_id, properties)
    }

    /// Builds the confirmation of an applied setpoint change.
    ///
    /// Temperatures are echoed in the scale the user spoke in.
    #[must_use]
    pub fn change_response(
        directive: &DirectiveHeader,
        endpoint_id: &str,
        result: &ReconciliationResult,
        time_of_sample: DateTime<Utc>,
    ) -> Self {
        let properties = Property::setpoints(
            result.target_indoor_temperature(),
            result.lower_setpoint(),
            result.upper_setpoint(),
            result.mode(),
            time_of_sample,
        );
        Self::with_context(directive, ALEXA, "Response", endpoint_id, properties)
    }

    /// Builds an error response for a failed directive.
    ///
    /// # Examples
    ///
    /// ```
    /// use icomfort_bridge::envelope::EventEnvelope;
    /// use icomfort_bridge::Error;
    ///
    /// let envelope = EventEnvelope::error(None, None, &Error::DeviceNotFound("WS1".to_string()));
    /// assert_eq!(envelope.event.header.name, "ErrorResponse");
    /// assert_eq!(envelope.event.payload["type"], "NO_SUCH_ENDPOINT");
    /// ```
    #[must_use]
    pub fn error(
        directive: Option<&DirectiveHeader>,
        endpoint_id: Option<&str>,
        error: &Error,
    ) -> Self {
        let token = directive.and_then(|h| h.correlation_token.clone());
        Self {
            event: Event {
                header: Header::new(ALEXA, "ErrorResponse", token),
                endpoint: endpoint_id.map(|id| Endpoint {
                    endpoint_id: id.to_string(),
                }),
                payload: serde_json::json!({
                    "type": error.error_type(),
                    "message": error.to_string(),
                }),
            },
            context: None,
        }
    }

    fn with_context(
        directive: &DirectiveHeader,
        namespace: &str,
        name: &str,
        endpoint_id: &str,
        properties: Vec<Property>,
    ) -> Self {
        Self {
            event: Event {
                header: Header::new(namespace, name, directive.correlation_token.clone()),
                endpoint: Some(Endpoint {
                    endpoint_id: endpoint_id.to_string(),
                }),
                payload: serde_json::json!({}),
            },
            context: Some(Context { properties }),
        }
    }

    /// Returns the property with the given name, if present.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.context
            .as_ref()
            .and_then(|c| c.properties.iter().find(|p| p.name == name))
    }
}
