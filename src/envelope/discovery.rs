// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint descriptors for discovery responses.

use serde::Serialize;

use crate::response::SystemInfo;

use super::{TEMPERATURE_SENSOR, THERMOSTAT_CONTROLLER};

const MANUFACTURER: &str = "Lennox";
const DESCRIPTION: &str = "Lennox iComfort Thermostat";
const DISPLAY_CATEGORY: &str = "THERMOSTAT";
const INTERFACE_VERSION: &str = "3";

/// One thermostat as announced to the assistant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredEndpoint {
    /// Gateway serial number.
    pub endpoint_id: String,
    /// Name shown to the user.
    pub friendly_name: String,
    /// Fixed product description.
    pub description: String,
    /// Fixed manufacturer name.
    pub manufacturer_name: String,
    /// Device categories; always `THERMOSTAT`.
    pub display_categories: Vec<String>,
    /// Opaque data echoed back on every directive; unused.
    pub cookie: serde_json::Map<String, serde_json::Value>,
    /// Interfaces the endpoint supports.
    pub capabilities: Vec<Capability>,
}

impl From<&SystemInfo> for DiscoveredEndpoint {
    fn from(system: &SystemInfo) -> Self {
        Self {
            endpoint_id: system.gateway_sn.clone(),
            friendly_name: system.friendly_name().to_string(),
            description: DESCRIPTION.to_string(),
            manufacturer_name: MANUFACTURER.to_string(),
            display_categories: vec![DISPLAY_CATEGORY.to_string()],
            cookie: serde_json::Map::new(),
            capabilities: Capability::thermostat_set(),
        }
    }
}

/// A capability interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capability {
    /// Always `AlexaInterface`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Interface name, e.g. `Alexa.ThermostatController`.
    pub interface: String,
    /// Interface version.
    pub version: String,
    /// Properties the interface exposes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
}

/// Property declaration of a capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    /// Supported property names.
    pub supported: Vec<SupportedProperty>,
    /// Whether changes are pushed to the assistant.
    pub proactively_reported: bool,
    /// Whether `ReportState` can query the property.
    pub retrievable: bool,
}

/// A single supported property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedProperty {
    /// Property name, e.g. `targetSetpoint`.
    pub name: String,
}

impl Capability {
    fn interface(interface: &str, supported: &[&str]) -> Self {
        let properties = (!supported.is_empty()).then(|| CapabilityProperties {
            supported: supported
                .iter()
                .map(|name| SupportedProperty {
                    name: (*name).to_string(),
                })
                .collect(),
            proactively_reported: false,
            retrievable: true,
        });
        Self {
            kind: "AlexaInterface".to_string(),
            interface: interface.to_string(),
            version: INTERFACE_VERSION.to_string(),
            properties,
        }
    }

    /// Returns the fixed interface set every iComfort thermostat declares:
    /// the base interface, the thermostat controller and the temperature sensor.
    #[must_use]
    pub fn thermostat_set() -> Vec<Self> {
        vec![
            Self::interface("Alexa", &[]),
            Self::interface(
                THERMOSTAT_CONTROLLER,
                &[
                    "lowerSetpoint",
                    "targetSetpoint",
                    "upperSetpoint",
                    "thermostatMode",
                ],
            ),
            Self::interface(TEMPERATURE_SENSOR, &["temperature"]),
        ]
    }
}
