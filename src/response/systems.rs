// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `GetSystemsInfo` response parsing.

use serde::Deserialize;

/// Response listing the systems registered to an account.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::response::SystemsInfoResponse;
///
/// let json = r#"{
///     "ReturnStatus": "SUCCESS",
///     "Systems": [{"Gateway_SN": "WS123", "System_Name": "Upstairs", "Firmware_Ver": "02.18.0029"}]
/// }"#;
/// let response: SystemsInfoResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.systems[0].gateway_sn, "WS123");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemsInfoResponse {
    /// Vendor status string, `"SUCCESS"` on success.
    #[serde(rename = "ReturnStatus", default)]
    pub return_status: Option<String>,

    /// Systems on the account; `null` when there are none.
    #[serde(rename = "Systems", default, deserialize_with = "null_as_empty")]
    pub systems: Vec<SystemInfo>,
}

/// One thermostat system on the account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemInfo {
    /// Gateway serial number; the assistant endpoint id.
    #[serde(rename = "Gateway_SN")]
    pub gateway_sn: String,

    /// User-assigned name, editable in the vendor app.
    #[serde(rename = "System_Name", default)]
    pub system_name: String,

    /// Gateway firmware version.
    #[serde(rename = "Firmware_Ver", default)]
    pub firmware_version: Option<String>,
}

impl SystemInfo {
    /// Returns the display name, falling back to the serial when unnamed.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        if self.system_name.trim().is_empty() {
            &self.gateway_sn
        } else {
            &self.system_name
        }
    }
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
