// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `GetTStatInfoList` and `GetGatewayInfo` response parsing.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{Scale, SystemStatus, ThermostatMode, VendorDateTime};

use super::VendorNumber;
use super::systems::null_as_empty;

/// Response carrying the thermostats behind one gateway.
///
/// Temperatures are requested with `TempUnit=0`, so every value is Fahrenheit
/// whatever the display preference.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::response::ThermostatInfoResponse;
/// use icomfort_bridge::types::{Scale, SystemStatus};
///
/// let json = r#"{"ReturnStatus": "SUCCESS", "tStatInfo": [{
///     "GatewaySN": "WS1", "System_Status": 1, "Indoor_Temp": 66,
///     "Heat_Set_Point": 68, "Cool_Set_Point": 75, "Pref_Temp_Units": "1",
///     "DateTime_Mark": "/Date(1514764800000)/", "Operation_Mode": 3
/// }]}"#;
/// let response: ThermostatInfoResponse = serde_json::from_str(json).unwrap();
/// let info = response.first().unwrap();
/// assert_eq!(info.system_status().unwrap(), SystemStatus::Heating);
/// assert_eq!(info.preferred_scale(), Scale::Celsius);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThermostatInfoResponse {
    /// Vendor status string, `"SUCCESS"` on success.
    #[serde(rename = "ReturnStatus", default)]
    pub return_status: Option<String>,

    /// Thermostats behind the gateway; the first is the one controlled.
    #[serde(rename = "tStatInfo", default, deserialize_with = "null_as_empty")]
    pub thermostats: Vec<ThermostatInfo>,
}

impl ThermostatInfoResponse {
    /// Returns the primary thermostat, if any.
    #[must_use]
    pub fn first(&self) -> Option<&ThermostatInfo> {
        self.thermostats.first()
    }
}

/// Current readings and settings of one thermostat.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThermostatInfo {
    /// Gateway serial number.
    #[serde(rename = "GatewaySN", default)]
    pub gateway_sn: Option<String>,

    /// Equipment status code (0 idle, 1 heating, 2 cooling, 3 waiting).
    #[serde(rename = "System_Status")]
    pub system_status: VendorNumber,

    /// Indoor temperature, Fahrenheit.
    #[serde(rename = "Indoor_Temp")]
    pub indoor_temp: VendorNumber,

    /// Heat-to setpoint, Fahrenheit.
    #[serde(rename = "Heat_Set_Point")]
    pub heat_set_point: VendorNumber,

    /// Cool-to setpoint, Fahrenheit.
    #[serde(rename = "Cool_Set_Point")]
    pub cool_set_point: VendorNumber,

    /// Display preference, `"0"` Fahrenheit or `"1"` Celsius.
    #[serde(rename = "Pref_Temp_Units", default)]
    pub pref_temp_units: Option<VendorNumber>,

    /// Sample time as `/Date(<ms>)/`.
    #[serde(rename = "DateTime_Mark", default)]
    pub date_time_mark: Option<String>,

    /// Configured mode code (0 off, 1 heat, 2 cool, 3 heat/cool).
    #[serde(rename = "Operation_Mode", default)]
    pub operation_mode: Option<VendorNumber>,
}

impl ThermostatInfo {
    /// Returns the equipment status.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` for unknown codes.
    pub fn system_status(&self) -> Result<SystemStatus, ParseError> {
        let code = self.system_status.as_i64("System_Status")?;
        SystemStatus::from_code(code).map_err(|e| ParseError::InvalidValue {
            field: "System_Status".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the configured mode, if reported.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` for unknown codes.
    pub fn operation_mode(&self) -> Result<Option<ThermostatMode>, ParseError> {
        self.operation_mode
            .as_ref()
            .map(|value| {
                let code = value.as_i64("Operation_Mode")?;
                ThermostatMode::from_code(code).map_err(|e| ParseError::InvalidValue {
                    field: "Operation_Mode".to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Returns the display scale; anything but `1` means Fahrenheit.
    #[must_use]
    pub fn preferred_scale(&self) -> Scale {
        match self
            .pref_temp_units
            .as_ref()
            .and_then(|units| units.as_i64("Pref_Temp_Units").ok())
        {
            Some(1) => Scale::Celsius,
            _ => Scale::Fahrenheit,
        }
    }

    /// Returns the sample time, if present and well formed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` when the mark is malformed.
    pub fn sampled_at(&self) -> Result<Option<VendorDateTime>, ParseError> {
        self.date_time_mark
            .as_deref()
            .map(|mark| {
                mark.parse::<VendorDateTime>()
                    .map_err(|e| ParseError::InvalidValue {
                        field: "DateTime_Mark".to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()
    }
}

/// Response describing the gateway, including the heat/cool dead band.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::response::GatewayInfoResponse;
///
/// let json = r#"{"ReturnStatus": "SUCCESS", "Heat_Cool_Dead_Band": 3}"#;
/// let response: GatewayInfoResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.dead_band().unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayInfoResponse {
    /// Vendor status string, `"SUCCESS"` on success.
    #[serde(rename = "ReturnStatus", default)]
    pub return_status: Option<String>,

    /// Minimum heat/cool separation, Fahrenheit degrees.
    #[serde(rename = "Heat_Cool_Dead_Band", default)]
    pub heat_cool_dead_band: Option<VendorNumber>,
}

impl GatewayInfoResponse {
    /// Returns the dead band.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if the gateway did not report one.
    pub fn dead_band(&self) -> Result<f64, ParseError> {
        self.heat_cool_dead_band
            .as_ref()
            .ok_or_else(|| ParseError::MissingField("Heat_Cool_Dead_Band".to_string()))?
            .as_f64("Heat_Cool_Dead_Band")
    }
}

/// Body of a `SetTStatInfo` write. All temperatures are Fahrenheit.
///
/// Only these four fields are sent; the rest of the `tStatInfo` record is
/// not echoed back and keeps its value on the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetpointUpdate {
    /// Gateway serial number.
    #[serde(rename = "GatewaySN")]
    pub gateway_sn: String,
    /// New heat-to setpoint.
    #[serde(rename = "Heat_Set_Point")]
    pub heat_set_point: f64,
    /// New cool-to setpoint.
    #[serde(rename = "Cool_Set_Point")]
    pub cool_set_point: f64,
    /// Display target shown for the change.
    #[serde(rename = "Indoor_Temp")]
    pub indoor_temp: f64,
}

/// Acknowledgement of a `SetTStatInfo` write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetpointAck {
    /// Vendor status string, `"SUCCESS"` on success.
    #[serde(rename = "ReturnStatus", default)]
    pub return_status: Option<String>,
}

impl SetpointAck {
    /// Returns `true` unless the vendor reported a non-success status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.return_status
            .as_deref()
            .is_none_or(|status| status.eq_ignore_ascii_case("SUCCESS"))
    }
}
