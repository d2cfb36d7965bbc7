// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-level view over the vendor API.
//!
//! [`DeviceGateway`] turns vendor calls into the bridge's own model: a list of
//! systems for discovery, a merged [`DeviceState`] snapshot, and a single
//! setpoint write. It holds no state between calls and performs no locking;
//! two directives for the same thermostat may race at the vendor.

use chrono::Utc;

use crate::error::{DeviceError, Error, Result};
use crate::protocol::VendorApi;
use crate::response::{GatewayInfoResponse, SetpointUpdate, SystemInfo, ThermostatInfoResponse};
use crate::state::DeviceState;

/// Adapter between the bridge and one vendor account.
///
/// # Examples
///
/// ```no_run
/// use icomfort_bridge::gateway::DeviceGateway;
/// use icomfort_bridge::protocol::IComfortConfig;
///
/// # async fn example() -> icomfort_bridge::Result<()> {
/// let config = IComfortConfig::new("user@example.com", "secret");
/// let account = config.username().to_string();
/// let gateway = DeviceGateway::new(config.into_client()?, account);
///
/// let state = gateway.fetch_state("WS12345678").await?;
/// println!("indoor: {}", state.indoor_temperature());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceGateway<A: VendorApi> {
    api: A,
    account_id: String,
}

impl<A: VendorApi> DeviceGateway<A> {
    /// Creates a gateway for the given account.
    #[must_use]
    pub fn new(api: A, account_id: impl Into<String>) -> Self {
        Self {
            api,
            account_id: account_id.into(),
        }
    }

    /// Returns the underlying vendor API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the account id used for discovery.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Lists the systems on the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor call fails.
    pub async fn discover(&self) -> Result<Vec<SystemInfo>> {
        let response = self.api.systems_info(&self.account_id).await?;
        tracing::info!(count = response.systems.len(), "Discovered iComfort systems");
        Ok(response.systems)
    }

    /// Reads the current state of a thermostat.
    ///
    /// The thermostat info and gateway info reads are issued together and
    /// both must succeed before the snapshot is built.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the gateway has no thermostat,
    /// or the first error from either read.
    pub async fn fetch_state(&self, device_id: &str) -> Result<DeviceState> {
        let (info, gateway) = tokio::try_join!(
            self.api.thermostat_info(device_id),
            self.api.gateway_info(device_id),
        )?;

        let state = merge_state(device_id, &info, &gateway)?;
        tracing::debug!(device_id, ?state, "Fetched thermostat state");
        Ok(state)
    }

    /// Writes new setpoints, all in Fahrenheit.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::CommandRejected` if the vendor acknowledges with
    /// a failure status, or the transport error otherwise.
    pub async fn write_setpoints(
        &self,
        device_id: &str,
        heat: f64,
        cool: f64,
        indoor_display: f64,
    ) -> Result<()> {
        let update = SetpointUpdate {
            gateway_sn: device_id.to_string(),
            heat_set_point: heat,
            cool_set_point: cool,
            indoor_temp: indoor_display,
        };

        tracing::info!(device_id, heat, cool, indoor_display, "Writing setpoints");

        let ack = self.api.set_thermostat_info(&update).await?;
        if ack.is_success() {
            Ok(())
        } else {
            let status = ack.return_status.unwrap_or_default();
            tracing::warn!(device_id, status = %status, "Setpoint write rejected");
            Err(DeviceError::CommandRejected(status).into())
        }
    }
}

/// Combines the two vendor reads into one snapshot.
fn merge_state(
    device_id: &str,
    info: &ThermostatInfoResponse,
    gateway: &GatewayInfoResponse,
) -> Result<DeviceState> {
    let thermostat = info
        .first()
        .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;

    let mut state = DeviceState::new(
        thermostat.indoor_temp.as_f64("Indoor_Temp")?,
        thermostat.heat_set_point.as_f64("Heat_Set_Point")?,
        thermostat.cool_set_point.as_f64("Cool_Set_Point")?,
        gateway.dead_band()?,
    )
    .with_status(thermostat.system_status()?)
    .with_preferred_scale(thermostat.preferred_scale())
    .with_last_updated(
        thermostat
            .sampled_at()?
            .map_or_else(Utc::now, |mark| mark.utc()),
    );

    if let Some(mode) = thermostat.operation_mode()? {
        state = state.with_operating_mode(mode);
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Scale, SystemStatus, ThermostatMode};

    fn info(json: serde_json::Value) -> ThermostatInfoResponse {
        serde_json::from_value(json).unwrap()
    }

    fn gateway(band: serde_json::Value) -> GatewayInfoResponse {
        serde_json::from_value(serde_json::json!({ "Heat_Cool_Dead_Band": band })).unwrap()
    }

    #[test]
    fn merge_full_record() {
        let info = info(serde_json::json!({ "tStatInfo": [{
            "System_Status": 2,
            "Indoor_Temp": 74,
            "Heat_Set_Point": 66,
            "Cool_Set_Point": 75,
            "Pref_Temp_Units": "1",
            "DateTime_Mark": "/Date(1514764800000)/",
            "Operation_Mode": 3
        }]}));
        let state = merge_state("WS1", &info, &gateway(serde_json::json!("3"))).unwrap();

        assert_eq!(state.system_status(), SystemStatus::Cooling);
        assert_eq!(state.current_temperature(), 74.0);
        assert_eq!(state.heat_setpoint(), 66.0);
        assert_eq!(state.cool_setpoint(), 75.0);
        assert_eq!(state.minimum_band(), 3.0);
        assert_eq!(state.preferred_scale(), Scale::Celsius);
        assert_eq!(state.last_updated().timestamp(), 1_514_764_800);
        assert_eq!(state.operating_mode(), Some(ThermostatMode::Auto));
    }

    #[test]
    fn merge_empty_list_is_not_found() {
        let info = info(serde_json::json!({ "tStatInfo": [] }));
        let err = merge_state("WS9", &info, &gateway(serde_json::json!(3))).unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id == "WS9"));
    }

    #[test]
    fn merge_bad_number_is_parse_error() {
        let info = info(serde_json::json!({ "tStatInfo": [{
            "System_Status": 0,
            "Indoor_Temp": "n/a",
            "Heat_Set_Point": 66,
            "Cool_Set_Point": 75
        }]}));
        let err = merge_state("WS1", &info, &gateway(serde_json::json!(3))).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn merge_non_finite_number_is_parse_error() {
        let info = info(serde_json::json!({ "tStatInfo": [{
            "System_Status": 0,
            "Indoor_Temp": "NaN",
            "Heat_Set_Point": 66,
            "Cool_Set_Point": 75
        }]}));
        let err = merge_state("WS1", &info, &gateway(serde_json::json!(3))).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = merge_state("WS1", &info_ok(), &gateway(serde_json::json!("inf"))).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    fn info_ok() -> ThermostatInfoResponse {
        info(serde_json::json!({ "tStatInfo": [{
            "System_Status": 0,
            "Indoor_Temp": 70,
            "Heat_Set_Point": 68,
            "Cool_Set_Point": 72
        }]}))
    }

    #[test]
    fn merge_keeps_zero_band_for_reconciler() {
        let info = info(serde_json::json!({ "tStatInfo": [{
            "System_Status": 0,
            "Indoor_Temp": 70,
            "Heat_Set_Point": 68,
            "Cool_Set_Point": 72
        }]}));
        let state = merge_state("WS1", &info, &gateway(serde_json::json!(0))).unwrap();
        assert_eq!(state.minimum_band(), 0.0);
    }
}
