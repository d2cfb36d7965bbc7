// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the iComfort web service.
//!
//! [`VendorApi`] is the seam between the bridge and the vendor: the
//! [`DeviceGateway`](crate::gateway::DeviceGateway) only talks to this trait,
//! and [`IComfortClient`] implements it over HTTPS.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{IComfortClient, IComfortConfig};

use crate::error::Result;
use crate::response::{
    GatewayInfoResponse, SetpointAck, SetpointUpdate, SystemsInfoResponse, ThermostatInfoResponse,
};

/// The iComfort calls the bridge needs.
///
/// Implementations map transport failures to
/// [`Error::DeviceUnreachable`](crate::Error::DeviceUnreachable) and unknown
/// serials to [`Error::DeviceNotFound`](crate::Error::DeviceNotFound).
/// Nothing is retried.
#[allow(async_fn_in_trait)]
pub trait VendorApi {
    /// Lists the systems registered to an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    async fn systems_info(&self, user_id: &str) -> Result<SystemsInfoResponse>;

    /// Reads the thermostats behind a gateway, temperatures in Fahrenheit.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    async fn thermostat_info(&self, gateway_sn: &str) -> Result<ThermostatInfoResponse>;

    /// Reads gateway settings, including the heat/cool dead band.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    async fn gateway_info(&self, gateway_sn: &str) -> Result<GatewayInfoResponse>;

    /// Writes new setpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    async fn set_thermostat_info(&self, update: &SetpointUpdate) -> Result<SetpointAck>;
}
