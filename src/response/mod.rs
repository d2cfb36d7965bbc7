// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of iComfort web service responses.
//!
//! The service mixes JSON numbers and numeric strings freely, so numeric
//! fields are kept as [`VendorNumber`] and converted through accessors that
//! report the offending field on failure.

mod systems;
mod thermostat;
mod value;

pub use systems::{SystemInfo, SystemsInfoResponse};
pub use thermostat::{
    GatewayInfoResponse, SetpointAck, SetpointUpdate, ThermostatInfo, ThermostatInfoResponse,
};
pub use value::VendorNumber;
