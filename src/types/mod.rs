// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the assistant and vendor sides.
//!
//! # Types
//!
//! - [`Temperature`] / [`Scale`] - a value with its scale, plus half-degree
//!   conversion helpers
//! - [`SystemStatus`] - what the equipment is doing (idle, heating, ...)
//! - [`ThermostatMode`] - the heat/cool/auto/off mode reported to the assistant
//! - [`VendorDateTime`] - vendor `/Date(ms)/` timestamps

mod datetime;
mod mode;
mod temperature;

pub use datetime::{DateTimeParseError, VendorDateTime};
pub use mode::{SystemStatus, ThermostatMode};
pub use temperature::{
    MAX_FAHRENHEIT, MIN_FAHRENHEIT, Scale, Temperature, celsius_to_fahrenheit, check_fahrenheit,
    fahrenheit_to_celsius, round_half,
};
