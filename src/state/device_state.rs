// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat state snapshot.

use chrono::{DateTime, Utc};

use crate::types::{Scale, SystemStatus, Temperature, ThermostatMode};

/// State of one thermostat, read from the vendor for a single directive.
///
/// All temperatures are Fahrenheit, which is what the vendor stores
/// regardless of the display preference in [`preferred_scale`](Self::preferred_scale).
/// A snapshot is built fresh for every directive and never updated in place.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::state::DeviceState;
/// use icomfort_bridge::types::SystemStatus;
///
/// let state = DeviceState::new(70.0, 68.0, 74.0, 3.0).with_status(SystemStatus::Cooling);
/// assert_eq!(state.band(), 6.0);
/// assert!(state.colder_outside());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    system_status: SystemStatus,
    current_temperature: f64,
    heat_setpoint: f64,
    cool_setpoint: f64,
    minimum_band: f64,
    preferred_scale: Scale,
    last_updated: DateTime<Utc>,
    operating_mode: Option<ThermostatMode>,
}

impl DeviceState {
    /// Creates an idle, Fahrenheit-preferring snapshot stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `current_temperature` - Indoor temperature in Fahrenheit
    /// * `heat_setpoint` - Heat-to setpoint in Fahrenheit
    /// * `cool_setpoint` - Cool-to setpoint in Fahrenheit
    /// * `minimum_band` - Smallest allowed `cool - heat` separation
    #[must_use]
    pub fn new(
        current_temperature: f64,
        heat_setpoint: f64,
        cool_setpoint: f64,
        minimum_band: f64,
    ) -> Self {
        Self {
            system_status: SystemStatus::Idle,
            current_temperature,
            heat_setpoint,
            cool_setpoint,
            minimum_band,
            preferred_scale: Scale::Fahrenheit,
            last_updated: Utc::now(),
            operating_mode: None,
        }
    }

    /// Sets the equipment status.
    #[must_use]
    pub fn with_status(mut self, status: SystemStatus) -> Self {
        self.system_status = status;
        self
    }

    /// Sets the display scale preferred on the device.
    #[must_use]
    pub fn with_preferred_scale(mut self, scale: Scale) -> Self {
        self.preferred_scale = scale;
        self
    }

    /// Sets the time the vendor last sampled the device.
    #[must_use]
    pub fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Sets the mode the device is configured for.
    #[must_use]
    pub fn with_operating_mode(mut self, mode: ThermostatMode) -> Self {
        self.operating_mode = Some(mode);
        self
    }

    /// Returns the equipment status.
    #[must_use]
    pub const fn system_status(&self) -> SystemStatus {
        self.system_status
    }

    /// Returns the indoor temperature in Fahrenheit.
    #[must_use]
    pub const fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Returns the heat-to setpoint in Fahrenheit.
    #[must_use]
    pub const fn heat_setpoint(&self) -> f64 {
        self.heat_setpoint
    }

    /// Returns the cool-to setpoint in Fahrenheit.
    #[must_use]
    pub const fn cool_setpoint(&self) -> f64 {
        self.cool_setpoint
    }

    /// Returns the minimum allowed separation between the setpoints.
    #[must_use]
    pub const fn minimum_band(&self) -> f64 {
        self.minimum_band
    }

    /// Returns the scale the device displays.
    #[must_use]
    pub const fn preferred_scale(&self) -> Scale {
        self.preferred_scale
    }

    /// Returns when the vendor last sampled the device.
    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Returns the configured mode, if the vendor reported one.
    #[must_use]
    pub const fn operating_mode(&self) -> Option<ThermostatMode> {
        self.operating_mode
    }

    /// Returns the current `cool - heat` separation.
    #[must_use]
    pub fn band(&self) -> f64 {
        self.cool_setpoint - self.heat_setpoint
    }

    /// Returns `true` when the room sits closer to the heat setpoint than the
    /// cool setpoint, or when the system is actively heating.
    ///
    /// Equal distances count as the cool side unless the system is heating.
    #[must_use]
    pub fn colder_outside(&self) -> bool {
        (self.current_temperature - self.heat_setpoint)
            < (self.cool_setpoint - self.current_temperature)
            || self.system_status == SystemStatus::Heating
    }

    /// Returns the setpoint on the side the occupant is closer to, in Fahrenheit.
    #[must_use]
    pub fn display_target(&self) -> f64 {
        if self.colder_outside() {
            self.heat_setpoint
        } else {
            self.cool_setpoint
        }
    }

    /// Returns the indoor temperature in the device's preferred scale.
    #[must_use]
    pub fn indoor_temperature(&self) -> Temperature {
        Temperature::fahrenheit(self.current_temperature).to_scale(self.preferred_scale)
    }
}
