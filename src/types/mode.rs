// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat activity and mode types.

use std::fmt;

use serde::Serialize;

use crate::error::ValueError;

/// What the HVAC equipment is doing right now, as reported by the vendor.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::types::SystemStatus;
///
/// assert_eq!(SystemStatus::from_code(1).unwrap(), SystemStatus::Heating);
/// assert!(SystemStatus::from_code(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SystemStatus {
    /// Equipment is off.
    #[default]
    Idle,
    /// Heating is running.
    Heating,
    /// Cooling is running.
    Cooling,
    /// Waiting out a compressor or furnace delay.
    Waiting,
}

impl SystemStatus {
    /// Parses the vendor `System_Status` code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidSystemStatus` for codes outside 0-3.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Heating),
            2 => Ok(Self::Cooling),
            3 => Ok(Self::Waiting),
            other => Err(ValueError::InvalidSystemStatus(other)),
        }
    }

    /// Returns the vendor code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Heating => 1,
            Self::Cooling => 2,
            Self::Waiting => 3,
        }
    }
}

/// Thermostat operating mode as exchanged with the assistant.
///
/// The reconciler only ever produces [`Heat`](Self::Heat) or
/// [`Cool`](Self::Cool); the other modes appear when reporting what the
/// device itself is set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThermostatMode {
    /// Heating only.
    Heat,
    /// Cooling only.
    Cool,
    /// Heat or cool as needed.
    Auto,
    /// System off.
    Off,
}

impl ThermostatMode {
    /// Parses the vendor `Operation_Mode` code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidOperationMode` for codes outside 0-3.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Auto),
            other => Err(ValueError::InvalidOperationMode(other)),
        }
    }

    /// Returns the assistant wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
            Self::Auto => "AUTO",
            Self::Off => "OFF",
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
