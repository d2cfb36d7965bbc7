// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setpoint requests and their reconciliation against device state.
//!
//! iComfort thermostats take a heat-to and a cool-to setpoint that must be
//! at least the gateway's dead band apart. A voice request names one target,
//! a range, or a relative change; [`reconcile`] turns that into a valid pair
//! and the mode the occupant most likely wants.
//!
//! # Examples
//!
//! ```
//! use icomfort_bridge::setpoint::{TemperatureRequest, reconcile};
//! use icomfort_bridge::state::DeviceState;
//! use icomfort_bridge::types::{Scale, ThermostatMode};
//!
//! let state = DeviceState::new(65.0, 63.0, 75.0, 4.0);
//! let request = TemperatureRequest::Absolute { target: 65.0, scale: Scale::Fahrenheit };
//!
//! let result = reconcile(&state, &request).unwrap();
//! assert_eq!(result.heat_setpoint(), 65.0);
//! assert_eq!(result.cool_setpoint(), 69.0);
//! assert_eq!(result.mode(), ThermostatMode::Heat);
//! ```

mod reconciler;

pub use reconciler::reconcile;

use crate::types::{Scale, Temperature, ThermostatMode};

/// Direction of a relative temperature change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Warmer.
    Increase,
    /// Cooler.
    Decrease,
}

impl Direction {
    /// Picks the direction from the sign of a signed delta.
    #[must_use]
    pub fn from_signed(delta: f64) -> Self {
        if delta < 0.0 {
            Self::Decrease
        } else {
            Self::Increase
        }
    }

    /// Applies `amount` to `value` in this direction.
    #[must_use]
    pub fn apply(self, value: f64, amount: f64) -> f64 {
        match self {
            Self::Increase => value + amount,
            Self::Decrease => value - amount,
        }
    }
}

/// A requested setpoint change.
///
/// `Absolute` and `Range` values are Fahrenheit; `scale` records the scale
/// the requester spoke in so the confirmation can echo it. A `Delta` amount
/// stays in its own scale because a temperature difference cannot be shifted
/// by the 32° offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureRequest {
    /// Hold one target temperature.
    Absolute {
        /// Target in Fahrenheit.
        target: f64,
        /// Scale of the original request.
        scale: Scale,
    },
    /// Keep the temperature between two bounds.
    Range {
        /// Lower bound in Fahrenheit.
        lower: f64,
        /// Upper bound in Fahrenheit.
        upper: f64,
        /// Explicit display target in Fahrenheit, when the requester gave one.
        target: Option<f64>,
        /// Scale of the original request.
        scale: Scale,
    },
    /// Move the target relative to the current indoor temperature.
    Delta {
        /// Unsigned magnitude, expressed in `scale`.
        amount: f64,
        /// Scale of `amount` and of the original request.
        scale: Scale,
        /// Whether to warm up or cool down.
        direction: Direction,
    },
}

impl TemperatureRequest {
    /// Returns the scale the requester used.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        match self {
            Self::Absolute { scale, .. }
            | Self::Range { scale, .. }
            | Self::Delta { scale, .. } => *scale,
        }
    }
}

/// The setpoints to write and the mode to report for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciliationResult {
    heat_setpoint: f64,
    cool_setpoint: f64,
    mode: ThermostatMode,
    target: f64,
    scale: Scale,
}

impl ReconciliationResult {
    /// Returns the new heat-to setpoint in Fahrenheit.
    #[must_use]
    pub const fn heat_setpoint(&self) -> f64 {
        self.heat_setpoint
    }

    /// Returns the new cool-to setpoint in Fahrenheit.
    #[must_use]
    pub const fn cool_setpoint(&self) -> f64 {
        self.cool_setpoint
    }

    /// Returns the mode implied by the request.
    #[must_use]
    pub const fn mode(&self) -> ThermostatMode {
        self.mode
    }

    /// Returns the single display target in Fahrenheit.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Returns the scale of the original request.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Returns the display target in the scale of the original request.
    #[must_use]
    pub fn target_indoor_temperature(&self) -> Temperature {
        self.in_request_scale(self.target)
    }

    /// Returns the new heat-to setpoint in the scale of the original request.
    #[must_use]
    pub fn lower_setpoint(&self) -> Temperature {
        self.in_request_scale(self.heat_setpoint)
    }

    /// Returns the new cool-to setpoint in the scale of the original request.
    #[must_use]
    pub fn upper_setpoint(&self) -> Temperature {
        self.in_request_scale(self.cool_setpoint)
    }

    fn in_request_scale(&self, fahrenheit: f64) -> Temperature {
        Temperature::fahrenheit(fahrenheit).to_scale(self.scale)
    }
}
