// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heat/cool setpoint reconciliation.

use crate::error::{Error, Result, ValueError};
use crate::state::DeviceState;
use crate::types::{
    MAX_FAHRENHEIT, MIN_FAHRENHEIT, Scale, ThermostatMode, check_fahrenheit, round_half,
};

use super::{ReconciliationResult, TemperatureRequest};

/// Slack for float noise when checking the dead band after arithmetic.
const BAND_TOLERANCE: f64 = 1e-9;

/// Computes the setpoints and mode to apply for `request` on a device in `state`.
///
/// The mode is inferred from [`DeviceState::colder_outside`]: when the room is
/// closer to the heat setpoint (or the system is heating), the request is
/// anchored on the heat side and the cool setpoint is pushed up by the dead
/// band; otherwise it is anchored on the cool side.
///
/// Ranges narrower than the dead band are widened toward the side the
/// occupant is on instead of being rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidBand`] when the device reports a dead band that is
/// not positive or wider than the whole supported range, and a value error when a device temperature
/// is not finite or a requested or resolved setpoint lies outside
/// [`MIN_FAHRENHEIT`](crate::types::MIN_FAHRENHEIT)`..=`[`MAX_FAHRENHEIT`](crate::types::MAX_FAHRENHEIT).
///
/// # Panics
///
/// Panics if the computed setpoints violate the dead band.
pub fn reconcile(
    state: &DeviceState,
    request: &TemperatureRequest,
) -> Result<ReconciliationResult> {
    let band = state.minimum_band();
    if !band.is_finite() || band <= 0.0 || band > MAX_FAHRENHEIT - MIN_FAHRENHEIT {
        return Err(Error::InvalidBand(band));
    }

    for value in [
        state.current_temperature(),
        state.heat_setpoint(),
        state.cool_setpoint(),
    ] {
        if !value.is_finite() {
            return Err(ValueError::NonFiniteTemperature(value).into());
        }
    }

    let colder_outside = state.colder_outside();

    let result = match *request {
        TemperatureRequest::Range {
            lower,
            upper,
            target,
            scale,
        } => {
            check_fahrenheit(lower)?;
            check_fahrenheit(upper)?;
            let target = match target {
                Some(target) => check_fahrenheit(target)?,
                None if colder_outside => lower,
                None => upper,
            };
            let (heat, cool, mode) = if upper - lower >= band {
                let mode = if colder_outside {
                    ThermostatMode::Heat
                } else {
                    ThermostatMode::Cool
                };
                (lower, upper, mode)
            } else if state.current_temperature() <= lower || colder_outside {
                (lower, lower + band, ThermostatMode::Heat)
            } else {
                (upper - band, upper, ThermostatMode::Cool)
            };
            ReconciliationResult {
                heat_setpoint: heat,
                cool_setpoint: cool,
                mode,
                target,
                scale,
            }
        }
        TemperatureRequest::Absolute { target, scale } => {
            anchor(check_fahrenheit(target)?, band, colder_outside, scale)
        }
        TemperatureRequest::Delta {
            amount,
            scale,
            direction,
        } => {
            let current = scale.from_fahrenheit(state.current_temperature());
            let target =
                check_fahrenheit(round_half(scale.to_fahrenheit(direction.apply(current, amount))))?;
            anchor(target, band, colder_outside, scale)
        }
    };

    assert!(
        result.cool_setpoint >= result.heat_setpoint
            && result.cool_setpoint - result.heat_setpoint + BAND_TOLERANCE >= band,
        "reconciled setpoints {}/{} violate dead band {band}",
        result.heat_setpoint,
        result.cool_setpoint,
    );

    tracing::debug!(
        heat = result.heat_setpoint,
        cool = result.cool_setpoint,
        mode = %result.mode,
        target = result.target,
        "Reconciled setpoints"
    );

    Ok(result)
}

/// Places a single target on the heat or cool side of the dead band.
fn anchor(
    target: f64,
    band: f64,
    colder_outside: bool,
    scale: Scale,
) -> ReconciliationResult {
    let (heat, cool, mode) = if colder_outside {
        (target, target + band, ThermostatMode::Heat)
    } else {
        (target - band, target, ThermostatMode::Cool)
    };
    ReconciliationResult {
        heat_setpoint: heat,
        cool_setpoint: cool,
        mode,
        target,
        scale,
    }
}
