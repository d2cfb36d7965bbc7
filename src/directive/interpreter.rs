// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalization of change payloads into [`TemperatureRequest`]s.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::setpoint::{Direction, TemperatureRequest};
use crate::types::{Scale, Temperature};

/// The setpoint fields a change directive may carry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetpointPayload {
    /// Single target temperature.
    #[serde(default)]
    pub target_setpoint: Option<Temperature>,
    /// Lower bound of a range.
    #[serde(default)]
    pub lower_setpoint: Option<Temperature>,
    /// Upper bound of a range.
    #[serde(default)]
    pub upper_setpoint: Option<Temperature>,
    /// Signed relative change.
    #[serde(default, alias = "deltaTemperature")]
    pub target_setpoint_delta: Option<Temperature>,
}

/// Turns a change payload into a request with Fahrenheit setpoints.
///
/// A lower and upper setpoint together make a range (an accompanying target
/// becomes its display value), a lone target an absolute request, and a delta
/// a relative one. The returned request remembers the first non-Fahrenheit
/// scale it saw so the confirmation can answer in the requester's scale.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDirective`] when none of the fields are
/// present, or a value error for non-finite temperatures and setpoints
/// outside the supported range.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::directive::{SetpointPayload, interpret};
/// use icomfort_bridge::setpoint::TemperatureRequest;
/// use icomfort_bridge::types::{Scale, Temperature};
///
/// let payload = SetpointPayload {
///     lower_setpoint: Some(Temperature::celsius(20.0)),
///     upper_setpoint: Some(Temperature::celsius(24.0)),
///     ..SetpointPayload::default()
/// };
/// assert_eq!(
///     interpret(&payload).unwrap(),
///     TemperatureRequest::Range { lower: 68.0, upper: 75.0, target: None, scale: Scale::Celsius },
/// );
/// ```
pub fn interpret(payload: &SetpointPayload) -> Result<TemperatureRequest> {
    let scale = original_scale(payload);

    let request = match (
        payload.lower_setpoint,
        payload.upper_setpoint,
        payload.target_setpoint,
        payload.target_setpoint_delta,
    ) {
        (Some(lower), Some(upper), target, _) => TemperatureRequest::Range {
            lower: lower.to_checked_fahrenheit()?,
            upper: upper.to_checked_fahrenheit()?,
            target: target.map(Temperature::to_checked_fahrenheit).transpose()?,
            scale,
        },
        (_, _, Some(target), _) => TemperatureRequest::Absolute {
            target: target.to_checked_fahrenheit()?,
            scale,
        },
        (_, _, _, Some(delta)) => {
            let delta = delta.validate()?;
            TemperatureRequest::Delta {
                amount: delta.value.abs(),
                scale: delta.scale,
                direction: Direction::from_signed(delta.value),
            }
        }
        _ => {
            return Err(Error::UnsupportedDirective(
                "payload carries no target, range, or delta setpoint".to_string(),
            ));
        }
    };

    tracing::debug!(?request, "Interpreted setpoint payload");
    Ok(request)
}

/// Returns the scale to echo back: the first non-Fahrenheit field, if any.
fn original_scale(payload: &SetpointPayload) -> Scale {
    [
        payload.target_setpoint,
        payload.lower_setpoint,
        payload.upper_setpoint,
        payload.target_setpoint_delta,
    ]
    .into_iter()
    .flatten()
    .map(|t| t.scale)
    .find(|scale| *scale != Scale::Fahrenheit)
    .unwrap_or(Scale::Fahrenheit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;

    #[test]
    fn absolute_fahrenheit_is_untouched() {
        let payload = SetpointPayload {
            target_setpoint: Some(Temperature::fahrenheit(71.0)),
            ..SetpointPayload::default()
        };
        assert_eq!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Absolute {
                target: 71.0,
                scale: Scale::Fahrenheit,
            }
        );
    }

    #[test]
    fn absolute_celsius_is_converted() {
        let payload = SetpointPayload {
            target_setpoint: Some(Temperature::celsius(22.5)),
            ..SetpointPayload::default()
        };
        assert_eq!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Absolute {
                target: 72.5,
                scale: Scale::Celsius,
            }
        );
    }

    #[test]
    fn range_wins_over_target() {
        let payload = SetpointPayload {
            target_setpoint: Some(Temperature::fahrenheit(70.0)),
            lower_setpoint: Some(Temperature::fahrenheit(68.0)),
            upper_setpoint: Some(Temperature::fahrenheit(73.0)),
            target_setpoint_delta: None,
        };
        assert_eq!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Range {
                lower: 68.0,
                upper: 73.0,
                target: Some(70.0),
                scale: Scale::Fahrenheit,
            }
        );
    }

    #[test]
    fn lone_bound_falls_through_to_target() {
        let payload = SetpointPayload {
            target_setpoint: Some(Temperature::fahrenheit(70.0)),
            lower_setpoint: Some(Temperature::fahrenheit(68.0)),
            ..SetpointPayload::default()
        };
        assert!(matches!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Absolute { target, .. } if target == 70.0
        ));
    }

    #[test]
    fn mixed_scales_normalize_each_field() {
        let payload = SetpointPayload {
            lower_setpoint: Some(Temperature::fahrenheit(66.0)),
            upper_setpoint: Some(Temperature::celsius(24.0)),
            ..SetpointPayload::default()
        };
        assert_eq!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Range {
                lower: 66.0,
                upper: 75.0,
                target: None,
                scale: Scale::Celsius,
            }
        );
    }

    #[test]
    fn implausible_setpoints_are_value_errors() {
        let huge_target = SetpointPayload {
            target_setpoint: Some(Temperature::fahrenheit(1e20)),
            ..SetpointPayload::default()
        };
        assert!(matches!(
            interpret(&huge_target),
            Err(Error::Value(ValueError::OutOfRange(v))) if v == 1e20
        ));

        let huge_range = SetpointPayload {
            lower_setpoint: Some(Temperature::fahrenheit(-1e20)),
            upper_setpoint: Some(Temperature::fahrenheit(1e20)),
            ..SetpointPayload::default()
        };
        assert!(matches!(
            interpret(&huge_range),
            Err(Error::Value(ValueError::OutOfRange(_)))
        ));

        let overflowing_celsius = SetpointPayload {
            target_setpoint: Some(Temperature::celsius(1e308)),
            ..SetpointPayload::default()
        };
        let err = interpret(&overflowing_celsius).unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::OutOfRange(v)) if v.is_infinite()));
        assert_eq!(err.error_type(), "INVALID_DIRECTIVE");
    }

    #[test]
    fn delta_keeps_its_scale() {
        let payload = SetpointPayload {
            target_setpoint_delta: Some(Temperature::fahrenheit(3.0)),
            ..SetpointPayload::default()
        };
        assert_eq!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Delta {
                amount: 3.0,
                scale: Scale::Fahrenheit,
                direction: Direction::Increase,
            }
        );
    }

    #[test]
    fn legacy_delta_field_name_is_accepted() {
        let payload: SetpointPayload = serde_json::from_value(serde_json::json!({
            "deltaTemperature": { "value": -1.5, "scale": "CELSIUS" }
        }))
        .unwrap();
        assert_eq!(
            interpret(&payload).unwrap(),
            TemperatureRequest::Delta {
                amount: 1.5,
                scale: Scale::Celsius,
                direction: Direction::Decrease,
            }
        );
    }

    #[test]
    fn empty_payload_is_unsupported() {
        let err = interpret(&SetpointPayload::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDirective(_)));
    }

    #[test]
    fn nan_is_rejected() {
        let payload = SetpointPayload {
            target_setpoint: Some(Temperature::fahrenheit(f64::NAN)),
            ..SetpointPayload::default()
        };
        assert!(matches!(interpret(&payload), Err(Error::Value(_))));
    }
}
