// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping for the legacy three-verb thermostat directives.
//!
//! Version 2 of the assistant protocol sent one directive per verb, always in
//! Celsius and without a scale field:
//!
//! | Name | Payload |
//! |------|---------|
//! | `SetTargetTemperatureRequest` | `targetTemperature.value` |
//! | `IncrementTargetTemperatureRequest` | `deltaTemperature.value` |
//! | `DecrementTargetTemperatureRequest` | `deltaTemperature.value` |
//!
//! These map onto the same [`TemperatureRequest`] the current shape produces,
//! so the reconciler only ever sees one request model.
//!
//! # Examples
//!
//! ```
//! use icomfort_bridge::directive::legacy::{LegacyPayload, LegacyVerb};
//! use icomfort_bridge::setpoint::{Direction, TemperatureRequest};
//! use icomfort_bridge::types::Scale;
//!
//! let verb: LegacyVerb = "DecrementTargetTemperatureRequest".parse().unwrap();
//! let payload: LegacyPayload =
//!     serde_json::from_str(r#"{"deltaTemperature": {"value": 2.0}}"#).unwrap();
//!
//! assert_eq!(
//!     verb.translate(&payload).unwrap(),
//!     TemperatureRequest::Delta { amount: 2.0, scale: Scale::Celsius, direction: Direction::Decrease },
//! );
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, ParseError, Result};
use crate::setpoint::{Direction, TemperatureRequest};
use crate::types::{Scale, Temperature};

/// A legacy thermostat verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyVerb {
    /// `SetTargetTemperatureRequest`.
    SetTarget,
    /// `IncrementTargetTemperatureRequest`.
    Increment,
    /// `DecrementTargetTemperatureRequest`.
    Decrement,
}

impl FromStr for LegacyVerb {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SetTargetTemperatureRequest" => Ok(Self::SetTarget),
            "IncrementTargetTemperatureRequest" => Ok(Self::Increment),
            "DecrementTargetTemperatureRequest" => Ok(Self::Decrement),
            other => Err(Error::UnsupportedDirective(other.to_string())),
        }
    }
}

/// A bare Celsius value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LegacyValue {
    /// Degrees Celsius.
    pub value: f64,
}

/// Payload of a legacy thermostat directive.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    /// Absolute target for `SetTargetTemperatureRequest`.
    #[serde(default)]
    pub target_temperature: Option<LegacyValue>,
    /// Unsigned change for the increment/decrement verbs.
    #[serde(default)]
    pub delta_temperature: Option<LegacyValue>,
}

impl LegacyVerb {
    /// Translates a legacy payload into the current request model.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` when the field the verb needs is
    /// absent, or a value error for non-finite or implausible values.
    pub fn translate(self, payload: &LegacyPayload) -> Result<TemperatureRequest> {
        match self {
            Self::SetTarget => {
                let value = payload
                    .target_temperature
                    .ok_or_else(|| ParseError::MissingField("targetTemperature".to_string()))?;
                Ok(TemperatureRequest::Absolute {
                    target: Temperature::celsius(value.value).to_checked_fahrenheit()?,
                    scale: Scale::Celsius,
                })
            }
            Self::Increment | Self::Decrement => {
                let value = payload
                    .delta_temperature
                    .ok_or_else(|| ParseError::MissingField("deltaTemperature".to_string()))?;
                let delta = Temperature::celsius(value.value).validate()?;
                Ok(TemperatureRequest::Delta {
                    amount: delta.value.abs(),
                    scale: delta.scale,
                    direction: if self == Self::Increment {
                        Direction::Increase
                    } else {
                        Direction::Decrease
                    },
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;

    #[test]
    fn set_target_is_celsius() {
        let payload: LegacyPayload =
            serde_json::from_str(r#"{"targetTemperature": {"value": 20.0}}"#).unwrap();
        assert_eq!(
            LegacyVerb::SetTarget.translate(&payload).unwrap(),
            TemperatureRequest::Absolute {
                target: 68.0,
                scale: Scale::Celsius,
            }
        );
    }

    #[test]
    fn increment() {
        let payload = LegacyPayload {
            delta_temperature: Some(LegacyValue { value: 1.0 }),
            ..LegacyPayload::default()
        };
        assert_eq!(
            LegacyVerb::Increment.translate(&payload).unwrap(),
            TemperatureRequest::Delta {
                amount: 1.0,
                scale: Scale::Celsius,
                direction: Direction::Increase,
            }
        );
    }

    #[test]
    fn missing_field() {
        let err = LegacyVerb::Decrement
            .translate(&LegacyPayload::default())
            .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(f)) if f == "deltaTemperature"));
    }

    #[test]
    fn implausible_target() {
        let payload = LegacyPayload {
            target_temperature: Some(LegacyValue { value: 5000.0 }),
            ..LegacyPayload::default()
        };
        assert!(matches!(
            LegacyVerb::SetTarget.translate(&payload),
            Err(Error::Value(ValueError::OutOfRange(_)))
        ));
    }

    #[test]
    fn unknown_verb() {
        assert!(matches!(
            "TurnOnRequest".parse::<LegacyVerb>(),
            Err(Error::UnsupportedDirective(_))
        ));
    }
}
