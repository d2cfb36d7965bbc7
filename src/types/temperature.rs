// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature values and scale conversion.
//!
//! iComfort devices store every setpoint in Fahrenheit with half-degree
//! resolution, so each conversion is rounded to the nearest 0.5 on the target
//! scale. A Celsius value converted to Fahrenheit and back may therefore not be
//! the value it started as; the rounding is part of the contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Rounds to the nearest half degree, halves rounding upward.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::types::round_half;
///
/// assert_eq!(round_half(69.8), 70.0);
/// assert_eq!(round_half(21.2), 21.0);
/// assert_eq!(round_half(21.25), 21.5);
/// assert_eq!(round_half(-0.25), 0.0);
/// ```
#[must_use]
pub fn round_half(value: f64) -> f64 {
    (value * 2.0 + 0.5).floor() / 2.0
}

/// Converts Celsius to Fahrenheit, rounded to the nearest half degree.
///
/// ```
/// use icomfort_bridge::types::celsius_to_fahrenheit;
///
/// assert_eq!(celsius_to_fahrenheit(20.0), 68.0);
/// assert_eq!(celsius_to_fahrenheit(21.0), 70.0);
/// ```
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_half(celsius * 9.0 / 5.0 + 32.0)
}

/// Converts Fahrenheit to Celsius, rounded to the nearest half degree.
///
/// ```
/// use icomfort_bridge::types::fahrenheit_to_celsius;
///
/// assert_eq!(fahrenheit_to_celsius(68.0), 20.0);
/// assert_eq!(fahrenheit_to_celsius(70.0), 21.0);
/// ```
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round_half((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// Lowest temperature accepted anywhere in the bridge, in Fahrenheit.
pub const MIN_FAHRENHEIT: f64 = -100.0;
/// Highest temperature accepted anywhere in the bridge, in Fahrenheit.
pub const MAX_FAHRENHEIT: f64 = 200.0;

/// Checks that a Fahrenheit value lies within
/// [`MIN_FAHRENHEIT`]`..=`[`MAX_FAHRENHEIT`].
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` for values outside the range, NaN included.
///
/// ```
/// use icomfort_bridge::types::check_fahrenheit;
///
/// assert_eq!(check_fahrenheit(70.0), Ok(70.0));
/// assert!(check_fahrenheit(1e20).is_err());
/// assert!(check_fahrenheit(f64::NAN).is_err());
/// ```
pub fn check_fahrenheit(fahrenheit: f64) -> Result<f64, ValueError> {
    if (MIN_FAHRENHEIT..=MAX_FAHRENHEIT).contains(&fahrenheit) {
        Ok(fahrenheit)
    } else {
        Err(ValueError::OutOfRange(fahrenheit))
    }
}

/// Temperature scale used by the assistant and the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scale {
    /// Degrees Fahrenheit, the vendor's native scale.
    #[default]
    Fahrenheit,
    /// Degrees Celsius.
    Celsius,
}

impl Scale {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "FAHRENHEIT",
            Self::Celsius => "CELSIUS",
        }
    }

    /// Converts a Fahrenheit value to this scale.
    #[must_use]
    pub fn from_fahrenheit(self, fahrenheit: f64) -> f64 {
        match self {
            Self::Fahrenheit => fahrenheit,
            Self::Celsius => fahrenheit_to_celsius(fahrenheit),
        }
    }

    /// Converts a value expressed in this scale to Fahrenheit.
    #[must_use]
    pub fn to_fahrenheit(self, value: f64) -> f64 {
        match self {
            Self::Fahrenheit => value,
            Self::Celsius => celsius_to_fahrenheit(value),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FAHRENHEIT" | "F" => Ok(Self::Fahrenheit),
            "CELSIUS" | "C" => Ok(Self::Celsius),
            _ => Err(ValueError::UnsupportedScale(s.to_string())),
        }
    }
}

/// A temperature as it appears on the assistant wire: `{"value": 20.0, "scale": "CELSIUS"}`.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::types::{Scale, Temperature};
///
/// let t = Temperature::celsius(20.0);
/// assert_eq!(t.to_fahrenheit(), 68.0);
/// assert_eq!(t.to_scale(Scale::Fahrenheit), Temperature::fahrenheit(68.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    /// Numeric value in `scale`.
    pub value: f64,
    /// Scale the value is expressed in.
    #[serde(default)]
    pub scale: Scale,
}

impl Temperature {
    /// Creates a temperature.
    #[must_use]
    pub const fn new(value: f64, scale: Scale) -> Self {
        Self { value, scale }
    }

    /// Creates a Fahrenheit temperature.
    #[must_use]
    pub const fn fahrenheit(value: f64) -> Self {
        Self::new(value, Scale::Fahrenheit)
    }

    /// Creates a Celsius temperature.
    #[must_use]
    pub const fn celsius(value: f64) -> Self {
        Self::new(value, Scale::Celsius)
    }

    /// Returns the value in Fahrenheit.
    #[must_use]
    pub fn to_fahrenheit(&self) -> f64 {
        self.scale.to_fahrenheit(self.value)
    }

    /// Re-expresses this temperature in `scale`.
    #[must_use]
    pub fn to_scale(&self, scale: Scale) -> Self {
        if scale == self.scale {
            return *self;
        }
        Self::new(scale.from_fahrenheit(self.to_fahrenheit()), scale)
    }

    /// Checks that the value is a finite number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFiniteTemperature` for NaN or infinite values.
    pub fn validate(self) -> Result<Self, ValueError> {
        if self.value.is_finite() {
            Ok(self)
        } else {
            Err(ValueError::NonFiniteTemperature(self.value))
        }
    }

    /// Validates the value and returns it in Fahrenheit, range checked.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFiniteTemperature` for NaN or infinite values,
    /// or `ValueError::OutOfRange` when the converted value is not a
    /// plausible thermostat temperature.
    pub fn to_checked_fahrenheit(self) -> Result<f64, ValueError> {
        check_fahrenheit(self.validate()?.to_fahrenheit())
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.scale {
            Scale::Fahrenheit => 'F',
            Scale::Celsius => 'C',
        };
        write!(f, "{}°{unit}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_conversions() {
        assert_eq!(celsius_to_fahrenheit(20.0), 68.0);
        assert_eq!(fahrenheit_to_celsius(68.0), 20.0);
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(celsius_to_fahrenheit(22.5), 72.5);
        assert_eq!(fahrenheit_to_celsius(75.0), 24.0);
        assert_eq!(fahrenheit_to_celsius(72.0), 22.0);
    }

    #[test]
    fn round_trip_lands_within_one_step() {
        assert_eq!(fahrenheit_to_celsius(celsius_to_fahrenheit(70.0)), 70.0);
        // 21.1 C is not representable after a trip through Fahrenheit.
        assert_eq!(celsius_to_fahrenheit(21.1), 70.0);
        assert_eq!(fahrenheit_to_celsius(70.0), 21.0);
        for f in [60.0, 65.5, 68.0, 71.0, 77.5, 85.0] {
            let back = celsius_to_fahrenheit(fahrenheit_to_celsius(f));
            assert!((back - f).abs() <= 1.0, "{f} came back as {back}");
        }
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half(0.25), 0.5);
        assert_eq!(round_half(0.24), 0.0);
        assert_eq!(round_half(-0.75), -0.5);
        assert_eq!(round_half(-0.76), -1.0);
    }

    #[test]
    fn scale_parse_and_display() {
        assert_eq!("CELSIUS".parse::<Scale>().unwrap(), Scale::Celsius);
        assert_eq!("fahrenheit".parse::<Scale>().unwrap(), Scale::Fahrenheit);
        assert_eq!(
            "KELVIN".parse::<Scale>(),
            Err(ValueError::UnsupportedScale("KELVIN".to_string()))
        );
        assert_eq!(Scale::Celsius.to_string(), "CELSIUS");
    }

    #[test]
    fn temperature_deserializes_from_wire() {
        let t: Temperature =
            serde_json::from_str(r#"{"value": 21.5, "scale": "CELSIUS"}"#).unwrap();
        assert_eq!(t, Temperature::celsius(21.5));

        let default_scale: Temperature = serde_json::from_str(r#"{"value": 70}"#).unwrap();
        assert_eq!(default_scale.scale, Scale::Fahrenheit);

        assert!(serde_json::from_str::<Temperature>(r#"{"value": 300, "scale": "KELVIN"}"#).is_err());
    }

    #[test]
    fn to_scale_converts() {
        assert_eq!(
            Temperature::fahrenheit(68.0).to_scale(Scale::Celsius),
            Temperature::celsius(20.0)
        );
        assert_eq!(
            Temperature::celsius(19.0).to_scale(Scale::Celsius),
            Temperature::celsius(19.0)
        );
    }

    #[test]
    fn validate_rejects_nan() {
        assert!(Temperature::fahrenheit(f64::NAN).validate().is_err());
        assert!(Temperature::fahrenheit(70.0).validate().is_ok());
    }

    #[test]
    fn checked_fahrenheit_bounds() {
        assert_eq!(Temperature::celsius(20.0).to_checked_fahrenheit(), Ok(68.0));
        assert_eq!(Temperature::fahrenheit(200.0).to_checked_fahrenheit(), Ok(200.0));
        assert_eq!(
            Temperature::fahrenheit(1e20).to_checked_fahrenheit(),
            Err(ValueError::OutOfRange(1e20))
        );
        // Finite in Celsius, infinite once converted.
        assert_eq!(
            Temperature::celsius(f64::MAX).to_checked_fahrenheit(),
            Err(ValueError::OutOfRange(f64::INFINITY))
        );
        assert!(matches!(
            Temperature::fahrenheit(f64::NAN).to_checked_fahrenheit(),
            Err(ValueError::NonFiniteTemperature(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Temperature::celsius(21.5).to_string(), "21.5°C");
        assert_eq!(Temperature::fahrenheit(70.0).to_string(), "70°F");
    }
}
