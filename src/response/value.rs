// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loosely typed vendor scalars.

use serde::Deserialize;

use crate::error::ParseError;

/// A numeric field the vendor sends either as a JSON number or a string.
///
/// # Examples
///
/// ```
/// use icomfort_bridge::response::VendorNumber;
///
/// let n: VendorNumber = serde_json::from_str(r#""72.5""#).unwrap();
/// assert_eq!(n.as_f64("Indoor_Temp").unwrap(), 72.5);
///
/// let n: VendorNumber = serde_json::from_str("3").unwrap();
/// assert_eq!(n.as_i64("System_Status").unwrap(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VendorNumber {
    /// A JSON number.
    Number(f64),
    /// A numeric string.
    Text(String),
}

impl VendorNumber {
    /// Returns the value as a finite float.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if a string value is not numeric,
    /// or spells out a NaN or infinity.
    pub fn as_f64(&self, field: &str) -> Result<f64, ParseError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().map_err(|_| ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a number, got '{s}'"),
            })?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a finite number, got {value}"),
            })
        }
    }

    /// Returns the value as an integer code.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the value is not a whole number.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self, field: &str) -> Result<i64, ParseError> {
        let value = self.as_f64(field)?;
        // Safe: only whole numbers well inside i64 range reach the cast
        if value.fract() == 0.0 && value.abs() < 1e15 {
            Ok(value as i64)
        } else {
            Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a whole number, got {value}"),
            })
        }
    }
}

impl From<f64> for VendorNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}
