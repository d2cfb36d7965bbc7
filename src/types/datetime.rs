// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor timestamp parsing.
//!
//! The iComfort service serializes timestamps in the WCF JSON date format:
//!
//! - `"/Date(1514764800000)/"` - Unix epoch milliseconds (UTC)
//! - `"/Date(1514764800000-0500)/"` - the same, followed by the local offset
//!
//! The epoch part is always UTC; the trailing offset only describes the
//! device's local zone.
//!
//! # Examples
//!
//! ```
//! use icomfort_bridge::types::VendorDateTime;
//!
//! let dt: VendorDateTime = "/Date(1514764800000-0500)/".parse().unwrap();
//! assert_eq!(dt.utc().to_rfc3339(), "2018-01-01T00:00:00+00:00");
//! assert_eq!(dt.timezone_offset().unwrap().local_minus_utc(), -5 * 3600);
//! ```

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Error returned when parsing a vendor timestamp fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    input: String,
}

impl DateTimeParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// Returns the input string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to parse datetime: '{}' (expected /Date(<epoch ms>)/)",
            self.input
        )
    }
}

impl std::error::Error for DateTimeParseError {}

/// A timestamp parsed from a vendor `DateTime_Mark` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorDateTime {
    utc: DateTime<Utc>,
    /// Local offset in seconds east of UTC, when the vendor sent one.
    offset_secs: Option<i32>,
}

impl VendorDateTime {
    /// Returns the instant in UTC.
    #[must_use]
    pub const fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Returns the device's local offset, if the vendor included one.
    #[must_use]
    pub fn timezone_offset(&self) -> Option<FixedOffset> {
        self.offset_secs.and_then(FixedOffset::east_opt)
    }

    /// Parses a `+hhmm`/`-hhmm` suffix into seconds east of UTC.
    fn parse_offset(s: &str) -> Option<i32> {
        let (sign, digits) = match s.as_bytes().first()? {
            b'+' => (1, &s[1..]),
            b'-' => (-1, &s[1..]),
            _ => return None,
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let hours: i32 = digits[..2].parse().ok()?;
        let minutes: i32 = digits[2..].parse().ok()?;
        Some(sign * (hours * 3600 + minutes * 60))
    }
}

impl FromStr for VendorDateTime {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix("/Date(")
            .and_then(|rest| rest.strip_suffix(")/"))
            .ok_or_else(|| DateTimeParseError::new(s))?;

        // The sign of the offset is the first +/- after the (possibly negative) epoch.
        let split = inner
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '+' || *c == '-')
            .map_or(inner.len(), |(i, _)| i);
        let (millis, offset) = inner.split_at(split);

        let millis: i64 = millis.parse().map_err(|_| DateTimeParseError::new(s))?;
        let utc = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| DateTimeParseError::new(s))?;
        let offset_secs = if offset.is_empty() {
            None
        } else {
            Some(Self::parse_offset(offset).ok_or_else(|| DateTimeParseError::new(s))?)
        };

        Ok(Self { utc, offset_secs })
    }
}
