// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! This module provides the error hierarchy used across the crate: value
//! validation, vendor transport, JSON parsing, and device operations. Every
//! failure short-circuits the directive being handled and is reported once to
//! the caller; nothing is retried.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The directive name or payload shape is not one this bridge handles.
    #[error("unsupported directive: {0}")]
    UnsupportedDirective(String),

    /// The vendor service could not be reached or refused the request.
    #[error("device unreachable: {0}")]
    DeviceUnreachable(#[from] ProtocolError),

    /// The device serial is unknown to the vendor account.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// The gateway reported a heat/cool dead band that is not strictly positive
    /// or wider than any thermostat range.
    #[error("invalid heat/cool dead band: {0}")]
    InvalidBand(f64),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing a vendor response or directive.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during a device operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl Error {
    /// Returns the assistant error type reported for this failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use icomfort_bridge::Error;
    ///
    /// let err = Error::DeviceNotFound("ABC123".to_string());
    /// assert_eq!(err.error_type(), "NO_SUCH_ENDPOINT");
    /// ```
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::UnsupportedDirective(_) | Self::Value(_) => "INVALID_DIRECTIVE",
            Self::DeviceUnreachable(_) => "ENDPOINT_UNREACHABLE",
            Self::DeviceNotFound(_) => "NO_SUCH_ENDPOINT",
            Self::InvalidBand(_) | Self::Parse(_) | Self::Device(_) => "INTERNAL_ERROR",
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A temperature scale the vendor devices cannot express.
    #[error("unsupported temperature scale: {0}")]
    UnsupportedScale(String),

    /// A temperature value that is NaN or infinite.
    #[error("temperature {0} is not a finite number")]
    NonFiniteTemperature(f64),

    /// A temperature no thermostat can be set to, in Fahrenheit.
    #[error("temperature {0}°F is outside the supported range")]
    OutOfRange(f64),

    /// An unknown vendor system status code.
    #[error("invalid system status code: {0}")]
    InvalidSystemStatus(i64),

    /// An unknown vendor operation mode code.
    #[error("invalid operation mode code: {0}")]
    InvalidOperationMode(i64),
}

/// Errors related to vendor transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing vendor responses and inbound directives.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The vendor service rejected a setpoint write.
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
