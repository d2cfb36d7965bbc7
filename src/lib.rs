// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! iComfort Bridge - Alexa thermostat directives for Lennox iComfort systems.
//!
//! This library answers smart home directives by calling the Lennox iComfort
//! web service. Its core is setpoint reconciliation: a voice request names a
//! target, a range, or a relative change, while the thermostat needs a
//! heat-to and a cool-to setpoint kept at least the gateway's dead band apart.
//!
//! # Supported Directives
//!
//! - **Discover**: one endpoint per iComfort system on the account
//! - **ReportState**: indoor temperature, setpoints and mode
//! - **SetTargetTemperature**: absolute target or lower/upper range
//! - **AdjustTargetTemperature**: relative change from the indoor temperature
//! - **Legacy verbs**: `Set`/`Increment`/`DecrementTargetTemperatureRequest`
//!
//! # Quick Start
//!
//! ```no_run
//! use icomfort_bridge::{DeviceGateway, DirectiveEnvelope, IComfortConfig, SkillHandler};
//!
//! #[tokio::main]
//! async fn main() -> icomfort_bridge::Result<()> {
//!     let client = IComfortConfig::new("user@example.com", "secret").into_client()?;
//!     let handler = SkillHandler::new(DeviceGateway::new(client, "user@example.com"));
//!
//!     let raw = std::io::read_to_string(std::io::stdin()).unwrap_or_default();
//!     let envelope: DirectiveEnvelope =
//!         serde_json::from_str(&raw).map_err(icomfort_bridge::ParseError::Json)?;
//!
//!     let event = handler.respond(envelope.directive).await;
//!     println!("{}", serde_json::to_string_pretty(&event).unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Reconciliation Only
//!
//! The reconciler is a pure function and needs no I/O:
//!
//! ```
//! use icomfort_bridge::{DeviceState, Scale, TemperatureRequest, ThermostatMode, reconcile};
//!
//! // 70°F indoors, 68/72 setpoints, 4°F dead band.
//! let state = DeviceState::new(70.0, 68.0, 72.0, 4.0);
//! let request = TemperatureRequest::Range {
//!     lower: 69.0,
//!     upper: 70.0,
//!     target: None,
//!     scale: Scale::Fahrenheit,
//! };
//!
//! let result = reconcile(&state, &request).unwrap();
//! assert_eq!((result.heat_setpoint(), result.cool_setpoint()), (66.0, 70.0));
//! assert_eq!(result.mode(), ThermostatMode::Cool);
//! ```

pub mod directive;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod protocol;
pub mod response;
pub mod setpoint;
pub mod state;
pub mod types;

pub use directive::{Directive, DirectiveEnvelope, DirectiveKind};
pub use envelope::EventEnvelope;
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use gateway::DeviceGateway;
pub use handler::SkillHandler;
pub use protocol::VendorApi;
#[cfg(feature = "http")]
pub use protocol::{IComfortClient, IComfortConfig};
pub use setpoint::{Direction, ReconciliationResult, TemperatureRequest, reconcile};
pub use state::DeviceState;
pub use types::{Scale, SystemStatus, Temperature, ThermostatMode, VendorDateTime};
