// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directive dispatch.
//!
//! [`SkillHandler`] answers one directive per call. A change runs as a
//! strictly ordered pipeline:
//!
//! 1. decode the payload into a [`TemperatureRequest`]
//! 2. read thermostat and gateway info (concurrently)
//! 3. [`reconcile`] the request against the snapshot
//! 4. write the new setpoints and wait for the acknowledgement
//! 5. build the confirmation
//!
//! Any failure stops the pipeline where it happens; in particular nothing is
//! written when reconciliation fails.

use chrono::Utc;
use serde::Deserialize;

use crate::directive::legacy::{LegacyPayload, LegacyVerb};
use crate::directive::{Directive, DirectiveKind};
use crate::envelope::EventEnvelope;
use crate::error::{ParseError, Result};
use crate::gateway::DeviceGateway;
use crate::protocol::VendorApi;
use crate::setpoint::{TemperatureRequest, reconcile};

/// Answers assistant directives for one vendor account.
///
/// # Examples
///
/// ```no_run
/// use icomfort_bridge::directive::DirectiveEnvelope;
/// use icomfort_bridge::gateway::DeviceGateway;
/// use icomfort_bridge::handler::SkillHandler;
/// use icomfort_bridge::protocol::IComfortConfig;
///
/// # async fn example(raw: &str) -> icomfort_bridge::Result<()> {
/// let client = IComfortConfig::new("user@example.com", "secret").into_client()?;
/// let handler = SkillHandler::new(DeviceGateway::new(client, "user@example.com"));
///
/// let envelope: DirectiveEnvelope = serde_json::from_str(raw)
///     .map_err(icomfort_bridge::ParseError::Json)?;
/// let event = handler.respond(envelope.directive).await;
/// println!("{}", serde_json::to_string(&event).unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SkillHandler<A: VendorApi> {
    gateway: DeviceGateway<A>,
}

impl<A: VendorApi> SkillHandler<A> {
    /// Creates a handler over the given gateway.
    #[must_use]
    pub fn new(gateway: DeviceGateway<A>) -> Self {
        Self { gateway }
    }

    /// Returns the gateway.
    #[must_use]
    pub fn gateway(&self) -> &DeviceGateway<A> {
        &self.gateway
    }

    /// Handles a directive, turning any failure into an error response.
    pub async fn respond(&self, directive: Directive) -> EventEnvelope {
        match self.handle(&directive).await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(
                    name = %directive.header.name,
                    error = %err,
                    error_type = err.error_type(),
                    "Directive failed"
                );
                let endpoint_id = directive.endpoint.as_ref().map(|e| e.endpoint_id.as_str());
                EventEnvelope::error(Some(&directive.header), endpoint_id, &err)
            }
        }
    }

    /// Handles a directive.
    ///
    /// Names of the current protocol are tried first; the legacy
    /// `...TargetTemperatureRequest` verbs are accepted as a fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDirective`](crate::Error::UnsupportedDirective) for unknown names, or the
    /// first failure of the pipeline.
    pub async fn handle(&self, directive: &Directive) -> Result<EventEnvelope> {
        let kind = match directive.kind() {
            Ok(kind) => kind,
            Err(err) => {
                return match directive.header.name.parse::<LegacyVerb>() {
                    Ok(verb) => self.handle_legacy(directive, verb).await,
                    Err(_) => Err(err),
                };
            }
        };

        tracing::info!(%kind, message_id = %directive.header.message_id, "Handling directive");

        match kind {
            DirectiveKind::Discover => {
                let systems = self.gateway.discover().await?;
                Ok(EventEnvelope::discovery(&systems))
            }
            DirectiveKind::ReportState => {
                let device_id = directive.endpoint_id()?;
                let state = self.gateway.fetch_state(device_id).await?;
                Ok(EventEnvelope::state_report(&directive.header, device_id, &state))
            }
            DirectiveKind::SetTargetTemperature | DirectiveKind::AdjustTargetTemperature => {
                let request = directive.temperature_request()?;
                self.apply(directive, request).await
            }
        }
    }

    async fn handle_legacy(
        &self,
        directive: &Directive,
        verb: LegacyVerb,
    ) -> Result<EventEnvelope> {
        tracing::info!(
            ?verb,
            message_id = %directive.header.message_id,
            "Handling legacy directive"
        );

        let payload = LegacyPayload::deserialize(&directive.payload).map_err(ParseError::Json)?;
        let request = verb.translate(&payload)?;
        self.apply(directive, request).await
    }

    async fn apply(
        &self,
        directive: &Directive,
        request: TemperatureRequest,
    ) -> Result<EventEnvelope> {
        let device_id = directive.endpoint_id()?;
        let state = self.gateway.fetch_state(device_id).await?;
        let result = reconcile(&state, &request)?;

        self.gateway
            .write_setpoints(
                device_id,
                result.heat_setpoint(),
                result.cool_setpoint(),
                result.target(),
            )
            .await?;

        Ok(EventEnvelope::change_response(
            &directive.header,
            device_id,
            &result,
            Utc::now(),
        ))
    }
}
