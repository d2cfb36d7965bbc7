// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directive pipeline tests against an in-memory vendor.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use icomfort_bridge::protocol::VendorApi;
use icomfort_bridge::response::{
    GatewayInfoResponse, SetpointAck, SetpointUpdate, SystemsInfoResponse, ThermostatInfoResponse,
};
use icomfort_bridge::{
    DeviceGateway, Directive, DirectiveEnvelope, EventEnvelope, ProtocolError, Result,
    SkillHandler,
};

/// One thermostat as the vendor stores it, in Fahrenheit.
#[derive(Debug, Clone)]
struct Thermostat {
    status: i64,
    indoor: f64,
    heat: f64,
    cool: f64,
    band: f64,
    celsius: bool,
}

#[derive(Debug, Default)]
struct InMemoryVendor {
    thermostats: Mutex<Vec<(String, Thermostat)>>,
    writes: AtomicUsize,
    offline: bool,
    reject_writes: bool,
}

impl InMemoryVendor {
    fn with(serial: &str, thermostat: Thermostat) -> Self {
        Self {
            thermostats: Mutex::new(vec![(serial.to_string(), thermostat)]),
            ..Self::default()
        }
    }

    fn find(&self, serial: &str) -> Option<Thermostat> {
        self.thermostats
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| s == serial)
            .map(|(_, t)| t.clone())
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            Err(ProtocolError::ConnectionFailed("offline".to_string()).into())
        } else {
            Ok(())
        }
    }
}

impl VendorApi for InMemoryVendor {
    async fn systems_info(&self, _user_id: &str) -> Result<SystemsInfoResponse> {
        self.check_online()?;
        let systems: Vec<_> = self
            .thermostats
            .lock()
            .unwrap()
            .iter()
            .map(|(serial, _)| serde_json::json!({ "Gateway_SN": serial, "System_Name": format!("{serial} home") }))
            .collect();
        Ok(serde_json::from_value(serde_json::json!({ "ReturnStatus": "SUCCESS", "Systems": systems })).unwrap())
    }

    async fn thermostat_info(&self, gateway_sn: &str) -> Result<ThermostatInfoResponse> {
        self.check_online()?;
        let list: Vec<_> = self
            .find(gateway_sn)
            .map(|t| {
                serde_json::json!({
                    "System_Status": t.status,
                    "Indoor_Temp": t.indoor,
                    "Heat_Set_Point": t.heat,
                    "Cool_Set_Point": t.cool,
                    "Pref_Temp_Units": if t.celsius { "1" } else { "0" }
                })
            })
            .into_iter()
            .collect();
        Ok(serde_json::from_value(serde_json::json!({ "tStatInfo": list })).unwrap())
    }

    async fn gateway_info(&self, gateway_sn: &str) -> Result<GatewayInfoResponse> {
        self.check_online()?;
        let band = self.find(gateway_sn).map_or(0.0, |t| t.band);
        Ok(serde_json::from_value(serde_json::json!({ "Heat_Cool_Dead_Band": band })).unwrap())
    }

    async fn set_thermostat_info(&self, update: &SetpointUpdate) -> Result<SetpointAck> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes {
            return Ok(SetpointAck {
                return_status: Some("FAILURE".to_string()),
            });
        }
        let mut thermostats = self.thermostats.lock().unwrap();
        if let Some((_, t)) = thermostats.iter_mut().find(|(s, _)| *s == update.gateway_sn) {
            t.heat = update.heat_set_point;
            t.cool = update.cool_set_point;
        }
        Ok(SetpointAck {
            return_status: Some("SUCCESS".to_string()),
        })
    }
}

fn thermostat(indoor: f64, heat: f64, cool: f64, band: f64) -> Thermostat {
    Thermostat {
        status: 0,
        indoor,
        heat,
        cool,
        band,
        celsius: false,
    }
}

fn directive(namespace: &str, name: &str, endpoint: &str, payload: serde_json::Value) -> Directive {
    serde_json::from_value::<DirectiveEnvelope>(serde_json::json!({
        "directive": {
            "header": {
                "namespace": namespace,
                "name": name,
                "payloadVersion": "3",
                "messageId": "m",
                "correlationToken": "t"
            },
            "endpoint": { "endpointId": endpoint },
            "payload": payload
        }
    }))
    .unwrap()
    .directive
}

fn value(event: &EventEnvelope, name: &str) -> serde_json::Value {
    event.property(name).unwrap().value.clone()
}

#[tokio::test]
async fn celsius_target_is_stored_in_fahrenheit_and_echoed_in_celsius() {
    let vendor = InMemoryVendor::with("WS1", thermostat(65.0, 63.0, 75.0, 4.0));
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let event = handler
        .respond(directive(
            "Alexa.ThermostatController",
            "SetTargetTemperature",
            "WS1",
            serde_json::json!({ "targetSetpoint": { "value": 20.0, "scale": "CELSIUS" } }),
        ))
        .await;

    assert_eq!(event.event.header.name, "Response");
    assert_eq!(
        value(&event, "targetSetpoint"),
        serde_json::json!({ "value": 20.0, "scale": "CELSIUS" })
    );

    let stored = handler.gateway().api().find("WS1").unwrap();
    assert_eq!((stored.heat, stored.cool), (68.0, 72.0));
}

#[tokio::test]
async fn wide_range_is_copied_exactly() {
    let vendor = InMemoryVendor::with("WS1", thermostat(70.0, 68.0, 72.0, 3.0));
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    handler
        .handle(&directive(
            "Alexa.ThermostatController",
            "SetTargetTemperature",
            "WS1",
            serde_json::json!({
                "lowerSetpoint": { "value": 64.0, "scale": "FAHRENHEIT" },
                "upperSetpoint": { "value": 78.0, "scale": "FAHRENHEIT" }
            }),
        ))
        .await
        .unwrap();

    let stored = handler.gateway().api().find("WS1").unwrap();
    assert_eq!((stored.heat, stored.cool), (64.0, 78.0));
}

#[tokio::test]
async fn adjust_while_heating_raises_heat_setpoint() {
    let mut t = thermostat(72.0, 70.0, 74.0, 4.0);
    t.status = 1;
    let vendor = InMemoryVendor::with("WS1", t);
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let event = handler
        .handle(&directive(
            "Alexa.ThermostatController",
            "AdjustTargetTemperature",
            "WS1",
            serde_json::json!({ "targetSetpointDelta": { "value": 2.0, "scale": "FAHRENHEIT" } }),
        ))
        .await
        .unwrap();

    let stored = handler.gateway().api().find("WS1").unwrap();
    assert_eq!((stored.heat, stored.cool), (74.0, 78.0));
    assert_eq!(value(&event, "thermostatMode"), "HEAT");
}

#[tokio::test]
async fn report_state_uses_preferred_scale() {
    let mut t = thermostat(68.0, 66.0, 75.0, 3.0);
    t.celsius = true;
    let vendor = InMemoryVendor::with("WS1", t);
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let event = handler
        .handle(&directive("Alexa", "ReportState", "WS1", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(event.event.header.name, "StateReport");
    assert_eq!(
        value(&event, "temperature"),
        serde_json::json!({ "value": 20.0, "scale": "CELSIUS" })
    );
    assert_eq!(handler.gateway().api().writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_vendor_reports_endpoint_unreachable() {
    let vendor = InMemoryVendor {
        offline: true,
        ..InMemoryVendor::with("WS1", thermostat(70.0, 68.0, 72.0, 4.0))
    };
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let event = handler
        .respond(directive(
            "Alexa.ThermostatController",
            "SetTargetTemperature",
            "WS1",
            serde_json::json!({ "targetSetpoint": { "value": 70.0 } }),
        ))
        .await;

    assert_eq!(event.event.payload["type"], "ENDPOINT_UNREACHABLE");
    assert_eq!(handler.gateway().api().writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_write_reports_internal_error() {
    let vendor = InMemoryVendor {
        reject_writes: true,
        ..InMemoryVendor::with("WS1", thermostat(70.0, 68.0, 72.0, 4.0))
    };
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let event = handler
        .respond(directive(
            "Alexa.ThermostatController",
            "SetTargetTemperature",
            "WS1",
            serde_json::json!({ "targetSetpoint": { "value": 71.0, "scale": "FAHRENHEIT" } }),
        ))
        .await;

    assert_eq!(event.event.payload["type"], "INTERNAL_ERROR");
    assert_eq!(handler.gateway().api().writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_serial_reports_no_such_endpoint() {
    let vendor = InMemoryVendor::with("WS1", thermostat(70.0, 68.0, 72.0, 4.0));
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let event = handler
        .respond(directive("Alexa", "ReportState", "WS2", serde_json::json!({})))
        .await;

    assert_eq!(event.event.payload["type"], "NO_SUCH_ENDPOINT");
}

#[tokio::test]
async fn discovery_names_each_system() {
    let vendor = InMemoryVendor::with("WS1", thermostat(70.0, 68.0, 72.0, 4.0));
    vendor
        .thermostats
        .lock()
        .unwrap()
        .push(("WS2".to_string(), thermostat(70.0, 68.0, 72.0, 4.0)));
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    let json = serde_json::json!({
        "directive": {
            "header": {
                "namespace": "Alexa.Discovery",
                "name": "Discover",
                "payloadVersion": "3",
                "messageId": "d"
            },
            "payload": {}
        }
    });
    let directive = serde_json::from_value::<DirectiveEnvelope>(json).unwrap().directive;
    let event = handler.handle(&directive).await.unwrap();

    let endpoints = event.event.payload["endpoints"].as_array().unwrap().clone();
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[1]["endpointId"], "WS2");
    assert_eq!(endpoints[1]["friendlyName"], "WS2 home");
    assert_eq!(endpoints[0]["capabilities"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn implausible_target_is_invalid_directive() {
    let vendor = InMemoryVendor::with("WS1", thermostat(70.0, 68.0, 72.0, 4.0));
    let handler = SkillHandler::new(DeviceGateway::new(vendor, "user"));

    for payload in [
        serde_json::json!({ "targetSetpoint": { "value": 1e20, "scale": "FAHRENHEIT" } }),
        serde_json::json!({ "targetSetpoint": { "value": 1e308, "scale": "CELSIUS" } }),
        serde_json::json!({ "targetSetpointDelta": { "value": 1e20, "scale": "FAHRENHEIT" } }),
    ] {
        let event = handler
            .respond(directive(
                "Alexa.ThermostatController",
                "SetTargetTemperature",
                "WS1",
                payload,
            ))
            .await;
        assert_eq!(event.event.header.name, "ErrorResponse");
        assert_eq!(event.event.payload["type"], "INVALID_DIRECTIVE");
    }
    assert_eq!(handler.gateway().api().writes.load(Ordering::SeqCst), 0);
}
