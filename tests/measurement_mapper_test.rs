// ABOUTME: Tests decoding recorded backend payloads and mapping them to canonical metrics
// ABOUTME: Uses the JSON fixtures under tests/testdata without any network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use librelinkup_collector::metrics::{map_measurement, measurement_from_graph, metric_from_graph};
use librelinkup_core::models::{
    ConnectionsResponse, GlucoseMeasurement, GraphResponse, SessionResponse,
};
use librelinkup_core::ErrorKind;
use serde_json::{json, Value};

const SESSION_JSON: &str = include_str!("testdata/session.json");
const CONNECTIONS_JSON: &str = include_str!("testdata/connections.json");
const MEASUREMENTS_JSON: &str = include_str!("testdata/measurements.json");

fn graph() -> GraphResponse {
    serde_json::from_str(MEASUREMENTS_JSON).unwrap()
}

#[test]
fn test_fixtures_decode() {
    let session: SessionResponse = serde_json::from_str(SESSION_JSON).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.data.auth_ticket.token, "fixture-token");
    assert!(session.data.invitations.is_none());

    let connections: ConnectionsResponse = serde_json::from_str(CONNECTIONS_JSON).unwrap();
    assert_eq!(connections.data.len(), 1);
    let record = &connections.data[0];
    assert_eq!(record.patient_id, "639dac0c-7065-4488-a782-ef81905213f3");
    assert_eq!(record.sensor.sn, "123ABCD456");
    assert!(record.glucose_alarm.is_none());
    assert!(record.glucose_measurement.trend_message.is_none());
    assert!(record.glucose_measurement.timestamp.is_some());

    let graph = graph();
    assert_eq!(graph.data.graph_data.len(), 2);
    assert_eq!(graph.data.active_sensors.len(), 1);
}

#[test]
fn test_graph_maps_to_canonical_metric() {
    let graph = graph();
    let raw = measurement_from_graph(&graph).unwrap();
    assert_eq!(
        raw,
        GlucoseMeasurement {
            value_mg_per_dl: 222,
            sensor_serial: "123ABCD456".to_owned(),
            epoch_seconds: 1_661_751_913,
        }
    );

    let metric = metric_from_graph(&graph, "ignored-when-graph-has-id").unwrap();
    assert_eq!(metric.tags.patient_id, "639dac0c-7065-4488-a782-ef81905213f3");
    assert_eq!(metric.tags.sensor_sn, "123ABCD456");
    assert_eq!(metric.fields.mg_dl, 222);
    assert_eq!(metric.fields.mmol_l.to_bits(), (222.0_f32 * 0.0555_f32).to_bits());
    assert_eq!(metric.fields.timestamp, "2022-08-29 05:45:13 +0000 UTC");
}

#[test]
fn test_loosely_typed_fields_accept_any_shape() {
    let trend_messages = [json!(3), json!({ "text": "rising" }), json!("rising")];
    let alarms = [json!("alarm"), json!([1]), json!({ "type": 2 })];

    for (trend, alarm) in trend_messages.into_iter().zip(alarms) {
        let mut connections: Value = serde_json::from_str(CONNECTIONS_JSON).unwrap();
        let record = &mut connections["data"][0];
        record["glucoseMeasurement"]["TrendMessage"] = trend.clone();
        record["glucoseAlarm"] = alarm.clone();
        let decoded: ConnectionsResponse = serde_json::from_value(connections).unwrap();
        assert_eq!(decoded.data[0].glucose_alarm.as_ref(), Some(&alarm));
        assert_eq!(
            decoded.data[0].glucose_measurement.trend_message.as_ref(),
            Some(&trend)
        );

        let mut measurements: Value = serde_json::from_str(MEASUREMENTS_JSON).unwrap();
        let connection = &mut measurements["data"]["connection"];
        connection["glucoseMeasurement"]["TrendMessage"] = trend.clone();
        connection["glucoseItem"]["TrendMessage"] = trend;
        connection["glucoseAlarm"] = alarm;
        let graph: GraphResponse = serde_json::from_value(measurements).unwrap();
        let metric = metric_from_graph(&graph, "p").unwrap();
        assert_eq!(metric.fields.mg_dl, 222);
    }

    let mut session: Value = serde_json::from_str(SESSION_JSON).unwrap();
    session["data"]["invitations"] = json!({ "pending": 1 });
    let session: SessionResponse = serde_json::from_value(session).unwrap();
    assert!(session.data.invitations.is_some());
}

#[test]
fn test_blank_graph_patient_id_falls_back_to_resolved_id() {
    let mut graph = graph();
    graph.data.connection.patient_id.clear();
    let metric = metric_from_graph(&graph, "resolved").unwrap();
    assert_eq!(metric.tags.patient_id, "resolved");
}

#[test]
fn test_mapping_is_deterministic() {
    let raw = GlucoseMeasurement {
        value_mg_per_dl: 97,
        sensor_serial: "0M00ABC123".to_owned(),
        epoch_seconds: 1_700_000_000,
    };
    let first = map_measurement("p", &raw).unwrap();
    for _ in 0..10 {
        let again = map_measurement("p", &raw).unwrap();
        assert_eq!(again, first);
        assert_eq!(again.fields.mmol_l.to_bits(), first.fields.mmol_l.to_bits());
    }
    assert_eq!(first.fields.timestamp, "2023-11-14 22:13:20 +0000 UTC");
}

#[test]
fn test_error_graph_yields_no_metric() {
    let stale: GraphResponse =
        serde_json::from_str(r#"{"status": 2, "error": {"message": "notAuthenticated"}}"#)
            .unwrap();
    let err = metric_from_graph(&stale, "p").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}
