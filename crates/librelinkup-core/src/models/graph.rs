// ABOUTME: Graph schema returned by GET /llu/connections/{patientId}/graph
// ABOUTME: Current connection snapshot, active sensors, and recent readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::backend_datetime;
use super::connection::{ConnectionRecord, PatientDevice, SensorInfo};
use super::session::AuthTicket;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Graph envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphResponse {
    /// 0 on success
    pub status: i32,
    /// Graph payload
    pub data: GraphData,
    /// Refreshed ticket, when the backend rotates it
    pub ticket: Option<AuthTicket>,
}

/// Graph payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphData {
    /// Connection snapshot including the latest measurement
    pub connection: ConnectionRecord,
    /// Sensors currently paired
    pub active_sensors: Vec<ActiveSensor>,
    /// Recent history, oldest first
    pub graph_data: Vec<GraphPoint>,
}

/// Sensor and the device it is paired with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveSensor {
    /// Sensor
    pub sensor: SensorInfo,
    /// Paired device
    pub device: PatientDevice,
}

/// Historical reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GraphPoint {
    /// Sensor factory time
    #[serde(with = "backend_datetime")]
    pub factory_timestamp: Option<NaiveDateTime>,
    /// Local time of the reading
    #[serde(with = "backend_datetime")]
    pub timestamp: Option<NaiveDateTime>,
    /// Reading type
    #[serde(rename = "type")]
    pub kind: i32,
    /// Reading in mg/dL
    pub value_in_mg_per_dl: i64,
    /// Colour band
    pub measurement_color: i32,
    /// Display unit id
    pub glucose_units: i32,
    /// Reading in display units
    pub value: f64,
    /// Above measurable range
    #[serde(rename = "isHigh")]
    pub is_high: bool,
    /// Below measurable range
    #[serde(rename = "isLow")]
    pub is_low: bool,
}
