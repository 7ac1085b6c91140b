// ABOUTME: Patient connection schema returned by GET /llu/connections
// ABOUTME: Sensor, alarm rule, glucose item, and patient device sub-records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::backend_datetime;
use super::session::AuthTicket;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Connection list envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionsResponse {
    /// 0 on success
    pub status: i32,
    /// Patients reachable by the logged-in account, in backend order
    pub data: Vec<ConnectionRecord>,
    /// Refreshed ticket, when the backend rotates it
    pub ticket: Option<AuthTicket>,
}

/// One monitored patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionRecord {
    /// Connection id
    pub id: String,
    /// Patient id used in graph requests
    pub patient_id: String,
    /// ISO country code
    pub country: String,
    /// Connection status code
    pub status: i32,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Lower target bound (mg/dL)
    pub target_low: i64,
    /// Upper target bound (mg/dL)
    pub target_high: i64,
    /// Unit of measure id
    pub uom: i32,
    /// Current sensor
    pub sensor: SensorInfo,
    /// Alarm configuration
    pub alarm_rules: AlarmRules,
    /// Latest measurement
    pub glucose_measurement: GlucoseItem,
    /// Latest item (usually identical to the measurement)
    pub glucose_item: GlucoseItem,
    /// Active alarm; its shape differs by alarm type, so it is kept untyped
    pub glucose_alarm: Option<serde_json::Value>,
    /// Reader or phone device
    pub patient_device: Option<PatientDevice>,
    /// Creation epoch
    pub created: i64,
}

impl ConnectionRecord {
    /// "First Last" display name
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Sensor attached to a connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorInfo {
    /// Device id
    pub device_id: String,
    /// Serial number
    pub sn: String,
    /// Activation time, epoch seconds
    pub a: i64,
    /// Warm-up duration
    pub w: i64,
    /// Product type
    pub pt: i64,
    /// Streaming flag
    pub s: bool,
    /// Late-join flag
    pub lj: bool,
}

/// Alarm configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmRules {
    /// Alarms configured
    pub c: bool,
    /// High alarm
    pub h: AlarmThreshold,
    /// Fixed-low alarm
    pub f: AlarmThreshold,
    /// Low alarm
    pub l: AlarmThreshold,
    /// Signal-loss rule
    pub nd: NoDataRule,
    /// Snooze period
    pub p: i64,
    /// Repeat period
    pub r: i64,
    /// Standard rules; always an empty object in practice
    pub std: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Threshold block shared by the high, low, and fixed-low alarms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmThreshold {
    /// Threshold (mg/dL)
    pub th: i64,
    /// Threshold (mmol/L)
    pub thmm: f64,
    /// Delay
    pub d: i64,
    /// Low-side threshold (mg/dL)
    pub tl: Option<i64>,
    /// Low-side threshold (mmol/L)
    pub tlmm: Option<f64>,
    /// Hysteresis factor
    pub f: Option<f64>,
}

/// Signal-loss alarm settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoDataRule {
    /// Interval
    pub i: i64,
    /// Repeat
    pub r: i64,
    /// Limit
    pub l: i64,
}

/// A glucose reading as embedded in connection and graph payloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GlucoseItem {
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
    /// Trend arrow (1 falling fast .. 5 rising fast)
    pub trend_arrow: Option<i32>,
    /// Trend annotation, usually null; text, number or object when present
    pub trend_message: Option<serde_json::Value>,
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

/// Device that uploads for the patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientDevice {
    /// Device id
    pub did: String,
    /// Device type id
    pub dtid: i64,
    /// App version
    pub v: String,
    /// Low limit
    pub ll: i64,
    /// High limit
    pub hl: i64,
    /// Last upload epoch
    pub u: i64,
    /// Fixed-low alarm values
    pub fixed_low_alarm_values: FixedLowAlarmValues,
    /// Alarms enabled
    pub alarms: bool,
    /// Fixed-low threshold
    pub fixed_low_threshold: i64,
}

/// Fixed-low alarm values in both units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedLowAlarmValues {
    /// mg/dL
    pub mgdl: i64,
    /// mmol/L
    pub mmoll: f64,
}
