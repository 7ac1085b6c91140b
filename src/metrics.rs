// ABOUTME: Measurement mapper converting graph payloads into canonical glucose metrics
// ABOUTME: Single-precision mmol/L conversion and UTC timestamp rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Measurement Mapper
//!
//! The mapping is deterministic: the same raw measurement always yields a
//! bit-identical metric. `mmol_l` is computed in `f32` on purpose, matching
//! what downstream consumers of this metric already store.

use chrono::DateTime;
use librelinkup_core::constants::units::MG_DL_TO_MMOL_L;
use librelinkup_core::models::{
    CanonicalMetric, GlucoseMeasurement, GraphResponse, MetricFields, MetricTags,
};
use librelinkup_core::{CollectorError, CollectorResult};

/// chrono format producing `2022-08-29 05:45:13 +0000 UTC`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z UTC";

/// Convert mg/dL to mmol/L in single precision
#[must_use]
pub fn mg_dl_to_mmol_l(mg_dl: i64) -> f32 {
    mg_dl as f32 * MG_DL_TO_MMOL_L
}

/// Render epoch seconds as a UTC timestamp string
///
/// # Errors
///
/// Returns `InvalidData` if the value is outside chrono's representable range
pub fn format_timestamp(epoch_seconds: i64) -> CollectorResult<String> {
    DateTime::from_timestamp(epoch_seconds, 0)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .ok_or_else(|| CollectorError::InvalidData {
            details: format!("sensor timestamp {epoch_seconds} is out of range"),
        })
}

/// Extract the latest reading from a graph response
///
/// # Errors
///
/// Returns `InvalidData` if the backend reported a nonzero status or the
/// connection has no sensor, since no complete metric could be built from it
pub fn measurement_from_graph(graph: &GraphResponse) -> CollectorResult<GlucoseMeasurement> {
    if graph.status != 0 {
        return Err(CollectorError::InvalidData {
            details: format!("graph response carried status {}", graph.status),
        });
    }
    let connection = &graph.data.connection;
    if connection.sensor.sn.is_empty() {
        return Err(CollectorError::InvalidData {
            details: "graph response has no sensor serial number".to_owned(),
        });
    }
    Ok(GlucoseMeasurement {
        value_mg_per_dl: connection.glucose_measurement.value_in_mg_per_dl,
        sensor_serial: connection.sensor.sn.clone(),
        epoch_seconds: connection.sensor.a,
    })
}

/// Map a raw measurement onto the canonical metric
///
/// # Errors
///
/// Returns `InvalidData` if the sensor timestamp cannot be represented
pub fn map_measurement(
    patient_id: &str,
    raw: &GlucoseMeasurement,
) -> CollectorResult<CanonicalMetric> {
    let fields = MetricFields {
        mg_dl: raw.value_mg_per_dl,
        mmol_l: mg_dl_to_mmol_l(raw.value_mg_per_dl),
        timestamp: format_timestamp(raw.epoch_seconds)?,
    };
    let tags = MetricTags {
        patient_id: patient_id.to_owned(),
        sensor_sn: raw.sensor_serial.clone(),
    };
    Ok(CanonicalMetric::new(tags, fields))
}

/// Build the metric for a graph response fetched for `resolved_patient_id`
///
/// The `patient_id` tag comes from the graph's connection, falling back to
/// the resolved id when the backend leaves it blank.
///
/// # Errors
///
/// Propagates [`measurement_from_graph`] and [`map_measurement`] errors
pub fn metric_from_graph(
    graph: &GraphResponse,
    resolved_patient_id: &str,
) -> CollectorResult<CanonicalMetric> {
    let raw = measurement_from_graph(graph)?;
    let patient_id = match graph.data.connection.patient_id.as_str() {
        "" => resolved_patient_id,
        id => id,
    };
    map_measurement(patient_id, &raw)
}
