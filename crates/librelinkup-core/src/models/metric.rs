// ABOUTME: Raw glucose measurement and the canonical metric record emitted per poll
// ABOUTME: Tags identify patient and sensor, fields carry both units and the timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{metric_keys, COLLECTOR_NAME};
use serde::{Deserialize, Serialize};

/// Latest reading extracted from a graph response
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlucoseMeasurement {
    /// Reading in mg/dL
    pub value_mg_per_dl: i64,
    /// Serial number of the sensor that produced it
    pub sensor_serial: String,
    /// Sensor time, Unix epoch seconds
    pub epoch_seconds: i64,
}

/// Tags of the canonical metric
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricTags {
    /// Patient id of the resolved connection
    pub patient_id: String,
    /// Serial number of the connection's current sensor
    pub sensor_sn: String,
}

/// Fields of the canonical metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricFields {
    /// Glucose in mg/dL, as reported
    pub mg_dl: i64,
    /// Glucose in mmol/L, single precision
    pub mmol_l: f32,
    /// Sensor time rendered as `YYYY-MM-DD HH:MM:SS +0000 UTC`
    pub timestamp: String,
}

/// The only externally visible artifact of a poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMetric {
    /// Measurement name
    pub name: String,
    /// Identifying tags
    pub tags: MetricTags,
    /// Values
    pub fields: MetricFields,
}

impl CanonicalMetric {
    /// Build a metric under the collector's measurement name
    #[must_use]
    pub fn new(tags: MetricTags, fields: MetricFields) -> Self {
        Self {
            name: COLLECTOR_NAME.to_owned(),
            tags,
            fields,
        }
    }

    /// Tags as ordered key/value pairs
    #[must_use]
    pub fn tag_pairs(&self) -> [(&'static str, &str); 2] {
        [
            (metric_keys::PATIENT_ID, &self.tags.patient_id),
            (metric_keys::SENSOR_SN, &self.tags.sensor_sn),
        ]
    }
}
