// ABOUTME: Data models for the LibreLinkUp wire schema and the canonical metric record
// ABOUTME: Serde declarations for session, connection, and graph payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Backend payloads are declared leniently: every struct defaults missing keys
//! so that schema drift on fields the collector never reads does not break a
//! poll cycle. Fields the backend types loosely are modeled as explicit
//! optional values instead of untyped placeholders.

/// Backend `M/D/YYYY h:mm:ss AM` timestamp adapter
pub mod backend_datetime;
/// Patient connection records (`/llu/connections`)
pub mod connection;
/// Graph payload (`/llu/connections/{id}/graph`)
pub mod graph;
/// Raw measurement and canonical metric
pub mod metric;
/// Login session payload (`/llu/auth/login`)
pub mod session;

pub use connection::{
    AlarmRules, AlarmThreshold, ConnectionRecord, ConnectionsResponse, FixedLowAlarmValues,
    GlucoseItem, NoDataRule, PatientDevice, SensorInfo,
};
pub use graph::{ActiveSensor, GraphData, GraphPoint, GraphResponse};
pub use metric::{CanonicalMetric, GlucoseMeasurement, MetricFields, MetricTags};
pub use session::{AuthTicket, SessionData, SessionResponse, SessionUser};
