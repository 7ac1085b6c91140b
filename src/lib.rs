// ABOUTME: Main library entry point for the LibreLinkUp glucose collector
// ABOUTME: Session-authenticated API client, patient resolution, and metric mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # LibreLinkUp Collector
//!
//! Polls the LibreLinkUp cloud backend for the latest glucose reading of one
//! followed patient and emits it as a normalized metric.
//!
//! ## Architecture
//!
//! Data flows strictly downward:
//! - **Collector**: resolve endpoint, log in, resolve connection, fetch, map, emit
//! - **API client**: session store, request codec, single re-login on HTTP 400
//! - **Connection resolver**: picks the patient to poll
//! - **Measurement mapper**: builds the canonical metric
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use librelinkup_collector::collector::Collector;
//! use librelinkup_collector::config::CollectorConfig;
//! use librelinkup_collector::sink::Accumulator;
//!
//! # async fn run() -> librelinkup_core::CollectorResult<()> {
//! let config = CollectorConfig::new("user@example.com", "secret", "EU");
//! let mut collector = Collector::new(config)?;
//! collector.init().await?;
//!
//! let mut sink = Accumulator::new();
//! collector.gather(&mut sink).await?;
//! println!("{:?}", sink.metrics());
//! # Ok(())
//! # }
//! ```

/// LibreLinkUp REST API access
pub mod api;

/// Poll-cycle orchestration
pub mod collector;

/// Configuration management
pub mod config;

/// Patient connection resolution
pub mod connections;

/// HTTP client construction
pub mod http_client;

/// Structured logging setup
pub mod logging;

/// Measurement to metric mapping
pub mod metrics;

/// Region code to API origin resolution
pub mod region;

/// Metric output sinks
pub mod sink;

pub use collector::{Collector, CollectorState};
pub use librelinkup_core::{CollectorError, CollectorResult, ErrorKind};
