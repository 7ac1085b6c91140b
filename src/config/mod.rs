// ABOUTME: Configuration management module for the collector
// ABOUTME: Credentials, region, patient selection, HTTP timeouts, and the sample config text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: Collector configuration from `LIBRELINKUP_*` variables
//! - **Network**: HTTP timeout settings
//! - **Sample**: Documented sample configuration shown to operators

use std::env;

/// Collector configuration and credentials
pub mod environment;
/// HTTP timeout configuration
pub mod network;
/// Sample configuration text
pub mod sample;

pub use environment::{CollectorConfig, Credentials, ReauthPolicy};
pub use network::HttpClientConfig;
pub use sample::sample_config;

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
