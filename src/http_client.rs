// ABOUTME: HTTP client construction with the collector's fixed timeout configuration
// ABOUTME: One client per collector instance; no process-wide shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::network::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Create an HTTP client bounded by the overall request timeout
///
/// The response-header limit is enforced per request by the API client,
/// since reqwest has no dedicated setting for it.
#[must_use]
pub fn create_client(config: &HttpClientConfig) -> Client {
    create_custom_client(|builder| {
        builder
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.response_header_timeout_secs))
    })
}

/// Create a new HTTP client with custom configuration
///
/// Falls back to a default client if the builder fails (e.g. TLS backend
/// initialization error).
pub fn create_custom_client<F>(config_fn: F) -> Client
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    config_fn(ClientBuilder::new())
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build configured HTTP client, using defaults");
            Client::new()
        })
}
