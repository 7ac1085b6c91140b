// ABOUTME: Network configuration for the LibreLinkUp HTTP client
// ABOUTME: Response-header and overall request timeouts fixed at construction time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_var_or;
use librelinkup_core::constants::timeouts;
use librelinkup_core::{CollectorError, CollectorResult};
use serde::{Deserialize, Serialize};

/// HTTP client timeout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Maximum wait for response headers, in seconds
    pub response_header_timeout_secs: u64,
    /// Overall request timeout including the body, in seconds
    pub request_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            response_header_timeout_secs: timeouts::RESPONSE_HEADER_TIMEOUT_SECS,
            request_timeout_secs: timeouts::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load HTTP client configuration from environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a timeout is not a positive integer
    pub fn from_env() -> CollectorResult<Self> {
        let config = Self {
            response_header_timeout_secs: parse_secs(
                "LIBRELINKUP_RESPONSE_HEADER_TIMEOUT_SECS",
                timeouts::RESPONSE_HEADER_TIMEOUT_SECS,
            )?,
            request_timeout_secs: parse_secs(
                "LIBRELINKUP_REQUEST_TIMEOUT_SECS",
                timeouts::REQUEST_TIMEOUT_SECS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Ensure both limits are finite and non-zero
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero timeout
    pub fn validate(&self) -> CollectorResult<()> {
        if self.response_header_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(CollectorError::config(
                "HTTP timeouts must be greater than zero seconds",
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, default: u64) -> CollectorResult<u64> {
    env_var_or(key, &default.to_string())
        .parse()
        .map_err(|e| CollectorError::config(format!("Invalid {key} value: {e}")))
}
