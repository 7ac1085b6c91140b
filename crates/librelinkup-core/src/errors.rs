// ABOUTME: Structured error types for LibreLinkUp collector operations
// ABOUTME: Maps every failure onto the operator-facing ErrorKind taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collector Error Handling
//!
//! Every fallible operation in the collector returns [`CollectorResult`].
//! Variants carry enough structure for logging, while [`CollectorError::kind`]
//! collapses them into the categories an operator cares about.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message reported whenever the backend rejects the configured credentials
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "invalid login credentials. Please check your username/email and password";

/// High-level error categories surfaced to the operator
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown region, missing credentials, or ambiguous/unknown patient id
    Configuration,
    /// Login returned a nonzero status
    Authentication,
    /// Network failure or timeout
    Transport,
    /// Malformed or unexpected response payload
    Decode,
    /// Backend returned no patient connections
    UpstreamEmpty,
    /// Metric could not be written to the output sink
    Sink,
}

impl ErrorKind {
    /// Operator-facing description of this error category
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Configuration => "The collector configuration is invalid or incomplete",
            Self::Authentication => "The backend rejected the configured credentials",
            Self::Transport => "The backend could not be reached or did not answer in time",
            Self::Decode => "The backend returned a payload that could not be decoded",
            Self::UpstreamEmpty => "The backend returned no patient connections",
            Self::Sink => "The metric could not be written to the output sink",
        }
    }

    /// Whether this category should abort collector startup when raised during init
    #[must_use]
    pub const fn is_operator_fixable(self) -> bool {
        matches!(self, Self::Configuration | Self::Authentication)
    }
}

/// Errors raised by the LibreLinkUp collector
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Configuration is missing or does not match the backend state
    #[error("{details}")]
    ConfigurationError {
        /// Human-readable explanation, surfaced verbatim
        details: String,
    },

    /// Login was refused by the backend
    #[error("{reason}")]
    AuthenticationFailed {
        /// Reason reported to the caller
        reason: String,
    },

    /// Connection-level failure while talking to the backend
    #[error("network error: {0}")]
    NetworkError(String),

    /// Request exceeded one of the configured time limits
    #[error("request to {endpoint} timed out after {limit_secs}s")]
    Timeout {
        /// Endpoint path that timed out
        endpoint: String,
        /// Limit that was exceeded
        limit_secs: u64,
    },

    /// Response body could not be decoded into the expected shape
    #[error("failed to decode response from {endpoint}: {source}")]
    ParseError {
        /// Endpoint path whose body failed to decode
        endpoint: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Account has no patient connections
    #[error("no LibreLinkUp connection found")]
    NoConnections,

    /// Payload decoded but holds values that cannot be represented
    #[error("invalid data: {details}")]
    InvalidData {
        /// What was wrong with the payload
        details: String,
    },

    /// Output sink rejected the metric
    #[error("failed to emit metric: {0}")]
    SinkError(#[from] std::io::Error),

    /// Wraps another error with the operation that was running
    #[error("{context}: {source}")]
    Context {
        /// Operation prefix, e.g. "error getting connections"
        context: &'static str,
        /// Wrapped error
        #[source]
        source: Box<CollectorError>,
    },
}

impl CollectorError {
    /// Create a configuration error
    pub fn config(details: impl Into<String>) -> Self {
        Self::ConfigurationError {
            details: details.into(),
        }
    }

    /// Create the standard invalid-credentials authentication error
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::AuthenticationFailed {
            reason: INVALID_CREDENTIALS_MESSAGE.to_owned(),
        }
    }

    /// Prefix this error with the operation that was running
    #[must_use]
    pub fn with_context(self, context: &'static str) -> Self {
        Self::Context {
            context,
            source: Box::new(self),
        }
    }

    /// Category of this error, looking through any context wrappers
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationError { .. } => ErrorKind::Configuration,
            Self::AuthenticationFailed { .. } => ErrorKind::Authentication,
            Self::NetworkError(_) | Self::Timeout { .. } => ErrorKind::Transport,
            Self::ParseError { .. } | Self::InvalidData { .. } => ErrorKind::Decode,
            Self::NoConnections => ErrorKind::UpstreamEmpty,
            Self::SinkError(_) => ErrorKind::Sink,
            Self::Context { source, .. } => source.kind(),
        }
    }
}

/// Result alias used throughout the collector
pub type CollectorResult<T> = Result<T, CollectorError>;
