// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Backend endpoints, regional hosts, fixed request headers, and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single flat list.

/// Regional API host table
pub mod regions;

/// Name under which the collector registers and emits metrics
pub const COLLECTOR_NAME: &str = "librelinkup";

/// Backend endpoint paths
pub mod endpoints {
    /// Login endpoint (unauthenticated POST)
    pub const LOGIN: &str = "/llu/auth/login";

    /// Connection list endpoint (authenticated GET)
    pub const CONNECTIONS: &str = "/llu/connections";

    /// Graph endpoint for a single patient
    #[must_use]
    pub fn graph(patient_id: &str) -> String {
        format!("{CONNECTIONS}/{patient_id}/graph")
    }
}

/// Fixed request header names and values
pub mod headers {
    /// User agent the backend expects from uploader clients
    pub const USER_AGENT: &str = "FreeStyle LibreLink Up NightScout Uploader";
    /// Content type for every request
    pub const CONTENT_TYPE: &str = "application/json";
    /// Header carrying the client protocol version
    pub const VERSION: &str = "version";
    /// Header carrying the product identifier
    pub const PRODUCT: &str = "product";
    /// Accepted response encodings
    pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";
    /// Connection reuse hint
    pub const CONNECTION: &str = "keep-alive";
    /// Legacy cache directive
    pub const PRAGMA: &str = "no-cache";
    /// Cache directive
    pub const CACHE_CONTROL: &str = "no-cache";
    /// Bearer scheme prefix for the authorization header
    pub const BEARER_PREFIX: &str = "Bearer ";

    /// Default protocol version sent in the `version` header
    pub const DEFAULT_VERSION: &str = "4.2.2";
    /// Default product identifier sent in the `product` header
    pub const DEFAULT_PRODUCT: &str = "llu.ios";
}

/// Timeouts and scheduling defaults
pub mod timeouts {
    /// Maximum wait for response headers, in seconds
    pub const RESPONSE_HEADER_TIMEOUT_SECS: u64 = 10;
    /// Overall request timeout, in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
    /// Default poll interval for the bundled scheduler, in seconds
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
}

/// Unit conversion factors
pub mod units {
    /// mg/dL → mmol/L factor, applied in single precision
    pub const MG_DL_TO_MMOL_L: f32 = 0.0555;
}

/// Canonical metric tag and field keys
pub mod metric_keys {
    /// Tag: patient identifier
    pub const PATIENT_ID: &str = "patient_id";
    /// Tag: sensor serial number
    pub const SENSOR_SN: &str = "sensor_sn";
    /// Field: glucose in mg/dL
    pub const MG_DL: &str = "mg_dl";
    /// Field: glucose in mmol/L
    pub const MMOL_L: &str = "mmol_l";
    /// Field: sensor timestamp string
    pub const TIMESTAMP: &str = "timestamp";
}
