// ABOUTME: Collector configuration: credentials, region, patient selection, and overrides
// ABOUTME: Built programmatically or loaded from LIBRELINKUP_* environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use super::env_var_or;
use super::network::HttpClientConfig;
use librelinkup_core::constants::{headers, regions};
use librelinkup_core::{CollectorError, CollectorResult};
use std::env;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Account credentials, immutable after construction
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login email
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Login password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// What the API client does after a 400-triggered re-login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReauthPolicy {
    /// Decode the response that triggered the re-login
    #[default]
    DecodeOriginal,
    /// Re-issue the original request once with the fresh token
    ReissueOnce,
}

impl FromStr for ReauthPolicy {
    type Err = CollectorError;

    fn from_str(s: &str) -> CollectorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "decode_original" | "decode-original" => Ok(Self::DecodeOriginal),
            "reissue_once" | "reissue-once" => Ok(Self::ReissueOnce),
            other => Err(CollectorError::config(format!(
                "Invalid LIBRELINKUP_REAUTH_POLICY value: {other}"
            ))),
        }
    }
}

/// Complete collector configuration
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Account credentials
    pub credentials: Credentials,
    /// Region code (US, EU, DE, FR, JP, AP, AU, AE)
    pub region: String,
    /// Patient to poll when the account follows several
    pub patient_id: Option<String>,
    /// Protocol version header value
    pub version: String,
    /// Product header value
    pub product: String,
    /// Base URL overriding the regional origin
    pub api_url: Option<String>,
    /// Behavior after a 400-triggered re-login
    pub reauth_policy: ReauthPolicy,
    /// HTTP timeouts
    pub http: HttpClientConfig,
}

impl CollectorConfig {
    /// Configuration with defaults for everything but credentials and region
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(email, password),
            region: region.into(),
            patient_id: None,
            version: headers::DEFAULT_VERSION.to_owned(),
            product: headers::DEFAULT_PRODUCT.to_owned(),
            api_url: None,
            reauth_policy: ReauthPolicy::default(),
            http: HttpClientConfig::default(),
        }
    }

    /// Select a patient by id
    #[must_use]
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = non_empty(patient_id.into());
        self
    }

    /// Override the base API URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = non_empty(api_url.into());
        self
    }

    /// Set the re-authentication policy
    #[must_use]
    pub const fn with_reauth_policy(mut self, policy: ReauthPolicy) -> Self {
        self.reauth_policy = policy;
        self
    }

    /// Set HTTP timeouts
    #[must_use]
    pub const fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials are missing or a value fails to parse
    pub fn from_env() -> CollectorResult<Self> {
        let email = required_env("LIBRELINKUP_EMAIL")?;
        let password = required_env("LIBRELINKUP_PASSWORD")?;
        let region = env_var_or("LIBRELINKUP_REGION", regions::DEFAULT_REGION);

        let mut config = Self::new(email, password, region).with_http(HttpClientConfig::from_env()?);
        config.patient_id = env::var("LIBRELINKUP_PATIENT_ID").ok().and_then(non_empty);
        config.api_url = env::var("LIBRELINKUP_API_URL").ok().and_then(non_empty);
        config.version = env_var_or("LIBRELINKUP_VERSION", headers::DEFAULT_VERSION);
        config.product = env_var_or("LIBRELINKUP_PRODUCT", headers::DEFAULT_PRODUCT);
        if let Ok(policy) = env::var("LIBRELINKUP_REAUTH_POLICY") {
            config.reauth_policy = policy.parse()?;
        }
        Ok(config)
    }

    /// One-line summary safe for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "email={} region={} patient_id={} api_url={} version={} product={} reauth={:?} timeouts={}s/{}s",
            self.credentials.email(),
            self.region,
            self.patient_id.as_deref().unwrap_or("<auto>"),
            self.api_url.as_deref().unwrap_or("<regional>"),
            self.version,
            self.product,
            self.reauth_policy,
            self.http.response_header_timeout_secs,
            self.http.request_timeout_secs,
        )
    }
}

fn required_env(key: &str) -> CollectorResult<String> {
    env::var(key)
        .ok()
        .and_then(non_empty)
        .ok_or_else(|| CollectorError::config(format!("Missing required environment variable {key}")))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reauth_policy_parsing() {
        assert_eq!(
            "reissue_once".parse::<ReauthPolicy>().unwrap(),
            ReauthPolicy::ReissueOnce
        );
        assert_eq!(
            "Decode-Original".parse::<ReauthPolicy>().unwrap(),
            ReauthPolicy::DecodeOriginal
        );
        assert!("always".parse::<ReauthPolicy>().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("user@example.com", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("user@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_blank_patient_id_is_none() {
        let config = CollectorConfig::new("a@b.c", "pw", "EU").with_patient_id("   ");
        assert!(config.patient_id.is_none());
    }
}
