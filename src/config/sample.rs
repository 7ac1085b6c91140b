// ABOUTME: Documented sample configuration for operators registering the collector
// ABOUTME: Lists every recognized LIBRELINKUP_* setting with its default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

const SAMPLE_CONFIG: &str = r"# Read the latest glucose reading from the LibreLinkUp backend
#
## LibreLinkUp account credentials (required)
# LIBRELINKUP_EMAIL=user@example.com
# LIBRELINKUP_PASSWORD=secret
#
## Region the account is provisioned in: US, EU, DE, FR, JP, AP, AU, AE
# LIBRELINKUP_REGION=EU
#
## Patient to poll; required when the account follows more than one patient
# LIBRELINKUP_PATIENT_ID=
#
## Protocol overrides
# LIBRELINKUP_VERSION=4.2.2
# LIBRELINKUP_PRODUCT=llu.ios
# LIBRELINKUP_API_URL=
#
## Behavior after an expired session is renewed: decode_original | reissue_once
# LIBRELINKUP_REAUTH_POLICY=decode_original
#
## HTTP timeouts in seconds
# LIBRELINKUP_RESPONSE_HEADER_TIMEOUT_SECS=10
# LIBRELINKUP_REQUEST_TIMEOUT_SECS=15
";

/// Sample configuration text shown when registering the collector
#[must_use]
pub const fn sample_config() -> &'static str {
    SAMPLE_CONFIG
}
