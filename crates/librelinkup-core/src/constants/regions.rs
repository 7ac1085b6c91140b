// ABOUTME: Regional LibreLinkUp API hosts keyed by short region code
// ABOUTME: One entry per provisioned geographic partition of the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// URL scheme prefixed to every regional host
pub const SCHEME: &str = "https://";

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "EU";

/// Known region codes and their API hosts
pub const API_HOSTS: [(&str, &str); 8] = [
    ("US", "api-us.libreview.io"),
    ("EU", "api-eu.libreview.io"),
    ("DE", "api-de.libreview.io"),
    ("FR", "api-fr.libreview.io"),
    ("JP", "api-jp.libreview.io"),
    ("AP", "api-ap.libreview.io"),
    ("AU", "api-au.libreview.io"),
    ("AE", "api-ae.libreview.io"),
];
