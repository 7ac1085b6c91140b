// ABOUTME: Region resolver mapping short region codes to LibreLinkUp API origins
// ABOUTME: Unknown codes resolve to an empty origin rejected later at collector init
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use librelinkup_core::constants::regions::{API_HOSTS, SCHEME};
use librelinkup_core::{CollectorError, CollectorResult};
use std::fmt;
use std::str::FromStr;

/// Geographic partition an account is provisioned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// United States
    Us,
    /// Europe
    Eu,
    /// Germany
    De,
    /// France
    Fr,
    /// Japan
    Jp,
    /// Asia-Pacific
    Ap,
    /// Australia
    Au,
    /// United Arab Emirates
    Ae,
}

impl Region {
    /// All regions in table order
    pub const ALL: [Self; 8] = [
        Self::Us,
        Self::Eu,
        Self::De,
        Self::Fr,
        Self::Jp,
        Self::Ap,
        Self::Au,
        Self::Ae,
    ];

    /// Upper-case region code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::Jp => "JP",
            Self::Ap => "AP",
            Self::Au => "AU",
            Self::Ae => "AE",
        }
    }

    /// API host for this region
    #[must_use]
    pub fn host(self) -> &'static str {
        API_HOSTS
            .iter()
            .find(|(code, _)| *code == self.code())
            .map_or("", |(_, host)| host)
    }

    /// Base origin, e.g. `https://api-eu.libreview.io`
    #[must_use]
    pub fn origin(self) -> String {
        format!("{SCHEME}{}", self.host())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = CollectorError;

    /// Codes are matched exactly; `us` is not a region
    fn from_str(s: &str) -> CollectorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.code() == s)
            .ok_or_else(|| CollectorError::config(format!("unknown region '{s}'")))
    }
}

/// Resolve a region code to its base origin
///
/// Unknown codes yield an empty string rather than an error; the collector
/// rejects the empty origin when it first tries to use it.
#[must_use]
pub fn resolve_origin(code: &str) -> String {
    code.parse::<Region>()
        .map(Region::origin)
        .unwrap_or_default()
}
