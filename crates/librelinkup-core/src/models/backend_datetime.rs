// ABOUTME: Serde adapter for the backend's US-style 12-hour timestamp strings
// ABOUTME: Decodes "8/29/2022 5:45:13 AM" into an optional naive date-time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serializer};

/// chrono format of `FactoryTimestamp` / `Timestamp` values
pub const FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Parse a backend timestamp string
///
/// # Errors
///
/// Returns the chrono parse error if the value does not match [`FORMAT`]
pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), FORMAT)
}

/// Deserialize an optional backend timestamp; `null` and `""` become `None`
///
/// # Errors
///
/// Returns a serde error if a non-empty string does not match [`FORMAT`]
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid backend timestamp '{value}': {e}"))),
    }
}

/// Serialize back into the backend format
///
/// # Errors
///
/// Propagates serializer errors
pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
