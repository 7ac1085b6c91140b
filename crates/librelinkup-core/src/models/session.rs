// ABOUTME: Login response schema returned by POST /llu/auth/login
// ABOUTME: Carries the status code, user profile, and the bearer auth ticket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Login response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionResponse {
    /// 0 when authenticated, nonzero otherwise
    pub status: i32,
    /// Session payload, absent when the login was refused
    pub data: SessionData,
}

impl SessionResponse {
    /// Whether the backend accepted the login
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.status == 0
    }
}

/// Session payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionData {
    /// Logged-in account
    pub user: SessionUser,
    /// Unread message counter
    pub messages: Option<Counter>,
    /// Unresolved notification counter
    pub notifications: Option<Counter>,
    /// Bearer ticket used on authenticated calls
    pub auth_ticket: AuthTicket,
    /// Pending invitations; shape varies between accounts
    pub invitations: Option<serde_json::Value>,
}

/// Account profile subset returned with the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionUser {
    /// Account id
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login email
    pub email: String,
    /// ISO country code
    pub country: String,
    /// UI language
    pub ui_language: String,
    /// Account type (e.g. `pat`)
    pub account_type: String,
    /// Preferred glucose unit
    pub uom: String,
    /// Preferred date format id
    pub date_format: String,
    /// Preferred time format id
    pub time_format: String,
    /// Account creation epoch
    pub created: i64,
    /// Last login epoch
    pub last_login: i64,
}

/// Simple counter objects (`{"unread": n}`, `{"unresolved": n}`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counter {
    /// Unread messages
    pub unread: Option<i64>,
    /// Unresolved notifications
    pub unresolved: Option<i64>,
}

/// Bearer ticket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthTicket {
    /// Opaque bearer token
    pub token: String,
    /// Expiry as epoch seconds
    pub expires: i64,
    /// Lifetime in milliseconds
    pub duration: i64,
}
