// ABOUTME: Per-collector session store holding the current bearer token
// ABOUTME: Replaced wholesale by each successful login, untouched by failed ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use librelinkup_core::models::SessionResponse;
use librelinkup_core::{CollectorError, CollectorResult};

/// Server-issued authorization state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Login status; always 0 for a stored session
    pub status: i32,
    /// Opaque bearer token
    pub auth_token: String,
    /// Ticket expiry, epoch seconds
    pub expires: i64,
    /// Account id of the logged-in user
    pub user_id: String,
}

impl Session {
    fn from_response(response: &SessionResponse) -> Self {
        Self {
            status: response.status,
            auth_token: response.data.auth_ticket.token.clone(),
            expires: response.data.auth_ticket.expires,
            user_id: response.data.user.id.clone(),
        }
    }
}

/// Holds at most one session; never shared between collectors
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<Session>,
    successful_logins: u64,
}

impl SessionStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session, if a login has succeeded
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Bearer token of the current session
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.auth_token.as_str())
    }

    /// Whether a login has succeeded
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Number of logins that replaced the session
    #[must_use]
    pub const fn successful_logins(&self) -> u64 {
        self.successful_logins
    }

    /// Apply a decoded login response
    ///
    /// # Errors
    ///
    /// Returns the invalid-credentials error for a nonzero status, leaving the
    /// stored session untouched
    pub fn apply_login(&mut self, response: &SessionResponse) -> CollectorResult<()> {
        if !response.is_authenticated() {
            return Err(CollectorError::invalid_credentials());
        }
        self.current = Some(Session::from_response(response));
        self.successful_logins += 1;
        Ok(())
    }
}
