// ABOUTME: LibreLinkUp REST client with session handling and single-shot re-authentication
// ABOUTME: Issues requests, re-logs in on HTTP 400 for authenticated calls, decodes JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! LibreLinkUp REST API client
//!
//! The backend answers an expired session with `400 Bad Request`. For
//! authenticated calls the client then logs in again exactly once using the
//! stored credentials. Under [`ReauthPolicy::DecodeOriginal`] the response that
//! triggered the re-login is still the one decoded; under
//! [`ReauthPolicy::ReissueOnce`] the request is sent a second time with the new
//! token and that answer is decoded instead.

use super::codec::RequestCodec;
use super::session::SessionStore;
use crate::config::{CollectorConfig, Credentials, HttpClientConfig, ReauthPolicy};
use crate::http_client::create_client;
use librelinkup_core::constants::endpoints;
use librelinkup_core::models::{ConnectionsResponse, GraphResponse, SessionResponse};
use librelinkup_core::{CollectorError, CollectorResult};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Whether a request carries the session bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No `Authorization` header
    Anonymous,
    /// `Authorization: Bearer <session token>`
    Bearer,
}

/// Status and body of a completed exchange
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// Client for one LibreLinkUp account
pub struct LibreLinkUpClient {
    base_url: String,
    credentials: Credentials,
    codec: RequestCodec,
    session: SessionStore,
    http: Client,
    timeouts: HttpClientConfig,
    reauth_policy: ReauthPolicy,
}

impl LibreLinkUpClient {
    /// Create a client against an already resolved base origin
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the version or product values are not
    /// valid header values
    pub fn new(base_url: impl Into<String>, config: &CollectorConfig) -> CollectorResult<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            credentials: config.credentials.clone(),
            codec: RequestCodec::new(&config.version, &config.product)?,
            session: SessionStore::new(),
            http: create_client(&config.http),
            timeouts: config.http.clone(),
            reauth_policy: config.reauth_policy,
        })
    }

    /// Base origin all endpoints are appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session store of this client
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Log in with the stored credentials and replace the session
    ///
    /// A 400 on the login call itself is decoded like any other answer and
    /// judged by its `status` field; it never triggers another login.
    ///
    /// # Errors
    ///
    /// Returns a transport or decode error if the exchange fails, or the
    /// invalid-credentials error if the backend refuses the login
    pub async fn login(&mut self) -> CollectorResult<()> {
        let body = RequestCodec::login_body(&self.credentials)?;
        let raw = self
            .execute(
                endpoints::LOGIN,
                &Method::POST,
                Some(body.as_slice()),
                AuthMode::Anonymous,
            )
            .await?;
        let response: SessionResponse = decode(endpoints::LOGIN, &raw)?;
        self.session.apply_login(&response)?;
        info!(
            user_id = %self.session.current().map_or("", |s| s.user_id.as_str()),
            "LibreLinkUp login succeeded"
        );
        Ok(())
    }

    /// Fetch the patient connections visible to this account
    ///
    /// # Errors
    ///
    /// Propagates transport, authentication, and decode errors from [`Self::call`]
    pub async fn connections(&mut self) -> CollectorResult<ConnectionsResponse> {
        self.call(endpoints::CONNECTIONS, Method::GET, None, AuthMode::Bearer)
            .await
    }

    /// Fetch the graph (latest reading and recent history) for one patient
    ///
    /// # Errors
    ///
    /// Propagates transport, authentication, and decode errors from [`Self::call`]
    pub async fn graph(&mut self, patient_id: &str) -> CollectorResult<GraphResponse> {
        let endpoint = endpoints::graph(patient_id);
        self.call(&endpoint, Method::GET, None, AuthMode::Bearer)
            .await
    }

    /// Issue a request and decode its JSON body into `T`
    ///
    /// # Errors
    ///
    /// - transport errors when the backend cannot be reached or times out
    /// - authentication errors when a 400-triggered re-login is refused
    /// - decode errors when the body does not match `T`
    pub async fn call<T: DeserializeOwned>(
        &mut self,
        endpoint: &str,
        method: Method,
        body: Option<Vec<u8>>,
        auth: AuthMode,
    ) -> CollectorResult<T> {
        let mut raw = self
            .execute(endpoint, &method, body.as_deref(), auth)
            .await?;

        if auth == AuthMode::Bearer && raw.status == StatusCode::BAD_REQUEST {
            warn!(endpoint, "LibreLinkUp session rejected, logging in again");
            self.login().await?;

            if self.reauth_policy == ReauthPolicy::ReissueOnce {
                debug!(endpoint, "Re-issuing request with refreshed session");
                raw = self
                    .execute(endpoint, &method, body.as_deref(), auth)
                    .await?;
            }
        }

        decode(endpoint, &raw)
    }

    /// Send one request and read the full body, bounded by both timeouts
    async fn execute(
        &self,
        endpoint: &str,
        method: &Method,
        body: Option<&[u8]>,
        auth: AuthMode,
    ) -> CollectorResult<RawResponse> {
        let bearer = match auth {
            AuthMode::Bearer => self.session.bearer_token(),
            AuthMode::Anonymous => None,
        };
        let envelope = self.codec.envelope(body.map(<[u8]>::to_vec), bearer)?;

        let url = format!("{}{endpoint}", self.base_url);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(envelope.headers);
        if let Some(bytes) = envelope.body {
            request = request.body(bytes);
        }

        let header_limit = self.timeouts.response_header_timeout_secs;
        let overall_limit = self.timeouts.request_timeout_secs;

        let exchange = async {
            let response = timeout(Duration::from_secs(header_limit), request.send())
                .await
                .map_err(|_| timeout_error(endpoint, header_limit))?
                .map_err(|e| transport_error(endpoint, overall_limit, &e))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| transport_error(endpoint, overall_limit, &e))?;
            Ok::<_, CollectorError>(RawResponse {
                status,
                body: bytes.to_vec(),
            })
        };

        let raw = timeout(Duration::from_secs(overall_limit), exchange)
            .await
            .map_err(|_| timeout_error(endpoint, overall_limit))??;

        debug!(
            method = %method,
            endpoint,
            status = raw.status.as_u16(),
            bytes = raw.body.len(),
            "LibreLinkUp API call completed"
        );
        Ok(raw)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, raw: &RawResponse) -> CollectorResult<T> {
    serde_json::from_slice(&raw.body).map_err(|source| CollectorError::ParseError {
        endpoint: endpoint.to_owned(),
        source,
    })
}

fn timeout_error(endpoint: &str, limit_secs: u64) -> CollectorError {
    CollectorError::Timeout {
        endpoint: endpoint.to_owned(),
        limit_secs,
    }
}

fn transport_error(endpoint: &str, limit_secs: u64, error: &reqwest::Error) -> CollectorError {
    if error.is_timeout() {
        timeout_error(endpoint, limit_secs)
    } else {
        CollectorError::NetworkError(format!("{endpoint}: {error}"))
    }
}
