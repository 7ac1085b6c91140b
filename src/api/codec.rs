// ABOUTME: Request envelope codec for the LibreLinkUp API
// ABOUTME: Fixed header set, optional bearer token, and JSON request bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::Credentials;
use librelinkup_core::constants::headers;
use librelinkup_core::{CollectorError, CollectorResult};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION, CACHE_CONTROL, CONNECTION,
    CONTENT_TYPE, PRAGMA, USER_AGENT,
};
use serde::Serialize;

/// Headers and body of one outgoing request
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Complete header set
    pub headers: HeaderMap,
    /// Encoded JSON body, absent for GET requests
    pub body: Option<Vec<u8>>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Builds request envelopes carrying the client's protocol identity
#[derive(Debug, Clone)]
pub struct RequestCodec {
    version: HeaderValue,
    product: HeaderValue,
}

impl RequestCodec {
    /// Create a codec for the given protocol version and product identifier
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either value is not a valid header value
    pub fn new(version: &str, product: &str) -> CollectorResult<Self> {
        Ok(Self {
            version: header_value("version", version)?,
            product: header_value("product", product)?,
        })
    }

    /// Fixed header set, plus `Authorization` when a non-empty bearer token is given
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the token contains characters not allowed in headers
    pub fn headers(&self, bearer_token: Option<&str>) -> CollectorResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(9);
        map.insert(USER_AGENT, HeaderValue::from_static(headers::USER_AGENT));
        map.insert(CONTENT_TYPE, HeaderValue::from_static(headers::CONTENT_TYPE));
        map.insert(HeaderName::from_static(headers::VERSION), self.version.clone());
        map.insert(HeaderName::from_static(headers::PRODUCT), self.product.clone());
        map.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_static(headers::ACCEPT_ENCODING),
        );
        map.insert(CONNECTION, HeaderValue::from_static(headers::CONNECTION));
        map.insert(PRAGMA, HeaderValue::from_static(headers::PRAGMA));
        map.insert(CACHE_CONTROL, HeaderValue::from_static(headers::CACHE_CONTROL));

        if let Some(token) = bearer_token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("{}{token}", headers::BEARER_PREFIX))
                .map_err(|_| CollectorError::InvalidData {
                    details: "session token contains characters not allowed in headers".to_owned(),
                })?;
            value.set_sensitive(true);
            map.insert(AUTHORIZATION, value);
        }
        Ok(map)
    }

    /// Envelope for an authenticated or anonymous request
    ///
    /// # Errors
    ///
    /// Propagates header construction errors
    pub fn envelope(
        &self,
        body: Option<Vec<u8>>,
        bearer_token: Option<&str>,
    ) -> CollectorResult<Envelope> {
        Ok(Envelope {
            headers: self.headers(bearer_token)?,
            body,
        })
    }

    /// Encode any serializable value as a JSON body
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if serialization fails
    pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> CollectorResult<Vec<u8>> {
        serde_json::to_vec(body).map_err(|e| CollectorError::InvalidData {
            details: format!("error creating body parameters: {e}"),
        })
    }

    /// `{"email": .., "password": ..}` login body
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if serialization fails
    pub fn login_body(credentials: &Credentials) -> CollectorResult<Vec<u8>> {
        Self::encode_body(&LoginBody {
            email: credentials.email(),
            password: credentials.password(),
        })
    }
}

fn header_value(name: &str, value: &str) -> CollectorResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| CollectorError::config(format!("invalid {name} header value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_headers_have_no_authorization() {
        let codec = RequestCodec::new("4.2.2", "llu.ios").unwrap();
        let map = codec.headers(None).unwrap();
        assert_eq!(map.len(), 8);
        assert!(map.get(AUTHORIZATION).is_none());
        assert_eq!(map.get("version").unwrap(), "4.2.2");
        assert_eq!(map.get("product").unwrap(), "llu.ios");
    }

    #[test]
    fn test_empty_token_is_omitted() {
        let codec = RequestCodec::new("4.2.2", "llu.ios").unwrap();
        assert!(codec.headers(Some("")).unwrap().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_bearer_header() {
        let codec = RequestCodec::new("4.2.2", "llu.ios").unwrap();
        let map = codec.headers(Some("abc.def")).unwrap();
        assert_eq!(map.get(AUTHORIZATION).unwrap(), "Bearer abc.def");
    }

    #[test]
    fn test_login_body_shape() {
        let body = RequestCodec::login_body(&Credentials::new("a@b.c", "pw")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"email": "a@b.c", "password": "pw"}));
    }
}
