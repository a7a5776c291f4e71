//! HTTP client for schemes API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the schemes API, handling bearer authentication, query encoding, status
//! checks and response decoding.

use super::error::ApiError;
use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Serialize};

const USER_AGENT: &str = concat!("schemes-tui/", env!("CARGO_PKG_VERSION"));

/// Makes requests to the schemes API and tries to conform response data to
/// the requested type.
///
pub struct Client {
    pub(crate) base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    /// Issue a GET request and decode the response body.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.call::<T, ()>(Method::GET, path, params, None, token)
            .await
    }

    /// Issue a POST request with a JSON body and decode the response body.
    ///
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.call(Method::POST, path, &[], Some(body), token).await
    }

    /// Issue a PUT request with a JSON body and decode the response body.
    ///
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.call(Method::PUT, path, &[], Some(body), token).await
    }

    /// Issue a DELETE request and decode the response body.
    ///
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.call::<T, ()>(Method::DELETE, path, &[], None, token)
            .await
    }

    /// Return the absolute URL for the given API path.
    ///
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Make request and return decoded body or error.
    ///
    async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        log::trace!("{} {}", method, url);

        let mut request = self.http_client.request(method, url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Check status before trying to deserialize
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        // Empty success bodies decode as JSON null
        if bytes.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice::<T>(&bytes)?)
    }
}

/// Pull a readable message out of an error response body.
///
fn error_message(bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) {
        for key in ["message", "error", "detail"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_owned();
            }
        }
    }
    let text = String::from_utf8_lossy(bytes).trim().to_owned();
    if text.is_empty() {
        String::from("no response body")
    } else {
        text
    }
}
