// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and status handling.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use crate::config::{AuthMethod, PushConfig};
use crate::error::PushError;

/// HTTP client for relay calls.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth: AuthMethod,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(config: &PushConfig) -> Result<Self, PushError> {
        if config.base_url.trim().is_empty() {
            return Err(PushError::Config("base_url must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| PushError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: config.auth.clone(),
        })
    }

    /// Builds a JSON POST to `{base_url}/{endpoint}` with authentication headers.
    pub fn post_json<T: Serialize + ?Sized>(&self, endpoint: &str, body: &T) -> RequestBuilder {
        let url = format!("{}/{endpoint}", self.base_url);
        let mut req = self.client.post(url).json(body);

        match &self.auth {
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-success status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, PushError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        Err(PushError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
