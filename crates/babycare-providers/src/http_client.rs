// ABOUTME: HTTP client construction with bounded timeouts for provider API calls
// ABOUTME: Also provides the JSON fetch helper that classifies provider failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::providers::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PROVIDER_TIMEOUT_SECS};
use crate::errors::{ProviderError, ProviderResult};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// Timeouts for the client shared by all providers
#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Build a pooled HTTP client with the configured timeouts
///
/// Falls back to a default client, without the configured timeouts, if the
/// builder fails (TLS backend init).
#[must_use]
pub fn build_client(config: HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(
            config.connect_timeout_secs.min(config.timeout_secs),
        ))
        .user_agent(concat!("babycare-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!(
                error = %e,
                timeout_secs = config.timeout_secs,
                "Failed to build configured HTTP client, using defaults without timeouts"
            );
            Client::new()
        })
}

/// Send `request` and decode a JSON body, mapping every failure to `ProviderError`
///
/// # Errors
///
/// Returns `ProviderError::Timeout` or `Network` when the request fails,
/// `ApiError` on a non-success status, and `ParseError` when the body is not
/// the expected JSON.
pub async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: &str,
    timeout_secs: u64,
) -> ProviderResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::ApiError {
            provider: provider.to_owned(),
            status_code: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e, timeout_secs))?;

    serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
        provider: provider.to_owned(),
        message: e.to_string(),
    })
}
