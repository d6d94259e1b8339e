// ABOUTME: Error type for external food-data provider calls
// ABOUTME: Distinguishes transport, status, parse, and timeout failures per provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Failure while talking to an external food-data provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never produced an HTTP response
    #[error("{provider} network error: {message}")]
    Network {
        /// Provider name
        provider: String,
        /// Transport error description
        message: String,
    },

    /// Provider answered with a non-success status
    #[error("{provider} API error (HTTP {status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status returned by the provider
        status_code: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("{provider} returned an unreadable response: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Decoder error
        message: String,
    },

    /// Provider did not answer within the configured budget
    #[error("{provider} did not respond within {timeout_secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Budget that was exceeded
        timeout_secs: u64,
    },
}

/// Result alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

impl ProviderError {
    /// Whether this failure was a timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Classify a `reqwest` failure for the given provider
    #[cfg(feature = "provider-errors")]
    #[must_use]
    pub fn from_reqwest(provider: &str, error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_owned(),
                timeout_secs,
            }
        } else if error.is_decode() {
            Self::ParseError {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        } else {
            Self::Network {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_timeouts_report_is_timeout() {
        let timeout = ProviderError::Timeout {
            provider: "usda".to_owned(),
            timeout_secs: 5,
        };
        assert!(timeout.is_timeout());
        assert_eq!(timeout.to_string(), "usda did not respond within 5s");

        let api = ProviderError::ApiError {
            provider: "usda".to_owned(),
            status_code: 403,
            message: "bad key".to_owned(),
        };
        assert!(!api.is_timeout());
    }
}
