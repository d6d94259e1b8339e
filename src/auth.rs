// ABOUTME: JWT-based request authentication for the baby-care API
// ABOUTME: Verifies HS256 session tokens from the Authorization header or auth_token cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Sessions are issued by an external login provider that signs HS256 JWTs
//! with a secret shared with this service. Requests carry the token either as
//! `Authorization: Bearer <jwt>` or in the `auth_token` cookie; the header
//! wins when both are present.

use crate::constants::AUTH_COOKIE_NAME;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default lifetime of tokens minted by [`AuthManager::generate_token`]
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone, Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error("JWT token expired at {}", .expired_at.format("%Y-%m-%d %H:%M:%S UTC"))]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    #[error("JWT token signature is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims issued by the session provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
    /// User email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user `ID` (the token subject)
    pub user_id: String,
    /// Email claim, when the provider includes one
    pub email: Option<String>,
}

/// HS256 token verifier (and minter, for tooling and tests)
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager for the given shared secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation
    }

    /// Generate a `JWT` for `user_id`, valid for the configured lifetime
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user_id: &str, email: Option<&str>) -> AppResult<String> {
        self.generate_token_with_expiry(user_id, email, Duration::hours(self.token_expiry_hours))
    }

    /// Generate a `JWT` that expires `ttl` from now (negative for an already-expired token)
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token_with_expiry(
        &self,
        user_id: &str,
        email: Option<&str>,
        ttl: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_owned(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            email: email.map(str::to_owned),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, carries a
    /// bad signature, or is not a well-formed JWT
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| Self::convert_jwt_error(&e, token, &self.decoding_key))?;

        if data.claims.sub.trim().is_empty() {
            return Err(JwtValidationError::TokenInvalid {
                reason: "Token subject is empty".into(),
            });
        }
        Ok(data.claims)
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(
        e: &jsonwebtoken::errors::Error,
        token: &str,
        key: &DecodingKey,
    ) -> JwtValidationError {
        match e.kind() {
            ErrorKind::ExpiredSignature => {
                // Re-decode without the expiry check to report when it lapsed
                let mut validation = Self::validation();
                validation.validate_exp = false;
                let expired_at = decode::<Claims>(token, key, &validation)
                    .ok()
                    .and_then(|data| DateTime::from_timestamp(data.claims.exp, 0))
                    .unwrap_or_else(Utc::now);
                debug!("JWT token expired at {}", expired_at.to_rfc3339());
                JwtValidationError::TokenExpired { expired_at }
            }
            ErrorKind::InvalidSignature => {
                warn!("JWT token signature verification failed");
                JwtValidationError::TokenInvalid {
                    reason: "Token signature verification failed".into(),
                }
            }
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                JwtValidationError::TokenMalformed {
                    details: e.to_string(),
                }
            }
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when no token is present, `AUTH_EXPIRED` for an
    /// expired token, and `AUTH_INVALID` otherwise
    pub fn authenticate_request(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let token = extract_token(headers).ok_or_else(AppError::auth_required)?;
        let claims = self.validate_token(&token)?;
        Ok(AuthResult {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Token from `Authorization: Bearer`, falling back to the `auth_token` cookie
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .or_else(|| value.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer
        .map(str::to_owned)
        .or_else(|| get_cookie_value(headers, AUTH_COOKIE_NAME))
}

/// Value of cookie `name` from any `Cookie` header
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use babycare_core::errors::ErrorCode;
    use http::HeaderValue;

    const SECRET: &[u8] = b"unit-test-secret";

    #[test]
    fn test_token_round_trip_preserves_subject() {
        let auth = AuthManager::new(SECRET, DEFAULT_TOKEN_EXPIRY_HOURS);
        let token = auth.generate_token("parent-1", Some("p@example.com")).unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "parent-1");
        assert_eq!(claims.email.as_deref(), Some("p@example.com"));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let auth = AuthManager::new(SECRET, DEFAULT_TOKEN_EXPIRY_HOURS);
        let token = auth
            .generate_token_with_expiry("parent-1", None, Duration::hours(-1))
            .unwrap();
        let err = auth.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenExpired { .. }));
        assert_eq!(AppError::from(err).code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = AuthManager::new(b"other-secret", DEFAULT_TOKEN_EXPIRY_HOURS);
        let verifier = AuthManager::new(SECRET, DEFAULT_TOKEN_EXPIRY_HOURS);
        let token = issuer.generate_token("parent-1", None).unwrap();
        let err = verifier.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenInvalid { .. }));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let auth = AuthManager::new(SECRET, DEFAULT_TOKEN_EXPIRY_HOURS);
        let err = auth.validate_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenMalformed { .. }));
    }

    #[test]
    fn test_cookie_used_when_header_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; other=1"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer header-token"));
        assert_eq!(extract_token(&headers).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_missing_token_requires_auth() {
        let auth = AuthManager::new(SECRET, DEFAULT_TOKEN_EXPIRY_HOURS);
        let err = auth.authenticate_request(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
    }
}
