// ABOUTME: Structured error types for WHOOP API and token endpoint operations
// ABOUTME: Classifies failures into configuration, authentication, rate limit, HTTP, and network errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use thiserror::Error;

/// Why an authentication attempt could not be completed.
///
/// Callers use this to decide whether the user must re-run the OAuth
/// authorization flow or whether the failure was transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// The API returned 401 and no refresh token was configured
    NoRefreshToken,
    /// The token endpoint rejected the refresh-token grant
    RefreshRejected {
        /// HTTP status returned by the token endpoint
        status: u16,
    },
    /// The request still returned 401 after a successful refresh
    RejectedAfterRefresh,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRefreshToken => write!(
                f,
                "invalid or expired access token and no refresh token is available; please re-authenticate"
            ),
            Self::RefreshRejected { status } => write!(
                f,
                "failed to refresh access token (token endpoint returned {status}); please re-authenticate with WHOOP"
            ),
            Self::RejectedAfterRefresh => write!(
                f,
                "access token was refreshed but WHOOP still rejected the request; please re-authenticate"
            ),
        }
    }
}

/// Failures surfaced by the token manager and the WHOOP client
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Missing credentials or tokens; never retried
    #[error("WHOOP configuration error: {details}")]
    ConfigurationError {
        /// What is missing
        details: String,
    },

    /// No viable way to authenticate the request
    #[error("WHOOP authentication failed: {reason}")]
    AuthenticationFailed {
        /// Which step of the authentication path failed
        reason: AuthFailure,
    },

    /// HTTP 429; the caller decides when to retry
    #[error("WHOOP API rate limit exceeded; please try again later")]
    RateLimitExceeded,

    /// Any other non-success status
    #[error("WHOOP API request failed with status {status_code}: {message}")]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Response body or context
        message: String,
    },

    /// DNS, connect, TLS, or timeout failure
    #[error("failed to connect to WHOOP API: {source}")]
    NetworkError {
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// A success response whose body was not the expected JSON
    #[error("WHOOP API returned an unreadable response: {reason}")]
    InvalidResponse {
        /// Parse failure details
        reason: String,
    },
}

impl ProviderError {
    /// Whether a caller could reasonably retry the same call later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded | Self::NetworkError { .. } => true,
            Self::HttpError { status_code, .. } => *status_code >= 500,
            Self::ConfigurationError { .. }
            | Self::AuthenticationFailed { .. }
            | Self::InvalidResponse { .. } => false,
        }
    }

    /// Whether the user has to re-run the OAuth authorization flow
    #[must_use]
    pub const fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
