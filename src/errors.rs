// ABOUTME: Unified application error type with standard error codes
// ABOUTME: Bridges provider failures into a single AppError used by tools and the MCP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every layer above the HTTP client (tools, MCP request processing, startup)
//! speaks [`AppResult`]. Client-level failures are modelled precisely by
//! [`ProviderError`] and converted here, keeping the category visible through
//! [`ErrorCode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::providers::errors::ProviderError;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid argument
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Caller omitted a required argument
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    /// Named resource (tool, method) does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// WHOOP API returned an unexpected status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// WHOOP API could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// WHOOP rejected our credentials and no refresh path remains
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// WHOOP rate limit hit
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration value is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "The WHOOP API returned an error",
            Self::ExternalServiceUnavailable => "The WHOOP API is currently unreachable",
            Self::ExternalAuthFailed => "Authentication with WHOOP failed",
            Self::ExternalRateLimited => "WHOOP API rate limit exceeded",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error was caused by the caller's arguments
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput | Self::MissingRequiredField | Self::ResourceNotFound
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required argument
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("missing required argument '{field}'"),
        )
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration value unusable
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::ConfigurationError { .. } => ErrorCode::ConfigMissing,
            ProviderError::AuthenticationFailed { .. } => ErrorCode::ExternalAuthFailed,
            ProviderError::RateLimitExceeded => ErrorCode::ExternalRateLimited,
            ProviderError::HttpError { .. } | ProviderError::InvalidResponse { .. } => {
                ErrorCode::ExternalServiceError
            }
            ProviderError::NetworkError { .. } => ErrorCode::ExternalServiceUnavailable,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON processing failed: {error}"),
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::internal(format!("I/O failure: {error}")).with_source(error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::providers::errors::AuthFailure;

    #[test]
    fn test_provider_errors_keep_their_category() {
        let cases = [
            (
                ProviderError::ConfigurationError {
                    details: "client id missing".to_owned(),
                },
                ErrorCode::ConfigMissing,
            ),
            (
                ProviderError::AuthenticationFailed {
                    reason: AuthFailure::NoRefreshToken,
                },
                ErrorCode::ExternalAuthFailed,
            ),
            (ProviderError::RateLimitExceeded, ErrorCode::ExternalRateLimited),
            (
                ProviderError::HttpError {
                    status_code: 503,
                    message: "unavailable".to_owned(),
                },
                ErrorCode::ExternalServiceError,
            ),
        ];

        for (provider_error, expected) in cases {
            let app_error = AppError::from(provider_error);
            assert_eq!(app_error.code, expected);
        }
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::invalid_input("limit must be at least 1");
        assert_eq!(
            error.to_string(),
            "The provided input is invalid: limit must be at least 1"
        );
        assert!(error.code.is_client_error());
    }

    #[test]
    fn test_error_code_serializes_to_screaming_name() {
        let json = serde_json::to_string(&ErrorCode::ExternalRateLimited).unwrap();
        assert_eq!(json, "\"EXTERNAL_RATE_LIMITED\"");
    }
}
