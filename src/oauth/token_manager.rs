// ABOUTME: Owns the current WHOOP access/refresh token pair and performs refresh-token grants
// ABOUTME: Serializes concurrent refreshes so simultaneous 401s trigger a single token exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument};

use super::ClientCredentials;
use crate::providers::errors::{AuthFailure, ProviderError, ProviderResult};

/// Current bearer credentials.
///
/// Replaced wholesale on every successful refresh; never partially updated.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Bearer token sent on every API request
    pub access_token: String,
    /// Long-lived token traded for a new access token
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Build a token pair
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Token endpoint response for the refresh-token grant
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

/// Single source of truth for the bearer token used by [`crate::providers::WhoopClient`].
///
/// Shared by reference (`Arc`) with the client. Reads are cheap; refreshes
/// go through `refresh_gate` so at most one refresh-token exchange is in
/// flight at a time.
pub struct TokenManager {
    tokens: RwLock<TokenPair>,
    credentials: ClientCredentials,
    token_url: String,
    http: Client,
    refresh_gate: Mutex<()>,
}

impl TokenManager {
    /// Create a token manager
    #[must_use]
    pub fn new(
        tokens: TokenPair,
        credentials: ClientCredentials,
        token_url: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            tokens: RwLock::new(tokens),
            credentials,
            token_url: token_url.into(),
            http,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Current access token
    pub async fn access_token(&self) -> String {
        self.tokens.read().await.access_token.clone()
    }

    /// Whether a refresh token is held
    pub async fn has_refresh_token(&self) -> bool {
        self.tokens.read().await.refresh_token.is_some()
    }

    /// Snapshot of the current token pair
    pub async fn tokens(&self) -> TokenPair {
        self.tokens.read().await.clone()
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Returns the new access token. The stored refresh token is replaced only
    /// when the token endpoint returns a new one.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` if no refresh token, client id, or client secret
    ///   is available; no request is sent in that case
    /// - `AuthenticationFailed` if the token endpoint returns a non-2xx status
    /// - `NetworkError` / `InvalidResponse` for transport or body failures
    pub async fn refresh(&self) -> ProviderResult<String> {
        let _gate = self.refresh_gate.lock().await;
        self.exchange_refresh_token().await
    }

    /// Refresh unless another caller already replaced `rejected_token`.
    ///
    /// Used by the client after a 401: when several requests fail with the
    /// same expired token, the first one refreshes and the rest pick up the
    /// new token without a second exchange.
    ///
    /// # Errors
    ///
    /// Same as [`TokenManager::refresh`]
    pub async fn refresh_if_stale(&self, rejected_token: &str) -> ProviderResult<String> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.access_token().await;
        if current != rejected_token {
            debug!("Access token already refreshed by a concurrent request");
            return Ok(current);
        }

        self.exchange_refresh_token().await
    }

    #[instrument(skip(self), fields(provider = "whoop", api_call = "refresh_token"))]
    async fn exchange_refresh_token(&self) -> ProviderResult<String> {
        let refresh_token = self
            .tokens
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or_else(|| ProviderError::ConfigurationError {
                details: "no refresh token available; please re-authenticate".to_owned(),
            })?;

        let (Some(client_id), Some(client_secret)) = (
            self.credentials.client_id.as_deref(),
            self.credentials.client_secret.as_deref(),
        ) else {
            return Err(ProviderError::ConfigurationError {
                details: "client id and client secret must be set to refresh tokens".to_owned(),
            });
        };

        info!("Refreshing WHOOP access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Token refresh request could not be sent: {e}");
                ProviderError::NetworkError { source: e }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Failed to refresh WHOOP access token - status: {status}");
            return Err(ProviderError::AuthenticationFailed {
                reason: AuthFailure::RefreshRejected {
                    status: status.as_u16(),
                },
            });
        }

        let token_response: TokenResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    reason: format!("token refresh response: {e}"),
                })?;

        let mut tokens = self.tokens.write().await;
        let rotated = token_response
            .refresh_token
            .filter(|token| !token.is_empty());
        let refresh_rotated = rotated.is_some();

        *tokens = TokenPair {
            access_token: token_response.access_token,
            refresh_token: rotated.or(Some(refresh_token)),
        };

        info!(
            expires_in = ?token_response.expires_in,
            refresh_rotated,
            "WHOOP access token refreshed successfully"
        );
        Ok(tokens.access_token.clone())
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}
