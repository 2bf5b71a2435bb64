// ABOUTME: Authenticated WHOOP API client with transparent access-token refresh
// ABOUTME: Retries a request exactly once after a 401 when a refresh token is available
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # WHOOP API Client
//!
//! Every call goes through [`WhoopClient::request`], which runs this state
//! machine:
//!
//! ```text
//! attempt ─┬─ 2xx ─────────────────────────────────► Success
//!          ├─ 401, no refresh token ───────────────► AuthenticationFailed
//!          ├─ 401, refresh token ─► refresh ─┬─ ok ─► retry ─┬─ 2xx ─► Success
//!          │                                 │              └─ err ─► Failure
//!          │                                 └─ err ────────────────► Failure
//!          ├─ 429 ─────────────────────────────────► RateLimitExceeded
//!          └─ other ───────────────────────────────► HttpError
//! ```
//!
//! There is no loop: at most one refresh and one retry per call. The bearer
//! header is rebuilt from the token manager before each attempt, so the retry
//! always carries the refreshed token.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::errors::{AuthFailure, ProviderError, ProviderResult};
use crate::config::ServerConfig;
use crate::constants::{api, limits};
use crate::oauth::{TokenManager, TokenPair};
use crate::utils::http_client::create_client_with_timeout;

/// Longest response body excerpt carried in an `HttpError`
const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP verbs supported by the WHOOP API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Query parameters are sent in the URL
    Get,
    /// Query parameters are sent as a JSON body
    Post,
}

/// Query for the paginated collection endpoints.
///
/// Absent `start` / `end` / `next_token` are left out of the request rather
/// than sent as empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQuery {
    /// Maximum number of records to return
    pub limit: u32,
    /// ISO-8601 lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// ISO-8601 upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Cursor returned as `next_token` by a previous page
    #[serde(rename = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl Default for DataQuery {
    fn default() -> Self {
        Self {
            limit: limits::DEFAULT_RECORD_LIMIT,
            start: None,
            end: None,
            next_token: None,
        }
    }
}

impl DataQuery {
    /// Query with the given limit and no time bounds
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Set the time range; empty strings count as absent
    #[must_use]
    pub fn range(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start = start.filter(|s| !s.is_empty());
        self.end = end.filter(|s| !s.is_empty());
        self
    }

    /// Continue from a pagination cursor
    #[must_use]
    pub fn after(mut self, next_token: Option<String>) -> Self {
        self.next_token = next_token.filter(|s| !s.is_empty());
        self
    }
}

/// Client for the WHOOP developer API (v2)
#[derive(Debug, Clone)]
pub struct WhoopClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenManager>,
}

impl WhoopClient {
    /// Build a client from the startup configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when no access token is configured
    pub fn new(config: &ServerConfig) -> ProviderResult<Self> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ProviderError::ConfigurationError {
                details: "WHOOP_ACCESS_TOKEN is not set; please set it to your WHOOP API access token"
                    .to_owned(),
            })?;

        let http = create_client_with_timeout(config.request_timeout, config.connect_timeout);
        let tokens = TokenManager::new(
            TokenPair::new(access_token, config.refresh_token.clone()),
            config.credentials.clone(),
            config.token_url.clone(),
            http.clone(),
        );

        Ok(Self::with_token_manager(
            http,
            config.api_base_url.clone(),
            Arc::new(tokens),
        ))
    }

    /// Build a client around an existing token manager
    #[must_use]
    pub fn with_token_manager(
        http: Client,
        base_url: impl Into<String>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            tokens,
        }
    }

    /// The token manager holding this client's credentials
    #[must_use]
    pub const fn token_manager(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Issue an authenticated request and return the parsed JSON body.
    ///
    /// On 401 with a refresh token available, refreshes once and retries the
    /// identical request once. The retry's outcome is classified like any
    /// other response, except that a second 401 becomes
    /// `AuthenticationFailed` with `RejectedAfterRefresh` instead of an
    /// `HttpError`; it is the only status reclassified.
    ///
    /// # Errors
    ///
    /// - `AuthenticationFailed` on 401 without a refresh token, when the
    ///   refresh is rejected, or when the retry is still unauthorized
    /// - `ConfigurationError` when a refresh is needed but client
    ///   credentials are missing
    /// - `RateLimitExceeded` on 429
    /// - `HttpError` on any other non-success status
    /// - `NetworkError` on transport failure
    /// - `InvalidResponse` when a success body is not JSON
    pub async fn request<Q>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Q>,
    ) -> ProviderResult<Value>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("Starting WHOOP API request: {method:?} {url}");

        let access_token = self.tokens.access_token().await;
        let response = self.send(method, &url, query, &access_token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::read_json(response, false).await;
        }

        if !self.tokens.has_refresh_token().await {
            error!("Authentication failed and no refresh token available");
            return Err(ProviderError::AuthenticationFailed {
                reason: AuthFailure::NoRefreshToken,
            });
        }

        info!("Access token expired, attempting refresh");
        self.tokens.refresh_if_stale(&access_token).await?;

        let refreshed_token = self.tokens.access_token().await;
        let retry = self.send(method, &url, query, &refreshed_token).await?;
        Self::read_json(retry, true).await
    }

    async fn send<Q>(
        &self,
        method: HttpMethod,
        url: &str,
        query: Option<&Q>,
        access_token: &str,
    ) -> ProviderResult<Response>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let builder = match method {
            HttpMethod::Get => {
                let builder = self.http.get(url);
                match query {
                    Some(q) => builder.query(q),
                    None => builder,
                }
            }
            HttpMethod::Post => {
                let builder = self.http.post(url);
                match query {
                    Some(q) => builder.json(q),
                    None => builder,
                }
            }
        };

        builder
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Network error occurred: {e}");
                ProviderError::NetworkError { source: e }
            })
    }

    async fn read_json(response: Response, after_refresh: bool) -> ProviderResult<Value> {
        let status = response.status();
        debug!("WHOOP API response status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError { source: e })?;

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body, after_refresh));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse {
            reason: format!("invalid JSON: {e}"),
        })
    }

    fn classify_failure(status: StatusCode, body: &str, after_refresh: bool) -> ProviderError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("WHOOP API rate limit exceeded");
                ProviderError::RateLimitExceeded
            }
            StatusCode::UNAUTHORIZED if after_refresh => {
                error!("WHOOP rejected the refreshed access token");
                ProviderError::AuthenticationFailed {
                    reason: AuthFailure::RejectedAfterRefresh,
                }
            }
            _ => {
                error!(
                    "WHOOP API request failed - status: {status}, body_length: {} bytes",
                    body.len()
                );
                ProviderError::HttpError {
                    status_code: status.as_u16(),
                    message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                }
            }
        }
    }

    /// Basic profile of the authenticated user (single object)
    ///
    /// # Errors
    ///
    /// See [`WhoopClient::request`]
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_profile"))]
    pub async fn get_profile(&self) -> ProviderResult<Value> {
        self.request::<DataQuery>(HttpMethod::Get, api::PROFILE_PATH, None)
            .await
    }

    /// Height, weight, and max heart rate (single object)
    ///
    /// # Errors
    ///
    /// See [`WhoopClient::request`]
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_body_measurement"))]
    pub async fn get_body_measurement(&self) -> ProviderResult<Value> {
        self.request::<DataQuery>(HttpMethod::Get, api::BODY_MEASUREMENT_PATH, None)
            .await
    }

    /// Physiological cycles (paginated envelope)
    ///
    /// # Errors
    ///
    /// See [`WhoopClient::request`]
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_cycles", limit = query.limit))]
    pub async fn get_cycles(&self, query: &DataQuery) -> ProviderResult<Value> {
        self.request(HttpMethod::Get, api::CYCLE_PATH, Some(query))
            .await
    }

    /// Recovery scores (paginated envelope)
    ///
    /// # Errors
    ///
    /// See [`WhoopClient::request`]
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_recovery", limit = query.limit))]
    pub async fn get_recovery(&self, query: &DataQuery) -> ProviderResult<Value> {
        self.request(HttpMethod::Get, api::RECOVERY_PATH, Some(query))
            .await
    }

    /// Sleep activities (paginated envelope)
    ///
    /// # Errors
    ///
    /// See [`WhoopClient::request`]
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_sleep", limit = query.limit))]
    pub async fn get_sleep(&self, query: &DataQuery) -> ProviderResult<Value> {
        self.request(HttpMethod::Get, api::SLEEP_PATH, Some(query))
            .await
    }

    /// Workout activities (paginated envelope)
    ///
    /// # Errors
    ///
    /// See [`WhoopClient::request`]
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_workouts", limit = query.limit))]
    pub async fn get_workouts(&self, query: &DataQuery) -> ProviderResult<Value> {
        self.request(HttpMethod::Get, api::WORKOUT_PATH, Some(query))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_data_query_omits_absent_bounds() {
        let query = DataQuery::with_limit(10).range(None, Some(String::new()));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({ "limit": 10 }));
    }

    #[test]
    fn test_data_query_serializes_cursor_as_next_token() {
        let query = DataQuery::default()
            .range(Some("2024-01-01T00:00:00.000Z".to_owned()), None)
            .after(Some("abc".to_owned()));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["limit"], 25);
        assert_eq!(json["start"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["nextToken"], "abc");
        assert!(json.get("end").is_none());
    }

    #[test]
    fn test_classify_failure_maps_status_codes() {
        assert!(matches!(
            WhoopClient::classify_failure(StatusCode::TOO_MANY_REQUESTS, "", false),
            ProviderError::RateLimitExceeded
        ));
        assert!(matches!(
            WhoopClient::classify_failure(StatusCode::UNAUTHORIZED, "", true),
            ProviderError::AuthenticationFailed {
                reason: AuthFailure::RejectedAfterRefresh
            }
        ));
        let long_body = "x".repeat(2_000);
        match WhoopClient::classify_failure(StatusCode::NOT_FOUND, &long_body, false) {
            ProviderError::HttpError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 404);
                assert_eq!(message.len(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
