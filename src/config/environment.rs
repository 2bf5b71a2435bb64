// ABOUTME: Environment-based server configuration for WHOOP credentials, tokens, and endpoints
// ABOUTME: Builds the ServerConfig struct once at process start with validation of URLs and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use crate::constants::{api, env_config, limits};
use crate::errors::{AppError, AppResult};
use crate::oauth::ClientCredentials;

/// Server configuration assembled from the process environment
#[derive(Clone)]
pub struct ServerConfig {
    /// OAuth client credentials used for refresh-token grants
    pub credentials: ClientCredentials,
    /// Access token at startup
    pub access_token: Option<String>,
    /// Refresh token at startup
    pub refresh_token: Option<String>,
    /// Data API origin, without trailing slash
    pub api_base_url: String,
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Per-attempt HTTP timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            credentials: ClientCredentials::default(),
            access_token: None,
            refresh_token: None,
            api_base_url: api::API_BASE_URL.to_owned(),
            token_url: api::TOKEN_URL.to_owned(),
            request_timeout: Duration::from_secs(limits::DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(limits::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a URL override does not parse or the
    /// timeout override is not a positive integer
    pub fn from_env() -> AppResult<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as absent.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`]
    pub fn from_source<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base_url = read(env_config::API_BASE_URL)
            .map(|raw| validate_url(env_config::API_BASE_URL, &raw))
            .transpose()?
            .unwrap_or_else(|| api::API_BASE_URL.to_owned());

        let token_url = read(env_config::TOKEN_URL)
            .map(|raw| validate_url(env_config::TOKEN_URL, &raw))
            .transpose()?
            .unwrap_or_else(|| api::TOKEN_URL.to_owned());

        let request_timeout = read(env_config::REQUEST_TIMEOUT_SECS)
            .map(|raw| parse_timeout(&raw))
            .transpose()?
            .unwrap_or_else(|| Duration::from_secs(limits::DEFAULT_REQUEST_TIMEOUT_SECS));

        let config = Self {
            credentials: ClientCredentials {
                client_id: read(env_config::CLIENT_ID),
                client_secret: read(env_config::CLIENT_SECRET),
            },
            access_token: read(env_config::ACCESS_TOKEN),
            refresh_token: read(env_config::REFRESH_TOKEN),
            api_base_url,
            token_url,
            request_timeout,
            connect_timeout: Duration::from_secs(limits::DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        config.log_diagnostics();
        Ok(config)
    }

    /// Secret-free summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "WHOOP API: {} | token endpoint: {} | access token: {} | refresh token: {} | client credentials: {} | timeout: {}s",
            self.api_base_url,
            self.token_url,
            presence(self.access_token.as_ref()),
            presence(self.refresh_token.as_ref()),
            if self.credentials.is_complete() { "configured" } else { "incomplete" },
            self.request_timeout.as_secs(),
        )
    }

    fn log_diagnostics(&self) {
        if self.access_token.is_none() {
            warn!("{} is not set; WHOOP tools will fail until a token is provided", env_config::ACCESS_TOKEN);
        }
        if self.refresh_token.is_some() && !self.credentials.is_complete() {
            warn!("Refresh token configured without client id/secret; automatic token refresh is disabled");
        }
        info!("Configuration loaded: {}", self.summary());
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("credentials", &self.credentials)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

const fn presence(value: Option<&String>) -> &'static str {
    if value.is_some() {
        "configured"
    } else {
        "not configured"
    }
}

/// Accept http(s) URLs only and strip the trailing slash
fn validate_url(key: &str, raw: &str) -> AppResult<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| AppError::config_invalid(format!("{key} is not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::config_invalid(format!(
                "{key} uses unsupported scheme '{scheme}', expected http or https"
            )))
        }
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(AppError::config_invalid(format!(
            "{key} must not contain a query string or fragment"
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}

fn parse_timeout(raw: &str) -> AppResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::config_invalid(format!(
            "{} must be a positive number of seconds, got '{raw}'",
            env_config::REQUEST_TIMEOUT_SECS
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_strips_trailing_slash() {
        let url = validate_url("TEST", "http://127.0.0.1:8080/").unwrap();
        assert_eq!(url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        let err = validate_url("TEST", "ftp://example.com").unwrap_err();
        assert!(err.message.contains("unsupported scheme"));
    }

    #[test]
    fn test_parse_timeout_rejects_zero() {
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("abc").is_err());
        assert_eq!(parse_timeout(" 45 ").unwrap(), Duration::from_secs(45));
    }
}
