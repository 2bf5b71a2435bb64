// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Validates defaults, overrides, URL and timeout validation, and secret redaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use serial_test::serial;
use whoop_mcp_server::config::ServerConfig;
use whoop_mcp_server::constants::{api, env_config};
use whoop_mcp_server::errors::{AppResult, ErrorCode};
use whoop_mcp_server::providers::{ProviderError, WhoopClient};

const ALL_KEYS: [&str; 7] = [
    env_config::CLIENT_ID,
    env_config::CLIENT_SECRET,
    env_config::ACCESS_TOKEN,
    env_config::REFRESH_TOKEN,
    env_config::API_BASE_URL,
    env_config::TOKEN_URL,
    env_config::REQUEST_TIMEOUT_SECS,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

fn config_from(pairs: &[(&str, &str)]) -> AppResult<ServerConfig> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_source(|key| values.get(key).cloned())
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.api_base_url, api::API_BASE_URL);
    assert_eq!(config.token_url, api::TOKEN_URL);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(config.access_token.is_none());
    assert!(config.refresh_token.is_none());
    assert!(!config.credentials.is_complete());
}

#[test]
fn test_overrides_are_applied() {
    let config = config_from(&[
        (env_config::CLIENT_ID, "id"),
        (env_config::CLIENT_SECRET, "secret"),
        (env_config::ACCESS_TOKEN, "access"),
        (env_config::REFRESH_TOKEN, "refresh"),
        (env_config::API_BASE_URL, "http://localhost:9000/"),
        (env_config::TOKEN_URL, "http://localhost:9000/oauth/oauth2/token"),
        (env_config::REQUEST_TIMEOUT_SECS, "5"),
    ])
    .unwrap();

    assert!(config.credentials.is_complete());
    assert_eq!(config.access_token.as_deref(), Some("access"));
    assert_eq!(config.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(config.api_base_url, "http://localhost:9000");
    assert_eq!(config.token_url, "http://localhost:9000/oauth/oauth2/token");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
fn test_blank_values_count_as_absent() {
    let config = config_from(&[
        (env_config::ACCESS_TOKEN, ""),
        (env_config::REFRESH_TOKEN, "   "),
        (env_config::API_BASE_URL, ""),
    ])
    .unwrap();

    assert!(config.access_token.is_none());
    assert!(config.refresh_token.is_none());
    assert_eq!(config.api_base_url, api::API_BASE_URL);
}

#[test]
fn test_invalid_overrides_are_rejected() {
    let err = config_from(&[(env_config::API_BASE_URL, "not a url")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    let err = config_from(&[(env_config::TOKEN_URL, "ftp://example.com/token")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    for timeout in ["0", "-1", "soon"] {
        let err = config_from(&[(env_config::REQUEST_TIMEOUT_SECS, timeout)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid, "timeout {timeout}");
    }
}

#[test]
fn test_debug_and_summary_hide_secrets() {
    let config = config_from(&[
        (env_config::CLIENT_SECRET, "shh-client"),
        (env_config::ACCESS_TOKEN, "shh-access"),
        (env_config::REFRESH_TOKEN, "shh-refresh"),
    ])
    .unwrap();

    let rendered = format!("{config:?} {}", config.summary());
    assert!(!rendered.contains("shh-"));
    assert!(config.summary().contains("access token: configured"));
}

#[test]
fn test_client_requires_access_token() {
    let config = config_from(&[(env_config::REFRESH_TOKEN, "refresh")]).unwrap();

    let err = WhoopClient::new(&config).unwrap_err();
    match err {
        ProviderError::ConfigurationError { details } => {
            assert!(details.contains(env_config::ACCESS_TOKEN));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    clear_env();
    env::set_var(env_config::ACCESS_TOKEN, "env-access");
    env::set_var(env_config::API_BASE_URL, "http://127.0.0.1:8081");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.access_token.as_deref(), Some("env-access"));
    assert_eq!(config.api_base_url, "http://127.0.0.1:8081");
    assert!(WhoopClient::new(&config).is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_from_env_reports_invalid_timeout() {
    clear_env();
    env::set_var(env_config::REQUEST_TIMEOUT_SECS, "forever");

    let err = ServerConfig::from_env().unwrap_err();
    assert!(err.message.contains(env_config::REQUEST_TIMEOUT_SECS));

    clear_env();
}
