// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Builds token managers and WHOOP clients pointed at wiremock servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `whoop_mcp_server`

use std::sync::{Arc, Once};
use std::time::Duration;

use serde_json::json;
use whoop_mcp_server::oauth::{ClientCredentials, TokenManager, TokenPair};
use whoop_mcp_server::providers::WhoopClient;
use whoop_mcp_server::utils::http_client::{api_client, create_client_with_timeout};
use wiremock::{MockServer, ResponseTemplate};

/// Token endpoint path mounted on the mock server
pub const TOKEN_PATH: &str = "/oauth/oauth2/token";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// Complete client credentials
pub fn credentials() -> ClientCredentials {
    ClientCredentials::new("test-client-id", "test-client-secret")
}

/// Token manager whose token endpoint is the mock server
pub fn token_manager(
    server: &MockServer,
    access_token: &str,
    refresh_token: Option<&str>,
    credentials: ClientCredentials,
) -> Arc<TokenManager> {
    init_test_logging();
    Arc::new(TokenManager::new(
        TokenPair::new(access_token, refresh_token.map(str::to_owned)),
        credentials,
        format!("{}{TOKEN_PATH}", server.uri()),
        api_client(),
    ))
}

/// WHOOP client whose API base URL is the mock server
pub fn whoop_client(server: &MockServer, tokens: Arc<TokenManager>) -> WhoopClient {
    WhoopClient::with_token_manager(
        create_client_with_timeout(Duration::from_secs(5), Duration::from_secs(2)),
        server.uri(),
        tokens,
    )
}

/// Successful token endpoint response
pub fn token_response(access_token: &str, refresh_token: Option<&str>) -> ResponseTemplate {
    let mut body = json!({
        "access_token": access_token,
        "expires_in": 3600,
        "token_type": "bearer",
    });
    if let Some(refresh) = refresh_token {
        body["refresh_token"] = json!(refresh);
    }
    ResponseTemplate::new(200).set_body_json(body)
}
