// ABOUTME: HTTP client construction with connection pooling and timeout configuration
// ABOUTME: One reqwest client is built per WHOOP client and shared with its token manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::constants::limits;

/// Create a new HTTP client with custom timeout settings
///
/// `timeout` bounds each individual attempt; a refresh-then-retry sequence
/// performs up to three attempts (request, token exchange, retry).
///
/// Falls back to a default client if the configured builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .use_rustls_tls()
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

/// Create a new HTTP client with the default WHOOP API timeouts
#[must_use]
pub fn api_client() -> Client {
    create_client_with_timeout(
        Duration::from_secs(limits::DEFAULT_REQUEST_TIMEOUT_SECS),
        Duration::from_secs(limits::DEFAULT_CONNECT_TIMEOUT_SECS),
    )
}
