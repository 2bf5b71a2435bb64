// ABOUTME: Integration tests for the refresh-token grant performed by TokenManager
// ABOUTME: Uses a wiremock token endpoint to verify request shape, rotation, and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{credentials, token_manager, token_response, TOKEN_PATH};
use whoop_mcp_server::oauth::ClientCredentials;
use whoop_mcp_server::providers::{AuthFailure, ProviderError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_refresh_sends_form_encoded_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .and(body_string_contains("client_id=test-client-id"))
        .and(body_string_contains("client_secret=test-client-secret"))
        .respond_with(token_response("access-2", Some("refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = token_manager(&server, "access-1", Some("refresh-1"), credentials());
    let new_token = tokens.refresh().await.unwrap();

    assert_eq!(new_token, "access-2");
    let pair = tokens.tokens().await;
    assert_eq!(pair.access_token, "access-2");
    assert_eq!(pair.refresh_token.as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn test_refresh_keeps_old_refresh_token_when_not_rotated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("access-2", None))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = token_manager(&server, "access-1", Some("refresh-1"), credentials());
    tokens.refresh().await.unwrap();

    let pair = tokens.tokens().await;
    assert_eq!(pair.access_token, "access-2");
    assert_eq!(pair.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_refresh_without_refresh_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("never", None))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = token_manager(&server, "access-1", None, credentials());
    let err = tokens.refresh().await.unwrap_err();

    assert!(matches!(err, ProviderError::ConfigurationError { .. }));
    assert_eq!(tokens.access_token().await, "access-1");
}

#[tokio::test]
async fn test_refresh_without_client_credentials_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("never", None))
        .expect(0)
        .mount(&server)
        .await;

    let partial = ClientCredentials {
        client_id: Some("test-client-id".to_owned()),
        client_secret: None,
    };
    let tokens = token_manager(&server, "access-1", Some("refresh-1"), partial);
    let err = tokens.refresh().await.unwrap_err();

    match err {
        ProviderError::ConfigurationError { details } => {
            assert!(details.contains("client id and client secret"));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_refresh_leaves_tokens_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = token_manager(&server, "access-1", Some("refresh-1"), credentials());
    let err = tokens.refresh().await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::AuthenticationFailed {
            reason: AuthFailure::RefreshRejected { status: 400 }
        }
    ));
    assert!(err.requires_reauthentication());
    let pair = tokens.tokens().await;
    assert_eq!(pair.access_token, "access-1");
    assert_eq!(pair.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_unreadable_token_response_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = token_manager(&server, "access-1", Some("refresh-1"), credentials());
    let err = tokens.refresh().await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidResponse { .. }));
    assert_eq!(tokens.access_token().await, "access-1");
}

#[tokio::test]
async fn test_refresh_if_stale_skips_exchange_when_token_already_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("never", None))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = token_manager(&server, "fresh-token", Some("refresh-1"), credentials());
    let current = tokens.refresh_if_stale("expired-token").await.unwrap();

    assert_eq!(current, "fresh-token");
}

#[tokio::test]
async fn test_token_debug_output_is_redacted() {
    let server = MockServer::start().await;
    let tokens = token_manager(&server, "secret-access", Some("secret-refresh"), credentials());

    let rendered = format!("{:?} {:?}", tokens, tokens.tokens().await);
    assert!(!rendered.contains("secret-access"));
    assert!(!rendered.contains("secret-refresh"));
    assert!(!rendered.contains("test-client-secret"));
}
