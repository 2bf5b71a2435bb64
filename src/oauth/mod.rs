// ABOUTME: OAuth module holding client credentials and the bearer token manager
// ABOUTME: Centralizes the refresh-token grant used to keep WHOOP API access alive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth Management Module
//!
//! The interactive authorization-code flow happens out of band; this module
//! only owns the resulting token pair and exchanges the refresh token for a
//! new access token when the API reports expiry.

/// Token pair ownership and refresh-token grant
pub mod token_manager;

use std::fmt;

pub use token_manager::{TokenManager, TokenPair};

/// OAuth client credentials, immutable once the token manager is built.
///
/// Either field may be absent; that only becomes an error when a refresh is
/// attempted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientCredentials {
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
}

impl ClientCredentials {
    /// Build credentials from both values
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
        }
    }

    /// Both id and secret are present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
