// ABOUTME: Defines ToolExecutionContext which gives tools access to the shared WHOOP client.
// ABOUTME: One context is built per server and lent to every tool execution.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::providers::WhoopClient;

/// Context provided to every tool execution.
///
/// The client is `Arc`-shared so concurrent tool calls use one token
/// manager and therefore one refresh at a time.
#[derive(Debug, Clone)]
pub struct ToolExecutionContext {
    client: Arc<WhoopClient>,
}

impl ToolExecutionContext {
    /// Create a context around a WHOOP client
    #[must_use]
    pub const fn new(client: Arc<WhoopClient>) -> Self {
        Self { client }
    }

    /// The WHOOP API client
    #[must_use]
    pub fn client(&self) -> &WhoopClient {
        &self.client
    }
}
