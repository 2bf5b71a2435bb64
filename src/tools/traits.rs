// ABOUTME: Defines the McpTool trait and ToolCapabilities for WHOOP tools.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! All tools implement [`McpTool`], which provides:
//! - Tool metadata (name, description, input schema)
//! - Capability flags for discovery and logging
//! - Async execution with context

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for discovery and logging.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool calls the WHOOP API
        const REQUIRES_PROVIDER = 0b0000_0001;
        /// Tool reads data
        const READS_DATA = 0b0000_0010;
        /// Tool accepts a pagination cursor
        const PAGINATED = 0b0000_0100;
        /// Tool handles sleep/recovery data
        const SLEEP_RECOVERY = 0b0000_1000;
        /// Tool handles strain and workout data
        const TRAINING = 0b0001_0000;
        /// Tool returns user profile data
        const PROFILE = 0b0010_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool accepts a pagination cursor
    #[must_use]
    pub const fn is_paginated(self) -> bool {
        self.contains(Self::PAGINATED)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = self
            .iter_names()
            .map(|(name, _)| name)
            .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ").to_lowercase()
        }
    }
}

/// The trait that all MCP tools implement.
///
/// Tools are `Send + Sync` so the registry can share them across tasks, and
/// `name()` returns `&'static str` for allocation-free lookup.
///
/// A tool returns `Err` only for caller mistakes (bad arguments) or failures
/// it cannot describe as a result; the MCP layer turns non-client errors into
/// `isError` tool results.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `get_recent_sleep`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned by `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for invalid arguments or WHOOP API failures
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
