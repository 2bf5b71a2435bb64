// ABOUTME: Pluggable MCP tool layer: trait, registry, execution context, and results.
// ABOUTME: Exposes the WHOOP client operations as agent-callable tools.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools
//!
//! Every tool implements [`McpTool`] and is registered in a [`ToolRegistry`].
//! The MCP layer looks tools up by name and hands them a shared
//! [`ToolExecutionContext`].

/// Execution context shared by all tools
pub mod context;
/// WHOOP tool implementations
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool results
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
