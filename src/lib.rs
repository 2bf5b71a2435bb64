// ABOUTME: Main library entry point for the WHOOP MCP server
// ABOUTME: Exposes WHOOP cycles, recovery, sleep, and workout data as MCP tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # WHOOP MCP Server
//!
//! A Model Context Protocol (MCP) server that gives AI assistants read access
//! to a WHOOP account: profile, body measurements, physiological cycles,
//! recovery, sleep, and workouts.
//!
//! ## Architecture
//!
//! - **OAuth**: [`oauth::TokenManager`] owns the access/refresh token pair and
//!   performs refresh-token grants, one at a time
//! - **Providers**: [`providers::WhoopClient`] issues authenticated requests
//!   and retries once after refreshing an expired token
//! - **Formatters**: pure functions turning raw records into readable text
//! - **Tools**: the agent-facing operations, registered in a
//!   [`tools::ToolRegistry`]
//! - **MCP**: JSON-RPC request processing over a stdio transport
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use whoop_mcp_server::config::ServerConfig;
//! use whoop_mcp_server::mcp::{run_stdio, McpServer};
//! use whoop_mcp_server::providers::WhoopClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let client = Arc::new(WhoopClient::new(&config)?);
//!     let server = McpServer::with_builtin_tools(client);
//!     run_stdio(&server).await?;
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Unified error handling
pub mod errors;

/// Record-to-text formatters
pub mod formatters;

/// JSON-RPC 2.0 types
pub mod jsonrpc;

/// Logging configuration
pub mod logging;

/// Model Context Protocol server
pub mod mcp;

/// Lenient WHOOP record models
pub mod models;

/// OAuth token management
pub mod oauth;

/// WHOOP API client and provider errors
pub mod providers;

/// MCP tools
pub mod tools;

/// HTTP utilities
pub mod utils;
