// ABOUTME: Model Context Protocol layer for the WHOOP server
// ABOUTME: Schema types, request processing, and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// MCP protocol schema definitions
pub mod schema;
/// Request routing and tool dispatch
pub mod server;
/// Newline-delimited stdio transport
pub mod transport;

pub use server::McpServer;
pub use transport::{run_stdio, serve};
