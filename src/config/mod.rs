// ABOUTME: Configuration management module for server settings loaded at startup
// ABOUTME: Exposes the explicit ServerConfig passed by reference into the WHOOP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the WHOOP MCP Server
//!
//! All process configuration is read once, at startup, into a
//! [`ServerConfig`]. Nothing below this module reads the environment.

/// Environment-driven server configuration
pub mod environment;

pub use environment::ServerConfig;
