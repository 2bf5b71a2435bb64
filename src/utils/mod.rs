// ABOUTME: Utility module for shared helpers used across the server
// ABOUTME: Contains HTTP client construction with timeout configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client construction with connection pooling and timeouts
pub mod http_client;
