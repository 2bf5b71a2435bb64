// ABOUTME: WHOOP data provider: authenticated API client and its error taxonomy
// ABOUTME: Exposes WhoopClient for cycles, recovery, sleep, workouts, and profile data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Provider error taxonomy (configuration, authentication, rate limit, HTTP, network)
pub mod errors;

/// Authenticated WHOOP API client with transparent token refresh
pub mod whoop_client;

pub use errors::{AuthFailure, ProviderError, ProviderResult};
pub use whoop_client::{DataQuery, HttpMethod, WhoopClient};
