// ABOUTME: System-wide constants and defaults for the WHOOP MCP server
// ABOUTME: Contains API endpoints, query limits, protocol constants, and formatter sentinels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Application constants grouped by domain. Values that operators may need to
//! override (base URLs, timeouts) are read by [`crate::config`] and only
//! default to the values here.

/// Protocol-related constants
pub mod protocol {
    /// MCP protocol version advertised in `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

    /// `JSON-RPC` version (standard, not configurable)
    pub const JSONRPC_VERSION: &str = "2.0";

    /// Server name reported to MCP clients
    pub const SERVER_NAME: &str = "whoop-mcp";

    /// Server version reported to MCP clients
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// WHOOP API endpoints
pub mod api {
    /// Production API host
    pub const API_BASE_URL: &str = "https://api.prod.whoop.com";

    /// OAuth2 token endpoint (refresh-token grant)
    pub const TOKEN_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/token";

    /// Basic user profile (single object)
    pub const PROFILE_PATH: &str = "/developer/v2/user/profile/basic";

    /// Body measurements: height, weight, max heart rate (single object)
    pub const BODY_MEASUREMENT_PATH: &str = "/developer/v2/user/measurement/body";

    /// Physiological cycles (paginated)
    pub const CYCLE_PATH: &str = "/developer/v2/cycle";

    /// Recovery scores (paginated)
    pub const RECOVERY_PATH: &str = "/developer/v2/recovery";

    /// Sleep activities (paginated)
    pub const SLEEP_PATH: &str = "/developer/v2/activity/sleep";

    /// Workout activities (paginated)
    pub const WORKOUT_PATH: &str = "/developer/v2/activity/workout";
}

/// Query limits and defaults
pub mod limits {
    /// Records per page when the caller does not specify a limit
    pub const DEFAULT_RECORD_LIMIT: u32 = 25;

    /// Largest page the API accepts; tool arguments are clamped to this
    pub const MAX_RECORD_LIMIT: u32 = 50;

    /// Look-back window for the `get_recent_*` tools
    pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

    /// Per-attempt HTTP timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// TCP connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names read by [`crate::config::ServerConfig::from_env`]
pub mod env_config {
    /// OAuth client id
    pub const CLIENT_ID: &str = "WHOOP_CLIENT_ID";
    /// OAuth client secret
    pub const CLIENT_SECRET: &str = "WHOOP_CLIENT_SECRET";
    /// Current access token
    pub const ACCESS_TOKEN: &str = "WHOOP_ACCESS_TOKEN";
    /// Current refresh token
    pub const REFRESH_TOKEN: &str = "WHOOP_REFRESH_TOKEN";
    /// Data API base URL override
    pub const API_BASE_URL: &str = "WHOOP_API_BASE_URL";
    /// Token endpoint override
    pub const TOKEN_URL: &str = "WHOOP_TOKEN_URL";
    /// Per-attempt request timeout override, in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "WHOOP_REQUEST_TIMEOUT_SECS";
}

/// Fixed strings emitted by the formatters
pub mod formatting {
    /// Output for a list envelope with no records
    pub const NO_RECORDS: &str = "No records found.";

    /// Trailer appended when the envelope carries a `next_token` key
    pub const MORE_RECORDS_NOTICE: &str = "(More records available - use pagination)";

    /// Header value for a cycle that has not ended yet
    pub const CYCLE_IN_PROGRESS: &str = "In Progress";

    /// Separator between formatted records
    pub const RECORD_SEPARATOR: &str = "\n\n";
}

/// Timestamp rendering
pub mod time_format {
    /// ISO-8601 with millisecond precision in UTC, as the WHOOP API expects
    pub const ISO_8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
}
