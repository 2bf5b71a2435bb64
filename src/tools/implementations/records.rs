// ABOUTME: Cycle, recovery, sleep, and workout tools over recent windows and explicit date ranges.
// ABOUTME: Validates arguments, queries the WHOOP client, and formats records as readable text.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Tools
//!
//! Two tool shapes, each instantiated for every [`RecordKind`]:
//! - [`RecentRecordsTool`] - `get_recent_{kind}` over the last `days` days
//! - [`DateRangeTool`] - `get_{kind}_for_date_range` with explicit bounds,
//!   a page size, and a pagination cursor

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;
use tracing::debug;

use crate::constants::{limits, time_format};
use crate::errors::{AppError, AppResult};
use crate::formatters::{format_cycle, format_recovery, format_response, format_sleep, format_workout};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::providers::{DataQuery, ProviderResult, WhoopClient};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// WHOOP collection served by a record tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Physiological cycles
    Cycles,
    /// Recovery scores
    Recovery,
    /// Sleep activities
    Sleep,
    /// Workout activities
    Workouts,
}

impl RecordKind {
    /// Every kind, in registration order
    pub const ALL: [Self; 4] = [Self::Cycles, Self::Recovery, Self::Sleep, Self::Workouts];

    /// Noun used in tool names and descriptions
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cycles => "cycles",
            Self::Recovery => "recovery",
            Self::Sleep => "sleep",
            Self::Workouts => "workouts",
        }
    }

    const fn capabilities(self) -> ToolCapabilities {
        let domain = match self {
            Self::Cycles | Self::Workouts => ToolCapabilities::TRAINING,
            Self::Recovery | Self::Sleep => ToolCapabilities::SLEEP_RECOVERY,
        };
        ToolCapabilities::REQUIRES_PROVIDER
            .union(ToolCapabilities::READS_DATA)
            .union(domain)
    }

    async fn fetch(self, client: &WhoopClient, query: &DataQuery) -> ProviderResult<Value> {
        match self {
            Self::Cycles => client.get_cycles(query).await,
            Self::Recovery => client.get_recovery(query).await,
            Self::Sleep => client.get_sleep(query).await,
            Self::Workouts => client.get_workouts(query).await,
        }
    }

    fn format(self, data: &Value) -> String {
        match self {
            Self::Cycles => format_response(data, format_cycle),
            Self::Recovery => format_response(data, format_recovery),
            Self::Sleep => format_response(data, format_sleep),
            Self::Workouts => format_response(data, format_workout),
        }
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

fn optional_integer(args: &Value, field: &str) -> AppResult<Option<i64>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| AppError::invalid_input(format!("'{field}' must be an integer"))),
    }
}

fn optional_string(args: &Value, field: &str) -> AppResult<Option<String>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::invalid_input(format!(
            "'{field}' must be a string"
        ))),
    }
}

/// Look-back window in days, default 7
///
/// # Errors
///
/// Returns an invalid-input error if `days` is not an integer of at least 1
pub fn parse_days(args: &Value) -> AppResult<i64> {
    let days = optional_integer(args, "days")?.unwrap_or(limits::DEFAULT_LOOKBACK_DAYS);
    if days < 1 {
        return Err(AppError::invalid_input(format!(
            "'days' must be at least 1, got {days}"
        )));
    }
    Ok(days)
}

/// Page size, default 25, clamped to the API maximum of 50
///
/// # Errors
///
/// Returns an invalid-input error if `limit` is not an integer of at least 1
pub fn clamp_limit(args: &Value) -> AppResult<u32> {
    let Some(limit) = optional_integer(args, "limit")? else {
        return Ok(limits::DEFAULT_RECORD_LIMIT);
    };
    if limit < 1 {
        return Err(AppError::invalid_input(format!(
            "'limit' must be at least 1, got {limit}"
        )));
    }
    Ok(u32::try_from(limit).map_or(limits::MAX_RECORD_LIMIT, |l| {
        l.min(limits::MAX_RECORD_LIMIT)
    }))
}

/// A required ISO-8601 timestamp, returned verbatim once it parses
fn required_timestamp(args: &Value, field: &str) -> AppResult<String> {
    let raw = optional_string(args, field)?.ok_or_else(|| AppError::missing_field(field))?;
    DateTime::parse_from_rfc3339(&raw).map_err(|e| {
        AppError::invalid_input(format!(
            "'{field}' must be an ISO-8601 timestamp such as 2024-01-01T00:00:00.000Z: {e}"
        ))
    })?;
    Ok(raw)
}

/// `[now - days, now]` rendered as `YYYY-MM-DDTHH:MM:SS.mmmZ`
///
/// # Errors
///
/// Returns an invalid-input error if the window reaches outside the
/// representable date range
pub fn recent_window(now: DateTime<Utc>, days: i64) -> AppResult<(String, String)> {
    let start = TimeDelta::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| AppError::invalid_input(format!("'days' is too large: {days}")))?;

    Ok((
        start.format(time_format::ISO_8601_MILLIS).to_string(),
        now.format(time_format::ISO_8601_MILLIS).to_string(),
    ))
}

// ============================================================================
// RecentRecordsTool
// ============================================================================

/// `get_recent_{kind}`: records from the last N days.
pub struct RecentRecordsTool {
    kind: RecordKind,
}

impl RecentRecordsTool {
    /// Tool for one record kind
    #[must_use]
    pub const fn new(kind: RecordKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl McpTool for RecentRecordsTool {
    fn name(&self) -> &'static str {
        match self.kind {
            RecordKind::Cycles => "get_recent_cycles",
            RecordKind::Recovery => "get_recent_recovery",
            RecordKind::Sleep => "get_recent_sleep",
            RecordKind::Workouts => "get_recent_workouts",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            RecordKind::Cycles => {
                "Get physiological cycles (day strain, energy, heart rate) from the last N days"
            }
            RecordKind::Recovery => {
                "Get recovery scores (recovery %, resting heart rate, HRV, SpO2, skin temperature) from the last N days"
            }
            RecordKind::Sleep => {
                "Get sleep and nap records (performance, efficiency, sleep stages) from the last N days"
            }
            RecordKind::Workouts => {
                "Get workouts (sport, strain, heart rate, energy, distance) from the last N days"
            }
        }
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "days".to_owned(),
            PropertySchema::new("integer", "Number of days to look back (default 7)"),
        );
        JsonSchema {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: None,
        }
    }

    fn capabilities(&self) -> ToolCapabilities {
        self.kind.capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let days = parse_days(&args)?;
        let (start, end) = recent_window(Utc::now(), days)?;
        debug!(kind = self.kind.label(), days, %start, %end, "Fetching recent records");

        let query = DataQuery::default().range(Some(start), Some(end));
        let data = self.kind.fetch(ctx.client(), &query).await?;
        Ok(ToolResult::text(self.kind.format(&data)))
    }
}

// ============================================================================
// DateRangeTool
// ============================================================================

/// `get_{kind}_for_date_range`: records between two timestamps.
pub struct DateRangeTool {
    kind: RecordKind,
}

impl DateRangeTool {
    /// Tool for one record kind
    #[must_use]
    pub const fn new(kind: RecordKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl McpTool for DateRangeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            RecordKind::Cycles => "get_cycles_for_date_range",
            RecordKind::Recovery => "get_recovery_for_date_range",
            RecordKind::Sleep => "get_sleep_for_date_range",
            RecordKind::Workouts => "get_workouts_for_date_range",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            RecordKind::Cycles => "Get physiological cycles between two ISO-8601 timestamps",
            RecordKind::Recovery => "Get recovery scores between two ISO-8601 timestamps",
            RecordKind::Sleep => "Get sleep and nap records between two ISO-8601 timestamps",
            RecordKind::Workouts => "Get workouts between two ISO-8601 timestamps",
        }
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "start_date".to_owned(),
            PropertySchema::new(
                "string",
                "Start of the range, ISO-8601 (e.g. 2024-01-01T00:00:00.000Z)",
            ),
        );
        properties.insert(
            "end_date".to_owned(),
            PropertySchema::new(
                "string",
                "End of the range, ISO-8601 (e.g. 2024-01-31T23:59:59.999Z)",
            ),
        );
        properties.insert(
            "limit".to_owned(),
            PropertySchema::new(
                "integer",
                "Maximum number of records to return (default 25, max 50)",
            ),
        );
        properties.insert(
            "next_token".to_owned(),
            PropertySchema::new(
                "string",
                "Pagination cursor from a previous response's next_token",
            ),
        );
        JsonSchema {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: Some(vec!["start_date".to_owned(), "end_date".to_owned()]),
        }
    }

    fn capabilities(&self) -> ToolCapabilities {
        self.kind.capabilities() | ToolCapabilities::PAGINATED
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let start = required_timestamp(&args, "start_date")?;
        let end = required_timestamp(&args, "end_date")?;
        let limit = clamp_limit(&args)?;
        let next_token = optional_string(&args, "next_token")?;

        let query = DataQuery::with_limit(limit)
            .range(Some(start), Some(end))
            .after(next_token);
        let data = self.kind.fetch(ctx.client(), &query).await?;
        Ok(ToolResult::text(self.kind.format(&data)))
    }
}
