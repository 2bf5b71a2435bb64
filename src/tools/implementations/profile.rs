// ABOUTME: Profile tools returning the WHOOP user's basic profile and body measurements.
// ABOUTME: Implements get_user_profile and get_body_measurements as pretty-printed JSON.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;
use crate::formatters::format_json;
use crate::mcp::schema::JsonSchema;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Tool returning the user's name, email, and id.
pub struct GetUserProfileTool;

#[async_trait]
impl McpTool for GetUserProfileTool {
    fn name(&self) -> &'static str {
        "get_user_profile"
    }

    fn description(&self) -> &'static str {
        "Get the authenticated user's basic WHOOP profile (name, email, user id)"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty_object()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::PROFILE
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let profile = ctx.client().get_profile().await?;
        Ok(ToolResult::text(format_json(&profile)?))
    }
}

/// Tool returning height, weight, and max heart rate.
pub struct GetBodyMeasurementsTool;

#[async_trait]
impl McpTool for GetBodyMeasurementsTool {
    fn name(&self) -> &'static str {
        "get_body_measurements"
    }

    fn description(&self) -> &'static str {
        "Get the user's body measurements from WHOOP (height in meters, weight in kilograms, max heart rate)"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty_object()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::PROFILE
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let measurements = ctx.client().get_body_measurement().await?;
        Ok(ToolResult::text(format_json(&measurements)?))
    }
}
