// ABOUTME: MCP request processing for the WHOOP server
// ABOUTME: Routes initialize, ping, tools/list, and tools/call to the tool registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::schema::{InitializeResponse, ToolCall};
use crate::constants::protocol::JSONRPC_VERSION;
use crate::jsonrpc::{error_codes, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::providers::WhoopClient;
use crate::tools::{ToolExecutionContext, ToolRegistry, ToolResult};

/// Processes MCP protocol requests against a tool registry
#[derive(Debug)]
pub struct McpServer {
    registry: ToolRegistry,
    context: ToolExecutionContext,
}

impl McpServer {
    /// Create a server with an explicit registry
    #[must_use]
    pub const fn new(registry: ToolRegistry, context: ToolExecutionContext) -> Self {
        Self { registry, context }
    }

    /// Create a server exposing every built-in WHOOP tool
    #[must_use]
    pub fn with_builtin_tools(client: Arc<WhoopClient>) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();
        Self::new(registry, ToolExecutionContext::new(client))
    }

    /// Handle one raw transport message
    ///
    /// Returns `None` for notifications.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Handle a parsed request
    ///
    /// Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            "Received MCP request"
        );

        if request.is_notification() {
            debug!("Handling notification: {}", request.method);
            return None;
        }

        let response = self.process_request(request).await;

        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(0),
            "Completed MCP request processing"
        );
        Some(response)
    }

    async fn process_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        if request.jsonrpc != JSONRPC_VERSION {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: got '{}', expected '{}'",
                    request.jsonrpc, JSONRPC_VERSION
                ),
            );
        }

        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            method => {
                debug!("Unknown MCP method: {}", method);
                JsonRpcResponse::error(
                    request.id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                )
            }
        }
    }

    fn handle_initialize(id: Option<Value>) -> JsonRpcResponse {
        debug!("Handling initialize request");
        match serde_json::to_value(InitializeResponse::whoop()) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize initialize response: {e}"),
            ),
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.registry.list_schemas() }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let call: ToolCall = match params.map(serde_json::from_value).transpose() {
            Ok(Some(call)) => call,
            Ok(None) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing params for tools/call",
                )
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid params for tools/call: {e}"),
                )
            }
        };

        let args = call
            .arguments
            .filter(|args| !args.is_null())
            .unwrap_or_else(|| json!({}));

        let result = match self.registry.execute(&call.name, args, &self.context).await {
            Ok(result) => result,
            Err(e) if e.code.is_client_error() => {
                warn!("Rejected call to tool '{}': {}", call.name, e);
                return JsonRpcResponse {
                    jsonrpc: JSONRPC_VERSION.to_owned(),
                    result: None,
                    error: Some(JsonRpcError::from(&e)),
                    id,
                };
            }
            Err(e) => {
                error!("Tool '{}' failed: {}", call.name, e);
                ToolResult::error_text(e.to_string())
            }
        };

        match serde_json::to_value(result.into_response()) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize tool response: {e}"),
            ),
        }
    }
}
