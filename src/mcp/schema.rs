// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Defines initialize, tool listing, and tool call payloads for the WHOOP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions for the MCP messages this server exchanges, so
//! protocol payloads are never assembled from hardcoded JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::protocol;

/// Server Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON schema of the arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object` for tool arguments
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required argument names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Schema for a tool without arguments
    #[must_use]
    pub fn empty_object() -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(HashMap::new()),
            required: None,
        }
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type of the property
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description shown to the LLM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    /// Property with a type and description
    #[must_use]
    pub fn new(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: Some(description.to_owned()),
        }
    }
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Tool Response after execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Response content blocks
    pub content: Vec<Content>,
    /// Whether the tool failed
    #[serde(rename = "isError")]
    pub is_error: bool,
}

/// Content types for MCP messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text block
    #[serde(rename = "text")]
    Text {
        /// Text body
        text: String,
    },
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tools capability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// The tool list never changes at runtime
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Complete MCP Initialize Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Negotiated protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Usage hint for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// Initialize response for this server
    #[must_use]
    pub fn whoop() -> Self {
        Self {
            protocol_version: protocol::MCP_PROTOCOL_VERSION.to_owned(),
            server_info: ServerInfo {
                name: protocol::SERVER_NAME.to_owned(),
                version: protocol::SERVER_VERSION.to_owned(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            instructions: Some(
                "This server provides WHOOP fitness data tools. Use `get_recent_*` tools for the \
                 last few days, or the `*_for_date_range` tools with ISO-8601 dates and \
                 `next_token` for pagination."
                    .to_owned(),
            ),
        }
    }
}
