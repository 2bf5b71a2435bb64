// ABOUTME: Defines ToolResult for tool execution responses.
// ABOUTME: Converts results into the MCP tools/call content shape.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Result Types
//!
//! Bridges tool implementations with the MCP `tools/call` response format:
//!
//! ```json
//! { "content": [{ "type": "text", "text": "..." }], "isError": false }
//! ```

use serde_json::Value;

use crate::mcp::schema::{Content, ToolResponse};

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value; strings are sent as-is, anything else as JSON text
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Create a text result (convenience method)
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::ok(Value::String(message.into()))
    }

    /// Create an error result carrying a message
    #[must_use]
    pub fn error_text(message: impl Into<String>) -> Self {
        Self::error(Value::String(message.into()))
    }

    /// Text body sent to the client
    #[must_use]
    pub fn text_content(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    /// MCP `tools/call` result
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        ToolResponse {
            content: vec![Content::Text {
                text: self.text_content(),
            }],
            is_error: self.is_error,
        }
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_result_maps_to_mcp_content() {
        let response = ToolResult::text("Cycle: a to b").into_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Cycle: a to b");
        assert_eq!(json["isError"], false);
    }

    #[test]
    fn test_error_result_sets_flag() {
        let response = ToolResult::error_text("rate limited").into_response();
        assert!(response.is_error);
        assert_eq!(
            response.content,
            vec![Content::Text {
                text: "rate limited".to_owned()
            }]
        );
    }

    #[test]
    fn test_json_content_is_pretty_printed() {
        let result = ToolResult::ok(json!({ "user_id": 1 }));
        assert_eq!(result.text_content(), "{\n  \"user_id\": 1\n}");
    }
}
