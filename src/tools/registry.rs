// ABOUTME: Central registry for MCP tools with lookup, schema listing, and execution.
// ABOUTME: Registers the built-in WHOOP profile, recent-window, and date-range tools.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! The registry is built once at startup and then used immutably for
//! lookups. All registered tools are `Arc`-wrapped for sharing across async
//! tasks.
//!
//! ```
//! use whoop_mcp_server::tools::registry::ToolRegistry;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register_builtin_tools();
//! assert_eq!(registry.len(), 10);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::implementations::profile::{GetBodyMeasurementsTool, GetUserProfileTool};
use super::implementations::records::{DateRangeTool, RecentRecordsTool, RecordKind};
use super::result::ToolResult;
use super::traits::McpTool;

/// Central registry for MCP tools.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name, tool);
        true
    }

    /// Register every WHOOP tool
    pub fn register_builtin_tools(&mut self) {
        self.register(Arc::new(GetUserProfileTool));
        self.register(Arc::new(GetBodyMeasurementsTool));

        for kind in RecordKind::ALL {
            self.register(Arc::new(RecentRecordsTool::new(kind)));
            self.register(Arc::new(DateRangeTool::new(kind)));
        }

        info!("Registered {} WHOOP tools", self.tools.len());
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Schemas for `tools/list`, sorted by name for stable output
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown tool, otherwise whatever the
    /// tool returns
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| AppError::not_found(format!("Tool '{name}'")))?;

        debug!("Executing tool '{}'", name);
        tool.execute(args, context).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        assert!(registry.register(Arc::new(GetUserProfileTool)));
        assert!(!registry.register(Arc::new(GetUserProfileTool)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builtin_schemas_are_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();

        let names: Vec<String> = registry
            .list_schemas()
            .into_iter()
            .map(|schema| schema.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 10);
    }
}
