//! Tool Executor port
//!
//! Defines the interface for dispatching tool invocations requested by the
//! reasoning engine.

use async_trait::async_trait;
use awsops_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolOutcome,
};
use serde_json::Value;
use std::collections::HashMap;

/// Port for tool execution
///
/// The single chokepoint between engine requests and I/O-performing code.
/// Implementations never fail: every problem (unknown tool, bad arguments,
/// provider error, panic) comes back as a [`ToolOutcome::Error`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().contains(name)
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Dispatch by name.
    async fn dispatch(&self, name: &str, input: &HashMap<String, Value>) -> ToolOutcome;

    /// Execute a tool call requested by the engine.
    async fn execute(&self, call: &ToolCall) -> ToolOutcome {
        self.dispatch(&call.tool_name, &call.arguments).await
    }
}
