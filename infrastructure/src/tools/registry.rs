//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to [`ToolHandler`]s and implements
//! [`ToolExecutorPort`]. It is the only path from engine requests to
//! I/O-performing code, so it is where validation, timing, and failure
//! containment happen.
//!
//! # Usage
//!
//! ```ignore
//! use awsops_infrastructure::tools::{ToolRegistry, InstancesTool, CostSummaryTool};
//!
//! let registry = ToolRegistry::new()
//!     .register(InstancesTool::new(ec2.clone()))
//!     .register(CostSummaryTool::new(cost_explorer));
//!
//! let outcome = registry.dispatch("get_ec2_instances", &input).await;
//! ```
//!
//! # Dispatch
//!
//! 1. Unknown name → `{"error": "unknown tool: <name>"}`
//! 2. Arguments checked against the definition → invalid argument outcome
//! 3. Handler runs under the optional timeout; a panic is caught and
//!    returned as an error outcome

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use awsops_application::ports::tool_executor::ToolExecutorPort;
use awsops_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::ToolOutcome,
};
use futures::FutureExt;
use serde_json::Value;

/// A single named tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Provider failures are returned as error outcomes.
    async fn call(&self, input: &HashMap<String, Value>) -> ToolOutcome;
}

/// Tool registry that routes calls to handlers by name.
pub struct ToolRegistry {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    tool_spec: ToolSpec,
    validator: DefaultToolValidator,
    timeout: Option<Duration>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            tool_spec: ToolSpec::new(),
            validator: DefaultToolValidator,
            timeout: None,
        }
    }

    /// Register a handler. A later handler with the same name replaces
    /// the earlier one.
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    /// Register a handler (Arc version)
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let definition = handler.definition();
        tracing::debug!(tool = %definition.name, "Registered tool");
        self.handlers.insert(definition.name.clone(), handler);
        self.tool_spec = self.tool_spec.register(definition);
        self
    }

    /// Upper bound for any single handler call.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    async fn run_handler(&self, name: &str, handler: &dyn ToolHandler, input: &HashMap<String, Value>) -> ToolOutcome {
        let guarded = AssertUnwindSafe(handler.call(input)).catch_unwind();

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, guarded).await {
                Ok(result) => result,
                Err(_) => {
                    return ToolOutcome::timeout(format!(
                        "{} did not finish within {} seconds",
                        name,
                        limit.as_secs()
                    ));
                }
            },
            None => guarded.await,
        };

        result.unwrap_or_else(|panic| {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(tool = name, panic = %detail, "Tool handler panicked");
            ToolOutcome::external(format!("{} failed: {}", name, detail))
        })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn dispatch(&self, name: &str, input: &HashMap<String, Value>) -> ToolOutcome {
        let Some(handler) = self.handlers.get(name) else {
            tracing::warn!(tool = name, "Unknown tool requested");
            return ToolOutcome::unknown_tool(name);
        };

        if let Some(definition) = self.tool_spec.get(name) {
            let call = ToolCall::new("", name).with_arguments(input.clone());
            if let Err(reason) = self.validator.validate(&call, definition) {
                tracing::warn!(tool = name, %reason, "Rejected tool arguments");
                return ToolOutcome::invalid_argument(reason);
            }
        }

        let started = Instant::now();
        let outcome = self.run_handler(name, handler.as_ref(), input).await;
        tracing::info!(
            tool = name,
            success = outcome.is_success(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool dispatched"
        );
        outcome
    }
}
