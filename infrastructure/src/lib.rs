//! Infrastructure layer for awsops
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the tool registry and its AWS handlers,
//! the Bedrock reasoning engine, configuration file loading and the
//! conversation transcript.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoadError, ConfigLoader, ConfigValidationError, FileAgentConfig, FileAwsConfig, FileConfig,
    FileEngineConfig, FileLoggingConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::aws::{COST_EXPLORER_REGION, CostExplorerReporter, Ec2Inventory};
pub use providers::bedrock::{BedrockEngine, BedrockEngineConfig, resolve_model_id};
pub use tools::{
    AwsCliTool, CostSummaryTool, InstancesTool, JsonSchemaToolConverter, SecurityGroupsTool, TokioCommandRunner,
    ToolHandler, ToolRegistry, aws_tool_definitions, locate_program,
};
