//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Typed accessors convert them into application and domain values.

mod agent;
mod aws;
mod engine;
mod logging;

pub use agent::FileAgentConfig;
pub use aws::FileAwsConfig;
pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("agent.command_timeout_secs cannot be 0")]
    InvalidCommandTimeout,

    #[error("engine.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("agent.command_policy: {0}")]
    InvalidCommandPolicy(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Inspection target
    pub aws: FileAwsConfig,
    /// Reasoning engine (Bedrock)
    pub engine: FileEngineConfig,
    /// Agent loop and tool settings
    pub agent: FileAgentConfig,
    /// Log and transcript files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Reject configurations the binary cannot start with.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.aws.validate()?;
        self.engine.validate()?;
        self.agent.validate()?;
        Ok(())
    }

    /// Settings that work but are probably not what the user meant.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self
            .agent
            .tool_timeout()
            .is_some_and(|limit| limit <= self.agent.command_timeout())
        {
            warnings.push(format!(
                "agent.tool_timeout_secs ({}) does not exceed agent.command_timeout_secs ({}); \
                 CLI commands will be cut off by the registry timeout",
                self.agent.tool_timeout_secs, self.agent.command_timeout_secs
            ));
        }
        warnings
    }
}
