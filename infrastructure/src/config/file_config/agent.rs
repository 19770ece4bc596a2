//! Agent configuration from TOML (`[agent]` section)

use super::ConfigValidationError;
use awsops_application::ExecutionParams;
use awsops_application::config::execution_params::DEFAULT_MAX_TOOL_CALLS;
use awsops_domain::CommandPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Tool invocations allowed per turn (0 = unbounded)
    pub max_tool_calls: usize,
    /// Hard timeout for one AWS CLI invocation
    pub command_timeout_secs: u64,
    /// Upper bound for any tool handler (0 = none)
    pub tool_timeout_secs: u64,
    /// "deny_list" or "read_only_verbs"
    pub command_policy: String,
    /// Conversation turns retained across exchanges (unset = unbounded)
    pub max_history_turns: Option<usize>,
    /// AWS CLI executable
    pub cli_program: String,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_tool_calls: DEFAULT_MAX_TOOL_CALLS,
            command_timeout_secs: 30,
            tool_timeout_secs: 60,
            command_policy: CommandPolicy::default().to_string(),
            max_history_turns: None,
            cli_program: "aws".to_string(),
        }
    }
}

impl FileAgentConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.command_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidCommandTimeout);
        }
        if self.cli_program.trim().is_empty() {
            return Err(ConfigValidationError::EmptyValue("agent.cli_program"));
        }
        self.command_policy()?;
        Ok(())
    }

    pub fn command_policy(&self) -> Result<CommandPolicy, ConfigValidationError> {
        self.command_policy
            .parse()
            .map_err(|e: awsops_domain::DomainError| ConfigValidationError::InvalidCommandPolicy(e.to_string()))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_secs > 0).then(|| Duration::from_secs(self.tool_timeout_secs))
    }

    /// Agent loop parameters
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_calls(self.max_tool_calls)
            .with_max_history_turns(self.max_history_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileAgentConfig::default();
        assert_eq!(config.command_policy().unwrap(), CommandPolicy::DenyList);
        assert_eq!(config.command_timeout(), Duration::from_secs(30));
        assert_eq!(config.tool_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.execution_params(), ExecutionParams::default());
    }

    #[test]
    fn test_policy_aliases() {
        let config = FileAgentConfig {
            command_policy: "Read-Only-Verbs".to_string(),
            ..Default::default()
        };
        assert_eq!(config.command_policy().unwrap(), CommandPolicy::ReadOnlyVerbs);
    }

    #[test]
    fn test_zero_tool_timeout_disables_bound() {
        let config = FileAgentConfig {
            tool_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.tool_timeout(), None);
    }
}
