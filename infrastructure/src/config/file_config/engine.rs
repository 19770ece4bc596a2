//! Reasoning engine configuration from TOML (`[engine]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Model alias (e.g. "claude-sonnet-4") or full Bedrock model ID
    pub model_id: String,
    /// AWS region hosting the model (default: "us-east-1")
    pub region: String,
    /// Max tokens per response (default: 4096)
    pub max_tokens: u32,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            model_id: "claude-sonnet-4".to_string(),
            region: "us-east-1".to_string(),
            max_tokens: 4096,
        }
    }
}

impl FileEngineConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model_id.trim().is_empty() {
            return Err(ConfigValidationError::EmptyValue("engine.model_id"));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigValidationError::EmptyValue("engine.region"));
        }
        if self.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}
