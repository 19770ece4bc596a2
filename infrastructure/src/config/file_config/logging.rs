//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily-rolling diagnostic log. Unset logs to stderr.
    pub dir: Option<String>,
    /// JSONL conversation transcript path
    pub conversation_log: Option<String>,
}
