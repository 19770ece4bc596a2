//! AWS target configuration from TOML (`[aws]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "ap-northeast-2";

/// Cost Explorer only answers in us-east-1.
pub const DEFAULT_COST_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAwsConfig {
    /// Region for EC2 queries and the CLI passthrough
    pub region: String,
    /// Named profile; the default credential chain when unset
    pub profile: Option<String>,
    /// Region for Cost Explorer calls
    pub cost_region: String,
}

impl Default for FileAwsConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            profile: None,
            cost_region: DEFAULT_COST_REGION.to_string(),
        }
    }
}

impl FileAwsConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.region.trim().is_empty() {
            return Err(ConfigValidationError::EmptyValue("aws.region"));
        }
        if self.cost_region.trim().is_empty() {
            return Err(ConfigValidationError::EmptyValue("aws.cost_region"));
        }
        Ok(())
    }

    /// Profile with blank values treated as unset.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}
