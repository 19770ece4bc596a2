//! Configuration file loading for awsops
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `AWSOPS_<SECTION>__<KEY>` (e.g. `AWSOPS_AWS__REGION`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./awsops.toml` or `./.awsops.toml`
//! 4. Global: `~/.config/awsops/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileAwsConfig, FileConfig, FileEngineConfig, FileLoggingConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader, ENV_PREFIX};
