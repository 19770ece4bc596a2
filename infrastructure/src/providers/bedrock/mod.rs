//! AWS Bedrock Converse API provider
//!
//! Provides access to Claude models via AWS IAM authentication
//! through the Bedrock Converse API.

mod engine;
mod model_map;
mod types;

pub use engine::{BedrockEngine, BedrockEngineConfig};
pub use model_map::resolve_model_id;
