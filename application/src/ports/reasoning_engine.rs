//! Reasoning engine port
//!
//! Defines the interface to the external text/tool-call generation service.

use async_trait::async_trait;
use awsops_domain::{EngineResponse, Turn};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during a reasoning engine call
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Everything one engine call needs.
///
/// Borrowed so the agent loop can hand over its conversation without cloning.
#[derive(Debug, Clone, Copy)]
pub struct EngineRequest<'a> {
    /// Fixed system instruction
    pub system: &'a str,
    /// Provider-neutral JSON Schema tool definitions
    pub tools: &'a [Value],
    /// Full ordered conversation
    pub turns: &'a [Turn],
}

impl<'a> EngineRequest<'a> {
    pub fn new(system: &'a str, tools: &'a [Value], turns: &'a [Turn]) -> Self {
        Self { system, tools, turns }
    }
}

/// Gateway to the reasoning engine.
///
/// Stateless: the whole conversation travels with every request.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Generate the next assistant response.
    async fn generate(&self, request: &EngineRequest<'_>) -> Result<EngineResponse, EngineError>;

    /// Identifier of the backing model, for display and logs.
    fn model_id(&self) -> &str;
}
