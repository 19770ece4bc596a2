//! Bedrock reasoning engine adapter
//!
//! Implements [`ReasoningEngine`] with one Converse API call per
//! [`generate`](ReasoningEngine::generate). The adapter holds no
//! conversation state.

use super::model_map::resolve_model_id;
use super::types;
use crate::providers::load_sdk_config;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{InferenceConfiguration, SystemContentBlock};
use awsops_application::ports::reasoning_engine::{EngineError, EngineRequest, ReasoningEngine};
use awsops_domain::EngineResponse;
use tracing::{debug, info};

/// Settings for the Bedrock engine.
#[derive(Debug, Clone)]
pub struct BedrockEngineConfig {
    /// Model alias (`claude-sonnet-4`) or full Bedrock model / profile ID
    pub model: String,
    /// Region hosting the model
    pub region: String,
    /// AWS profile name; default credential chain when unset
    pub profile: Option<String>,
    /// Output token cap per call
    pub max_tokens: u32,
}

/// Reasoning engine backed by Claude on AWS Bedrock.
pub struct BedrockEngine {
    client: BedrockClient,
    model_id: String,
    max_tokens: u32,
}

impl BedrockEngine {
    /// Build the engine from shared AWS configuration.
    pub async fn new(config: &BedrockEngineConfig) -> Self {
        let sdk_config = load_sdk_config(&config.region, config.profile.as_deref()).await;
        let model_id = resolve_model_id(&config.model, &config.region);
        info!(model = %model_id, region = %config.region, "Bedrock engine initialized");
        Self::with_client(BedrockClient::new(&sdk_config), model_id, config.max_tokens)
    }

    pub fn with_client(client: BedrockClient, model_id: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens,
        }
    }
}

#[async_trait]
impl ReasoningEngine for BedrockEngine {
    async fn generate(&self, request: &EngineRequest<'_>) -> Result<EngineResponse, EngineError> {
        let messages = types::convert_turns(request.turns)?;
        let tool_config = types::tool_configuration(request.tools)?;

        debug!(
            model = %self.model_id,
            messages = messages.len(),
            tools = request.tools.len(),
            "Sending Converse request"
        );

        let max_tokens = i32::try_from(self.max_tokens).unwrap_or(i32::MAX);
        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(request.system.to_string()))
            .set_messages(Some(messages))
            .inference_config(InferenceConfiguration::builder().max_tokens(max_tokens).build())
            .set_tool_config(tool_config)
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        if let Some(usage) = response.usage() {
            debug!(
                input_tokens = usage.input_tokens(),
                output_tokens = usage.output_tokens(),
                "Converse usage"
            );
        }

        types::convert_converse_output(response.output(), response.stop_reason())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
