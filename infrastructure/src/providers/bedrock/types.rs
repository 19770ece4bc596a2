//! Type conversions between AWS Bedrock SDK and domain types
//!
//! Converts the conversation log into Converse API messages and Converse
//! responses back into domain [`EngineResponse`]s.

use aws_sdk_bedrockruntime::types as bedrock;
use aws_smithy_types::Document;
use awsops_application::ports::reasoning_engine::EngineError;
use awsops_domain::{ContentBlock, EngineResponse, Role, StopIndicator, Turn};
use std::collections::HashMap;

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Only an explicit tool-use stop asks for tool execution.
pub fn convert_stop_reason(reason: &bedrock::StopReason) -> StopIndicator {
    match reason {
        bedrock::StopReason::ToolUse => StopIndicator::ToolRequested,
        _ => StopIndicator::Final,
    }
}

/// Convert a single Bedrock content block to a domain ContentBlock.
///
/// Returns `None` for unsupported block types (Image, GuardContent, etc.).
pub fn convert_content_block(block: &bedrock::ContentBlock) -> Option<ContentBlock> {
    match block {
        bedrock::ContentBlock::Text(text) => Some(ContentBlock::Text(text.clone())),
        bedrock::ContentBlock::ToolUse(tool_use) => {
            let input = match document_to_json(tool_use.input()) {
                serde_json::Value::Object(map) => map.into_iter().collect::<HashMap<_, _>>(),
                _ => HashMap::new(),
            };
            Some(ContentBlock::tool_use(tool_use.tool_use_id(), tool_use.name(), input))
        }
        _ => None,
    }
}

/// Convert a Bedrock ConverseOutput to a domain EngineResponse.
pub fn convert_converse_output(
    output: Option<&bedrock::ConverseOutput>,
    stop_reason: &bedrock::StopReason,
) -> Result<EngineResponse, EngineError> {
    match output {
        Some(bedrock::ConverseOutput::Message(message)) => Ok(EngineResponse::new(
            message.content().iter().filter_map(convert_content_block).collect(),
            convert_stop_reason(stop_reason),
        )),
        _ => Err(EngineError::InvalidResponse(
            "Converse returned no message".to_string(),
        )),
    }
}

// ─── Domain → Bedrock ────────────────────────────────────────────

fn bedrock_role(role: Role) -> bedrock::ConversationRole {
    match role {
        Role::User => bedrock::ConversationRole::User,
        Role::Assistant => bedrock::ConversationRole::Assistant,
    }
}

fn build_error(what: &str, err: impl std::fmt::Display) -> EngineError {
    EngineError::Other(format!("cannot build {}: {}", what, err))
}

/// Bedrock content blocks for one turn. Blank text is dropped since the
/// Converse API rejects it.
pub fn turn_blocks(turn: &Turn) -> Result<Vec<bedrock::ContentBlock>, EngineError> {
    match turn {
        Turn::UserText { text } => Ok(vec![bedrock::ContentBlock::Text(text.clone())]),
        Turn::AssistantContent { content } => content
            .iter()
            .filter(|block| block.as_text().is_none_or(|t| !t.trim().is_empty()))
            .map(|block| match block {
                ContentBlock::Text(text) => Ok(bedrock::ContentBlock::Text(text.clone())),
                ContentBlock::ToolUse { id, name, input } => {
                    let input = serde_json::Value::Object(input.clone().into_iter().collect());
                    bedrock::ToolUseBlock::builder()
                        .tool_use_id(id)
                        .name(name)
                        .input(json_to_document(&input))
                        .build()
                        .map(bedrock::ContentBlock::ToolUse)
                        .map_err(|e| build_error("tool use block", e))
                }
            })
            .collect(),
        Turn::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            let status = if *is_error {
                bedrock::ToolResultStatus::Error
            } else {
                bedrock::ToolResultStatus::Success
            };
            let block = bedrock::ToolResultBlock::builder()
                .tool_use_id(tool_use_id)
                .status(status)
                .content(bedrock::ToolResultContentBlock::Text(content.clone()))
                .build()
                .map_err(|e| build_error("tool result block", e))?;
            Ok(vec![bedrock::ContentBlock::ToolResult(block)])
        }
    }
}

/// Convert the conversation log to Converse messages.
///
/// Consecutive turns with the same role are merged into one message, so
/// several tool results answering one assistant turn travel together and
/// roles always alternate.
pub fn convert_turns(turns: &[Turn]) -> Result<Vec<bedrock::Message>, EngineError> {
    let mut grouped: Vec<(Role, Vec<bedrock::ContentBlock>)> = Vec::new();

    for turn in turns {
        let blocks = turn_blocks(turn)?;
        if blocks.is_empty() {
            continue;
        }
        match grouped.last_mut() {
            Some((role, existing)) if *role == turn.role() => existing.extend(blocks),
            _ => grouped.push((turn.role(), blocks)),
        }
    }

    grouped
        .into_iter()
        .map(|(role, blocks)| {
            bedrock::Message::builder()
                .role(bedrock_role(role))
                .set_content(Some(blocks))
                .build()
                .map_err(|e| build_error("message", e))
        })
        .collect()
}

/// Convert a JSON tool schema (from ToolSchemaPort) to a Bedrock Tool::ToolSpec.
pub fn convert_tool_schema(schema: &serde_json::Value) -> Option<bedrock::Tool> {
    let name = schema.get("name")?.as_str()?;
    let description = schema.get("description").and_then(|d| d.as_str());

    let input_schema_json = schema.get("input_schema").cloned().unwrap_or_else(|| {
        serde_json::json!({
            "type": "object",
            "properties": {},
        })
    });

    let mut builder = bedrock::ToolSpecification::builder()
        .name(name)
        .input_schema(bedrock::ToolInputSchema::Json(json_to_document(&input_schema_json)));
    if let Some(desc) = description {
        builder = builder.description(desc);
    }

    match builder.build() {
        Ok(spec) => Some(bedrock::Tool::ToolSpec(spec)),
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "Skipping unconvertible tool schema");
            None
        }
    }
}

/// Tool configuration for a request, or `None` when no tools are offered.
pub fn tool_configuration(schemas: &[serde_json::Value]) -> Result<Option<bedrock::ToolConfiguration>, EngineError> {
    let tools: Vec<bedrock::Tool> = schemas.iter().filter_map(convert_tool_schema).collect();
    if tools.is_empty() {
        return Ok(None);
    }
    bedrock::ToolConfiguration::builder()
        .set_tools(Some(tools))
        .build()
        .map(Some)
        .map_err(|e| build_error("tool configuration", e))
}

// ─── JSON ↔ Document helpers ─────────────────────────────────────

/// Convert a serde_json::Value to an aws_smithy_types::Document.
pub fn json_to_document(value: &serde_json::Value) -> Document {
    match value {
        serde_json::Value::Null => Document::Null,
        serde_json::Value::Bool(b) => Document::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(aws_smithy_types::Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(aws_smithy_types::Number::NegInt(i))
            } else if let Some(f) = n.as_f64() {
                Document::Number(aws_smithy_types::Number::Float(f))
            } else {
                Document::Null
            }
        }
        serde_json::Value::String(s) => Document::String(s.clone()),
        serde_json::Value::Array(arr) => Document::Array(arr.iter().map(json_to_document).collect()),
        serde_json::Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

/// Convert an aws_smithy_types::Document to a serde_json::Value.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    match doc {
        Document::Null => serde_json::Value::Null,
        Document::Bool(b) => serde_json::Value::Bool(*b),
        Document::Number(n) => match n {
            aws_smithy_types::Number::PosInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::NegInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        },
        Document::String(s) => serde_json::Value::String(s.clone()),
        Document::Array(arr) => serde_json::Value::Array(arr.iter().map(document_to_json).collect()),
        Document::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert a Bedrock SDK error to an EngineError.
pub fn convert_converse_error(
    err: &aws_sdk_bedrockruntime::error::SdkError<aws_sdk_bedrockruntime::operation::converse::ConverseError>,
) -> EngineError {
    use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
    use aws_sdk_bedrockruntime::operation::converse::ConverseError;

    match err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            ConverseError::ThrottlingException(e) => EngineError::Throttled(e.to_string()),
            ConverseError::ModelNotReadyException(e) => EngineError::ModelNotAvailable(e.to_string()),
            ConverseError::ResourceNotFoundException(e) => EngineError::ModelNotAvailable(e.to_string()),
            ConverseError::AccessDeniedException(e) => {
                EngineError::RequestFailed(format!("access denied: {}", e))
            }
            ConverseError::ValidationException(e) => {
                EngineError::RequestFailed(format!("validation error: {}", e))
            }
            ConverseError::ModelTimeoutException(_) => EngineError::Timeout,
            other => EngineError::RequestFailed(format!("{}", DisplayErrorContext(other))),
        },
        SdkError::TimeoutError(_) => EngineError::Timeout,
        other => EngineError::ConnectionError(format!("{}", DisplayErrorContext(other))),
    }
}
