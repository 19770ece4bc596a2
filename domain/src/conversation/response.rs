//! Reasoning engine response types.
//!
//! Every engine call returns the assistant's content blocks plus a stop
//! indicator telling the agent loop whether to run tools or finish the turn.

use super::entities::{ContentBlock, Turn};
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Why the engine stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopIndicator {
    /// The engine wants tools executed and their results returned.
    ToolRequested,
    /// The turn's answer is complete.
    Final,
}

/// A structured response from the reasoning engine.
///
/// # Examples
///
/// ```
/// use awsops_domain::conversation::{ContentBlock, EngineResponse, StopIndicator};
///
/// let response = EngineResponse::from_text("You have 3 running instances.");
/// assert_eq!(response.stop, StopIndicator::Final);
/// assert_eq!(response.text_content(), "You have 3 running instances.");
/// assert!(!response.has_tool_calls());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResponse {
    pub content: Vec<ContentBlock>,
    pub stop: StopIndicator,
}

impl EngineResponse {
    pub fn new(content: Vec<ContentBlock>, stop: StopIndicator) -> Self {
        Self { content, stop }
    }

    /// Create a text-only final response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop: StopIndicator::Final,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| b.as_tool_use())
            .map(|(id, name, input)| ToolCall::new(id, name).with_arguments(input.clone()))
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    /// The assistant turn recorded in the conversation for this response.
    pub fn to_turn(&self) -> Turn {
        Turn::assistant(self.content.clone())
    }
}
