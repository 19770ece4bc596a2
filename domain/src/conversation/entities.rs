//! Conversation entities: the turns that make up the engine's context window.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Role a turn is presented under when sent to the reasoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single block of assistant output: free text or a tool invocation request.
///
/// # Examples
///
/// ```
/// use awsops_domain::conversation::ContentBlock;
///
/// let text = ContentBlock::Text("Let me check your instances.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "toolu_abc123".to_string(),
///     name: "get_ec2_instances".to_string(),
///     input: [("state".to_string(), serde_json::json!("running"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(String),

    ToolUse {
        /// Correlation id assigned by the engine
        id: String,
        name: String,
        input: HashMap<String, Value>,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text(text.into())
    }

    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: HashMap<String, Value>) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// One atomic unit of conversation state. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    UserText { text: String },
    AssistantContent { content: Vec<ContentBlock> },
    ToolResult {
        tool_use_id: String,
        /// Serialized [`ToolOutcome`](crate::tool::ToolOutcome)
        content: String,
        is_error: bool,
    },
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn::UserText { text: text.into() }
    }

    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Turn::AssistantContent { content }
    }

    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>, is_error: bool) -> Self {
        Turn::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error,
        }
    }

    /// Tool results travel back to the engine on the user side.
    pub fn role(&self) -> Role {
        match self {
            Turn::UserText { .. } | Turn::ToolResult { .. } => Role::User,
            Turn::AssistantContent { .. } => Role::Assistant,
        }
    }

    pub fn is_user_text(&self) -> bool {
        matches!(self, Turn::UserText { .. })
    }

    /// Concatenation of all text blocks (assistant turns) or the user text.
    pub fn text(&self) -> String {
        match self {
            Turn::UserText { text } => text.clone(),
            Turn::AssistantContent { content } => content
                .iter()
                .filter_map(|b| b.as_text())
                .collect::<Vec<_>>()
                .join(""),
            Turn::ToolResult { .. } => String::new(),
        }
    }

    /// Tool invocations requested by an assistant turn, in order.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        match self {
            Turn::AssistantContent { content } => content
                .iter()
                .filter_map(|b| b.as_tool_use())
                .map(|(id, name, input)| ToolCall::new(id, name).with_arguments(input.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assistant_with_tool() -> Turn {
        Turn::assistant(vec![
            ContentBlock::text("Checking. "),
            ContentBlock::tool_use(
                "toolu_1",
                "get_ec2_instances",
                [("state".to_string(), json!("running"))].into_iter().collect(),
            ),
            ContentBlock::text("One moment."),
        ])
    }

    #[test]
    fn test_roles() {
        assert_eq!(Turn::user("hi").role(), Role::User);
        assert_eq!(Turn::tool_result("toolu_1", "{}", false).role(), Role::User);
        assert_eq!(assistant_with_tool().role(), Role::Assistant);
    }

    #[test]
    fn test_text_concatenates_blocks() {
        assert_eq!(assistant_with_tool().text(), "Checking. One moment.");
        assert_eq!(Turn::user("list my instances").text(), "list my instances");
        assert_eq!(Turn::tool_result("toolu_1", "{}", false).text(), "");
    }

    #[test]
    fn test_tool_calls_extraction() {
        let calls = assistant_with_tool().tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "toolu_1");
        assert_eq!(calls[0].tool_name, "get_ec2_instances");
        assert_eq!(calls[0].get_string("state"), Some("running"));
        assert!(Turn::user("x").tool_calls().is_empty());
    }

    #[test]
    fn test_content_block_accessors() {
        let text = ContentBlock::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_tool_use().is_none());

        let tool = ContentBlock::tool_use("id1", "aws_cli", HashMap::new());
        assert!(tool.as_text().is_none());
        let (id, name, input) = tool.as_tool_use().unwrap();
        assert_eq!(id, "id1");
        assert_eq!(name, "aws_cli");
        assert!(input.is_empty());
    }
}
