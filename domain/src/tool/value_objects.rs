//! Tool domain value objects: the uniform outcome shape of every handler.
//!
//! A handler never fails past the tool boundary: success and failure are both
//! plain data ([`ToolOutcome`]) that is serialized and fed back to the engine.
//!
//! | Kind | Raised by | Typical cause |
//! |------|-----------|---------------|
//! | `PolicyRejection` | `aws_cli` | command matched the classifier |
//! | `ExternalCall` | all handlers | AWS API / CLI error, malformed response |
//! | `Timeout` | `aws_cli`, registry | execution exceeded its bound |
//! | `UnknownTool` | registry | engine asked for a tool that does not exist |
//! | `InvalidArgument` | all handlers | bad parameter type or value |
//! | `LimitExceeded` | agent loop | per-turn tool call budget exhausted |

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

/// Category of a tool failure. Used for logging and progress display;
/// never sent to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    PolicyRejection,
    ExternalCall,
    Timeout,
    UnknownTool,
    InvalidArgument,
    LimitExceeded,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::PolicyRejection => "policy_rejection",
            FailureKind::ExternalCall => "external_call",
            FailureKind::Timeout => "timeout",
            FailureKind::UnknownTool => "unknown_tool",
            FailureKind::InvalidArgument => "invalid_argument",
            FailureKind::LimitExceeded => "limit_exceeded",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error descriptor returned in place of a success payload.
///
/// Serializes as `{"error": ..., "message": ...}` with `message` omitted
/// when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolFailure {
    pub error: String,
    pub message: Option<String>,
    pub kind: FailureKind,
}

impl ToolFailure {
    pub fn new(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            kind,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Serialize for ToolFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.message.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("error", &self.error)?;
        if let Some(message) = &self.message {
            map.serialize_entry("message", message)?;
        }
        map.end()
    }
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.error)?;
        if let Some(message) = &self.message {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome {
    /// Success payload: a mapping of string keys to values
    Success(Map<String, Value>),
    /// Single-key (plus optional message) error descriptor
    Error(ToolFailure),
}

impl ToolOutcome {
    /// Build a success outcome from a JSON value.
    ///
    /// Objects are used as-is; any other value is wrapped under `output`
    /// so the payload is always a mapping.
    pub fn success(value: Value) -> Self {
        match value {
            Value::Object(map) => ToolOutcome::Success(map),
            other => {
                let mut map = Map::new();
                map.insert("output".to_string(), other);
                ToolOutcome::Success(map)
            }
        }
    }

    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        ToolOutcome::Error(ToolFailure::new(kind, error))
    }

    pub fn policy_rejection(error: impl Into<String>, message: impl Into<String>) -> Self {
        ToolOutcome::Error(ToolFailure::new(FailureKind::PolicyRejection, error).with_message(message))
    }

    pub fn external(error: impl std::fmt::Display) -> Self {
        Self::failure(FailureKind::ExternalCall, error.to_string())
    }

    pub fn timeout(error: impl Into<String>) -> Self {
        Self::failure(FailureKind::Timeout, error)
    }

    pub fn invalid_argument(error: impl Into<String>) -> Self {
        Self::failure(FailureKind::InvalidArgument, error)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::failure(FailureKind::UnknownTool, format!("unknown tool: {}", name))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success(_))
    }

    pub fn failure_ref(&self) -> Option<&ToolFailure> {
        match self {
            ToolOutcome::Error(f) => Some(f),
            ToolOutcome::Success(_) => None,
        }
    }

    /// Look up a key in the success payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            ToolOutcome::Success(map) => map.get(key),
            ToolOutcome::Error(_) => None,
        }
    }

    /// Serialize for a tool result turn. Non-ASCII text is kept as-is.
    pub fn to_payload(&self) -> String {
        // Map<String, Value> and ToolFailure cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"unserializable outcome"}"#.to_string())
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_object_is_kept() {
        let outcome = ToolOutcome::success(json!({"count": 2, "instances": []}));
        assert!(outcome.is_success());
        assert_eq!(outcome.get("count"), Some(&json!(2)));
        assert_eq!(outcome.to_value(), json!({"count": 2, "instances": []}));
    }

    #[test]
    fn test_success_non_object_is_wrapped() {
        let outcome = ToolOutcome::success(json!(["a", "b"]));
        assert_eq!(outcome.to_value(), json!({"output": ["a", "b"]}));
    }

    #[test]
    fn test_unknown_tool_serialization() {
        let outcome = ToolOutcome::unknown_tool("nonexistent_tool");
        assert!(!outcome.is_success());
        assert_eq!(outcome.to_value(), json!({"error": "unknown tool: nonexistent_tool"}));
        assert_eq!(outcome.failure_ref().unwrap().kind, FailureKind::UnknownTool);
    }

    #[test]
    fn test_policy_rejection_carries_message() {
        let outcome = ToolOutcome::policy_rejection("dangerous command: ec2 stop-instances", "read-only only");
        assert_eq!(
            outcome.to_value(),
            json!({"error": "dangerous command: ec2 stop-instances", "message": "read-only only"})
        );
        assert!(outcome.get("error").is_none());
    }

    #[test]
    fn test_payload_keeps_unicode() {
        let outcome = ToolOutcome::success(json!({"name": "웹서버"}));
        assert_eq!(outcome.to_payload(), r#"{"name":"웹서버"}"#);
    }

    #[test]
    fn test_failure_display() {
        let failure = ToolFailure::new(FailureKind::Timeout, "command timed out (30s)");
        assert_eq!(failure.to_string(), "[timeout] command timed out (30s)");
    }
}
