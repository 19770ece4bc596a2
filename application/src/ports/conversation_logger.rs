//! Port for structured conversation logging.
//!
//! Separate from `tracing` diagnostics: this port records the conversation
//! transcript (user input, tool calls and results, answers) in a
//! machine-readable form such as JSONL.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Event type identifiers written by the agent loop and session.
pub mod events {
    pub const USER_INPUT: &str = "user_input";
    pub const TOOL_CALL: &str = "tool_call";
    pub const TOOL_RESULT: &str = "tool_result";
    pub const ASSISTANT_RESPONSE: &str = "assistant_response";
    pub const TURN_FAILED: &str = "turn_failed";
    pub const SESSION_CLEARED: &str = "session_cleared";
}

/// A structured conversation event.
pub struct ConversationEvent {
    pub event_type: &'static str,
    pub at: DateTime<Utc>,
    /// Event-specific fields
    pub payload: Value,
}

impl ConversationEvent {
    /// Create an event stamped with the current UTC time.
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            at: Utc::now(),
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; adapters swallow their own I/O errors
/// so a full disk never aborts a turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
