//! Execution parameters: agent loop control.
//!
//! [`ExecutionParams`] groups the static parameters that control
//! [`RunTurnUseCase`](crate::use_cases::run_turn::RunTurnUseCase) and
//! [`AgentSession`](crate::use_cases::session::AgentSession).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Default per-turn tool call budget.
pub const DEFAULT_MAX_TOOL_CALLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum tool invocations in one turn. `None` means unbounded:
    /// the loop ends only when the engine answers.
    pub max_tool_calls: Option<usize>,
    /// Maximum turns kept in the conversation store. `None` keeps everything.
    pub max_history_turns: Option<usize>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_calls: Some(DEFAULT_MAX_TOOL_CALLS),
            max_history_turns: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    /// `0` disables the bound.
    pub fn with_max_tool_calls(mut self, max: usize) -> Self {
        self.max_tool_calls = (max > 0).then_some(max);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.max_tool_calls = None;
        self
    }

    pub fn with_max_history_turns(mut self, max: Option<usize>) -> Self {
        self.max_history_turns = max.filter(|&n| n > 0);
        self
    }

    /// Whether `used` tool calls already exhaust the budget.
    pub fn limit_reached(&self, used: usize) -> bool {
        self.max_tool_calls.is_some_and(|max| used >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_tool_calls, Some(10));
        assert!(params.max_history_turns.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_tool_calls(3)
            .with_max_history_turns(Some(40));
        assert_eq!(params.max_tool_calls, Some(3));
        assert_eq!(params.max_history_turns, Some(40));

        assert_eq!(ExecutionParams::default().with_max_tool_calls(0).max_tool_calls, None);
        assert_eq!(ExecutionParams::default().with_max_history_turns(Some(0)).max_history_turns, None);
    }

    #[test]
    fn test_limit_reached() {
        let params = ExecutionParams::default().with_max_tool_calls(2);
        assert!(!params.limit_reached(1));
        assert!(params.limit_reached(2));
        assert!(!ExecutionParams::default().unbounded().limit_reached(1_000));
    }
}
