//! Conversation store: the ordered turn log sent to the engine on every call.

use super::entities::{ContentBlock, Turn};
use std::collections::HashSet;

/// Append-only ordered log of turns for one session.
///
/// Insertion order is the context order presented to the reasoning engine.
/// The only ways to remove turns are [`clear`](Self::clear) and the optional
/// history cap, which drops whole exchanges (a user turn and everything up
/// to the next user turn) so a tool request is never separated from its result.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
    max_turns: Option<usize>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of retained turns. `None` keeps everything.
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns.filter(|&n| n > 0);
        self
    }

    pub fn max_turns(&self) -> Option<usize> {
        self.max_turns
    }

    /// Append a turn. Starting a new exchange (a user text turn) first
    /// enforces the history cap.
    pub fn append(&mut self, turn: Turn) {
        if turn.is_user_text() {
            self.enforce_cap();
        }
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Reset to empty (explicit session reset).
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Number of user text turns (exchanges) currently retained.
    pub fn exchange_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user_text()).count()
    }

    /// Correlation ids of tool requests that have no matching result yet.
    ///
    /// Empty whenever the store is safe to send to the engine.
    pub fn pending_tool_requests(&self) -> Vec<String> {
        let answered: HashSet<&str> = self
            .turns
            .iter()
            .filter_map(|t| match t {
                Turn::ToolResult { tool_use_id, .. } => Some(tool_use_id.as_str()),
                _ => None,
            })
            .collect();

        self.turns
            .iter()
            .filter_map(|t| match t {
                Turn::AssistantContent { content } => Some(content),
                _ => None,
            })
            .flatten()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, .. } if !answered.contains(id.as_str()) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    fn enforce_cap(&mut self) {
        let Some(max) = self.max_turns else {
            return;
        };
        while !self.turns.is_empty() && self.turns.len() + 1 > max {
            let next_exchange = self
                .turns
                .iter()
                .skip(1)
                .position(Turn::is_user_text)
                .map(|i| i + 1)
                .unwrap_or(self.turns.len());
            self.turns.drain(..next_exchange);
        }
    }
}
