//! Progress notification port
//!
//! Lets the presentation layer show what a turn is doing (waiting on the
//! engine, running a tool) without the agent loop knowing about terminals.

use awsops_domain::{StopIndicator, ToolCall, ToolOutcome};

/// Callbacks fired during one agent turn.
///
/// Implementations live in the presentation layer.
pub trait TurnProgressNotifier: Send + Sync {
    /// An engine call is about to be made. `round` starts at 1.
    fn on_engine_call_start(&self, round: usize);

    /// The engine answered.
    fn on_engine_call_end(&self, stop: StopIndicator);

    /// A tool is about to be dispatched.
    fn on_tool_start(&self, call: &ToolCall);

    /// A tool finished.
    fn on_tool_complete(&self, call: &ToolCall, outcome: &ToolOutcome);

    /// The per-turn tool call budget ran out.
    fn on_limit_exceeded(&self, _limit: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {
    fn on_engine_call_start(&self, _round: usize) {}
    fn on_engine_call_end(&self, _stop: StopIndicator) {}
    fn on_tool_start(&self, _call: &ToolCall) {}
    fn on_tool_complete(&self, _call: &ToolCall, _outcome: &ToolOutcome) {}
}
