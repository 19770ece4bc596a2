//! Progress reporting for agent turns

use crate::output::console::ConsoleFormatter;
use awsops_application::TurnProgressNotifier;
use awsops_domain::{StopIndicator, ToolCall, ToolOutcome};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner while the engine thinks or a tool runs; one line per finished tool.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, message: String) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(old) = slot.take() {
            old.finish_and_clear();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(pb);
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.stop();
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_engine_call_start(&self, round: usize) {
        let message = if round <= 1 {
            "Thinking...".to_string()
        } else {
            format!("Thinking (step {})...", round)
        };
        self.start(message);
    }

    fn on_engine_call_end(&self, _stop: StopIndicator) {
        self.stop();
    }

    fn on_tool_start(&self, call: &ToolCall) {
        self.start(format!("Running {}", ConsoleFormatter::describe_call(call).bold()));
    }

    fn on_tool_complete(&self, call: &ToolCall, outcome: &ToolOutcome) {
        self.stop();
        eprintln!("{}", ConsoleFormatter::tool_line(call, outcome));
    }

    fn on_limit_exceeded(&self, limit: usize) {
        self.stop();
        eprintln!("  {} tool call limit ({}) reached", "!".yellow(), limit);
    }
}

/// Text-only progress (no spinner), used with `--quiet` or when stderr is
/// not a terminal.
pub struct SimpleProgress;

impl TurnProgressNotifier for SimpleProgress {
    fn on_engine_call_start(&self, _round: usize) {}

    fn on_engine_call_end(&self, _stop: StopIndicator) {}

    fn on_tool_start(&self, _call: &ToolCall) {}

    fn on_tool_complete(&self, call: &ToolCall, outcome: &ToolOutcome) {
        eprintln!("{}", ConsoleFormatter::tool_line(call, outcome));
    }

    fn on_limit_exceeded(&self, limit: usize) {
        eprintln!("  {} tool call limit ({}) reached", "!".yellow(), limit);
    }
}
