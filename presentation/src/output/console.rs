//! Console output formatter for agent turns

use awsops_application::RunTurnError;
use awsops_domain::util::preview;
use awsops_domain::{ToolCall, ToolOutcome, Turn};
use colored::Colorize;

/// Width of argument and error previews on tool lines
const PREVIEW_BYTES: usize = 80;

/// Formats agent output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Interactive mode banner
    pub fn banner(region: &str, model: &str) -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{:^60}\n{}\n{} {}\n{} {}\n\n{}\n",
            line.cyan(),
            "awsops - AWS infrastructure assistant".bold(),
            line.cyan(),
            "Region:".cyan().bold(),
            region,
            "Model: ".cyan().bold(),
            model,
            "Type 'help' for commands, 'quit' to exit.".dimmed()
        )
    }

    pub fn help() -> String {
        [
            format!("{}", "Commands:".cyan().bold()),
            "  help            Show this help".to_string(),
            "  history         Show the conversation so far".to_string(),
            "  clear           Forget the conversation and start over".to_string(),
            "  quit, exit      Leave awsops (Ctrl-D also works)".to_string(),
            String::new(),
            "Anything else is sent to the assistant as a question.".to_string(),
        ]
        .join("\n")
    }

    pub fn answer(text: &str) -> String {
        if text.trim().is_empty() {
            format!("{}", "(no answer text)".dimmed())
        } else {
            text.trim_end().to_string()
        }
    }

    pub fn turn_error(error: &RunTurnError) -> String {
        let hint = match error {
            RunTurnError::ToolCallLimitExceeded { .. } => {
                "Try a narrower question, or raise agent.max_tool_calls."
            }
            RunTurnError::Engine(_) => "The question was kept; ask again or type 'clear'.",
        };
        format!("{} {}\n{}", "Error:".red().bold(), error, hint.dimmed())
    }

    /// Short description of a tool invocation
    pub fn describe_call(call: &ToolCall) -> String {
        if let Some(command) = call.get_string("command") {
            return format!("{} {}", call.tool_name, preview(command, PREVIEW_BYTES));
        }
        if call.arguments.is_empty() {
            return call.tool_name.clone();
        }
        let mut args: Vec<_> = call.arguments.iter().collect();
        args.sort_by(|a, b| a.0.cmp(b.0));
        let rendered = args
            .iter()
            .map(|(k, v)| match v.as_str() {
                Some(s) => format!("{}={}", k, s),
                None => format!("{}={}", k, v),
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}", call.tool_name, preview(&rendered, PREVIEW_BYTES))
    }

    /// One line per completed tool call
    pub fn tool_line(call: &ToolCall, outcome: &ToolOutcome) -> String {
        match outcome.failure_ref() {
            None => format!("  {} {}", "v".green(), Self::describe_call(call).dimmed()),
            Some(failure) => format!(
                "  {} {} {}",
                "x".red(),
                Self::describe_call(call).dimmed(),
                format!("({})", preview(&failure.error, PREVIEW_BYTES)).red()
            ),
        }
    }

    /// Conversation overview for the `history` command
    pub fn history(turns: &[Turn]) -> String {
        if turns.is_empty() {
            return format!("{}", "No conversation yet.".dimmed());
        }

        let exchanges = turns.iter().filter(|t| t.is_user_text()).count();
        let tool_results = turns
            .iter()
            .filter(|t| matches!(t, Turn::ToolResult { .. }))
            .count();

        let mut lines = vec![format!(
            "{} {} turns, {} questions, {} tool results",
            "History:".cyan().bold(),
            turns.len(),
            exchanges,
            tool_results
        )];
        lines.extend(
            turns
                .iter()
                .filter(|t| t.is_user_text())
                .enumerate()
                .map(|(i, t)| format!("  {:>2}. {}", i + 1, preview(&t.text(), PREVIEW_BYTES))),
        );
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsops_application::EngineError;
    use awsops_domain::ContentBlock;
    use serde_json::json;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_describe_call() {
        let cli = ToolCall::new("t1", "aws_cli").with_arg("command", "ec2 describe-vpcs");
        assert_eq!(ConsoleFormatter::describe_call(&cli), "aws_cli ec2 describe-vpcs");

        let cost = ToolCall::new("t2", "get_cost_summary").with_arg("days", 30);
        assert_eq!(ConsoleFormatter::describe_call(&cost), "get_cost_summary days=30");

        let bare = ToolCall::new("t3", "get_security_groups");
        assert_eq!(ConsoleFormatter::describe_call(&bare), "get_security_groups");
    }

    #[test]
    fn test_tool_line_shows_failure() {
        plain();
        let call = ToolCall::new("t1", "aws_cli").with_arg("command", "ec2 stop-instances");
        let line = ConsoleFormatter::tool_line(
            &call,
            &ToolOutcome::policy_rejection("Dangerous command detected: ec2 stop-instances", "Only read-only commands are allowed."),
        );
        assert!(line.contains("x aws_cli ec2 stop-instances"));
        assert!(line.contains("(Dangerous command detected"));

        let ok = ConsoleFormatter::tool_line(&call, &ToolOutcome::success(json!({"count": 0})));
        assert!(ok.starts_with("  v "));
    }

    #[test]
    fn test_history_lists_questions() {
        plain();
        let turns = vec![
            Turn::user("How many instances are running?"),
            Turn::assistant(vec![ContentBlock::tool_use("t1", "get_ec2_instances", Default::default())]),
            Turn::tool_result("t1", "{}", false),
            Turn::assistant(vec![ContentBlock::text("None.")]),
            Turn::user("And   stopped\nones?"),
        ];
        let text = ConsoleFormatter::history(&turns);
        assert!(text.contains("5 turns, 2 questions, 1 tool results"));
        assert!(text.contains(" 1. How many instances are running?"));
        assert!(text.contains(" 2. And stopped ones?"));

        assert!(ConsoleFormatter::history(&[]).contains("No conversation yet"));
    }

    #[test]
    fn test_turn_error_hints() {
        plain();
        let limit = ConsoleFormatter::turn_error(&RunTurnError::ToolCallLimitExceeded { limit: 3 });
        assert!(limit.starts_with("Error: Tool call limit of 3"));
        assert!(limit.contains("max_tool_calls"));

        let engine = ConsoleFormatter::turn_error(&RunTurnError::Engine(EngineError::Timeout));
        assert!(engine.contains("Reasoning engine call failed"));
    }

    #[test]
    fn test_answer_placeholder() {
        plain();
        assert_eq!(ConsoleFormatter::answer("Done.\n\n"), "Done.");
        assert_eq!(ConsoleFormatter::answer("  "), "(no answer text)");
    }
}
