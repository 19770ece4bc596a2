//! Input line classification for the interactive loop

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Clear,
    Help,
    History,
    /// Blank line
    Empty,
    /// Anything else is a question for the agent
    Ask(String),
}

impl ReplCommand {
    /// Commands are matched case-insensitively, with or without a leading `/`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        match line.trim_start_matches('/').to_lowercase().as_str() {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "clear" | "reset" => ReplCommand::Clear,
            "help" | "h" | "?" => ReplCommand::Help,
            "history" => ReplCommand::History,
            _ => ReplCommand::Ask(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(ReplCommand::parse("quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("  EXIT "), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_questions_pass_through() {
        assert_eq!(
            ReplCommand::parse(" clear out unused security groups? "),
            ReplCommand::Ask("clear out unused security groups?".to_string())
        );
        assert_eq!(ReplCommand::parse("quit smoking"), ReplCommand::Ask("quit smoking".to_string()));
    }
}
