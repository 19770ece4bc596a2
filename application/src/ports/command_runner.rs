//! Command runner port
//!
//! Runs an external program with an argument vector under a hard timeout.
//! No shell is involved.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("command timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput, CommandError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_success() {
        let ok = CommandOutput {
            status_code: Some(0),
            stdout: "{}".into(),
            stderr: String::new(),
        };
        assert!(ok.success());

        let killed = CommandOutput {
            status_code: None,
            ..ok.clone()
        };
        assert!(!killed.success());
    }

    #[test]
    fn test_timeout_message() {
        let err = CommandError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "command timed out after 30 seconds");
    }
}
