//! Subprocess runner backed by `tokio::process`.

use async_trait::async_trait;
use awsops_application::ports::command_runner::{CommandError, CommandOutput, CommandRunner};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs a program directly (no shell) and kills it when the timeout fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput, CommandError> {
        debug!("Spawning {} with {} argument(s)", program, args.len());

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| CommandError::Io(e.to_string()))?,
            Err(_) => return Err(CommandError::Timeout(timeout)),
        };

        Ok(CommandOutput {
            status_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Resolve `program` against `PATH` (or check it directly when it is a path).
pub fn locate_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
