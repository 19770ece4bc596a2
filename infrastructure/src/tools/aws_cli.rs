//! AWS CLI passthrough tool: aws_cli
//!
//! Runs `aws <verb phrase> --region <region> --output json` for commands the
//! configured [`CommandClassifier`] accepts. The phrase is split into argv
//! with shell quoting rules and executed without a shell.

use super::registry::ToolHandler;
use super::string_arg;
use async_trait::async_trait;
use awsops_application::ports::command_runner::{CommandError, CommandRunner};
use awsops_domain::policy::{CommandClassifier, DenyListClassifier};
use awsops_domain::tool::{
    entities::{ToolDefinition, ToolParameter},
    value_objects::ToolOutcome,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Tool name constant
pub const AWS_CLI: &str = "aws_cli";

/// Default hard timeout for one CLI invocation
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Get the tool definition for aws_cli
pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        AWS_CLI,
        "Run an AWS CLI command. Only read-only commands are allowed.",
    )
    .with_parameter(
        ToolParameter::new(
            "command",
            "AWS CLI command without the 'aws' prefix, e.g. 'ec2 describe-instances'",
            true,
        )
        .with_type("string"),
    )
}

pub struct AwsCliTool {
    runner: Arc<dyn CommandRunner>,
    classifier: Box<dyn CommandClassifier>,
    program: String,
    region: String,
    timeout: Duration,
}

impl AwsCliTool {
    pub fn new(runner: Arc<dyn CommandRunner>, region: impl Into<String>) -> Self {
        Self {
            runner,
            classifier: Box::new(DenyListClassifier),
            program: "aws".to_string(),
            region: region.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn CommandClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full argv passed to the CLI for a verb phrase.
    pub fn build_args(&self, command: &str) -> Result<Vec<String>, ToolOutcome> {
        let mut args = shell_words::split(command)
            .map_err(|e| ToolOutcome::invalid_argument(format!("cannot parse command: {}", e)))?;
        if args.first().is_some_and(|a| a == "aws") {
            args.remove(0);
        }
        if args.is_empty() {
            return Err(ToolOutcome::invalid_argument("command must not be empty"));
        }
        args.extend([
            "--region".to_string(),
            self.region.clone(),
            "--output".to_string(),
            "json".to_string(),
        ]);
        Ok(args)
    }

    /// Execute one verb phrase.
    pub async fn run(&self, command: &str) -> ToolOutcome {
        if !self.classifier.is_safe(command) {
            warn!("Refused AWS CLI command: {}", command);
            return ToolOutcome::policy_rejection(
                format!("Dangerous command detected: {}", command),
                "Only read-only commands are allowed.",
            );
        }

        let args = match self.build_args(command) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        debug!("Running {} {}", self.program, args.join(" "));

        let output = match self.runner.run(&self.program, &args, self.timeout).await {
            Ok(output) => output,
            Err(CommandError::Timeout(limit)) => {
                return ToolOutcome::timeout(format!(
                    "Command timed out after {} seconds",
                    limit.as_secs()
                ));
            }
            Err(e) => return ToolOutcome::external(e),
        };

        if !output.success() {
            let stderr = output.stderr.trim();
            let error = if stderr.is_empty() {
                match output.status_code {
                    Some(code) => format!("{} exited with status {}", self.program, code),
                    None => format!("{} was terminated by a signal", self.program),
                }
            } else {
                stderr.to_string()
            };
            return ToolOutcome::external(error);
        }

        match serde_json::from_str::<Value>(&output.stdout) {
            Ok(value) => ToolOutcome::success(value),
            Err(_) => ToolOutcome::success(Value::String(output.stdout)),
        }
    }
}

#[async_trait]
impl ToolHandler for AwsCliTool {
    fn definition(&self) -> ToolDefinition {
        definition()
    }

    async fn call(&self, input: &HashMap<String, Value>) -> ToolOutcome {
        match string_arg(input, "command") {
            Ok(command) => self.run(command.unwrap_or("")).await,
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsops_application::ports::command_runner::CommandOutput;
    use awsops_domain::policy::ReadOnlyVerbClassifier;
    use awsops_domain::tool::value_objects::FailureKind;
    use serde_json::json;
    use std::sync::Mutex;

    /// Runner that records invocations and replays a canned result.
    struct RecordingRunner {
        calls: Mutex<Vec<(String, Vec<String>, Duration)>>,
        result: Mutex<Option<Result<CommandOutput, CommandError>>>,
    }

    impl RecordingRunner {
        fn returning(result: Result<CommandOutput, CommandError>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                result: Mutex::new(Some(result)),
            })
        }

        fn ok(stdout: &str) -> Arc<Self> {
            Self::returning(Ok(CommandOutput {
                status_code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }))
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput, CommandError> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec(), timeout));
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(CommandError::Io("no result scripted".into())))
        }
    }

    fn tool(runner: Arc<RecordingRunner>) -> AwsCliTool {
        AwsCliTool::new(runner, "ap-northeast-2")
    }

    #[tokio::test]
    async fn test_denied_command_never_spawns() {
        let runner = RecordingRunner::ok("{}");
        let outcome = tool(runner.clone())
            .run("ec2 terminate-instances --instance-ids i-123")
            .await;

        let failure = outcome.failure_ref().unwrap();
        assert_eq!(failure.kind, FailureKind::PolicyRejection);
        assert!(failure.error.contains("terminate-instances"));
        assert_eq!(failure.message.as_deref(), Some("Only read-only commands are allowed."));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_builds_region_and_output_suffix() {
        let runner = RecordingRunner::ok(r#"{"Reservations": []}"#);
        let outcome = tool(runner.clone()).run("ec2 describe-instances").await;

        assert_eq!(outcome.get("Reservations"), Some(&json!([])));
        let calls = runner.calls.lock().unwrap();
        let (program, args, timeout) = &calls[0];
        assert_eq!(program, "aws");
        assert_eq!(
            args,
            &["ec2", "describe-instances", "--region", "ap-northeast-2", "--output", "json"]
        );
        assert_eq!(*timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_build_args_quoting_and_prefix() {
        let t = tool(RecordingRunner::ok("{}"));
        let args = t
            .build_args(r#"aws ec2 describe-instances --filters "Name=tag:Name,Values=web server""#)
            .unwrap();
        assert_eq!(args[0], "ec2");
        assert_eq!(args[3], "Name=tag:Name,Values=web server");

        assert!(t.build_args("").is_err());
        assert!(t.build_args("aws").is_err());
        assert!(t.build_args("s3 ls 'unterminated").is_err());
    }

    #[tokio::test]
    async fn test_non_json_output_falls_back_to_raw() {
        let runner = RecordingRunner::ok("2024-01-01 my-bucket\n");
        let outcome = tool(runner).run("s3 ls").await;
        assert_eq!(outcome.to_value(), json!({"output": "2024-01-01 my-bucket\n"}));
    }

    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let runner = RecordingRunner::returning(Ok(CommandOutput {
            status_code: Some(254),
            stdout: String::new(),
            stderr: "An error occurred (AccessDenied)\n".to_string(),
        }));
        let outcome = tool(runner).run("iam list-users").await;
        assert_eq!(outcome.to_value(), json!({"error": "An error occurred (AccessDenied)"}));
    }

    #[tokio::test]
    async fn test_timeout_is_distinct() {
        let runner = RecordingRunner::returning(Err(CommandError::Timeout(Duration::from_secs(30))));
        let outcome = tool(runner).run("logs describe-log-groups").await;
        let failure = outcome.failure_ref().unwrap();
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert_eq!(failure.error, "Command timed out after 30 seconds");
    }

    #[tokio::test]
    async fn test_strict_classifier() {
        let runner = RecordingRunner::ok("{}");
        let strict = tool(runner.clone()).with_classifier(Box::new(ReadOnlyVerbClassifier));
        let outcome = strict.run("ec2 attach-volume --volume-id vol-1").await;
        assert!(!outcome.is_success());
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_strict_classifier_accepts_aws_prefix() {
        let runner = RecordingRunner::ok("{}");
        let strict = tool(runner.clone()).with_classifier(Box::new(ReadOnlyVerbClassifier));
        let outcome = strict.run("aws ec2 describe-instances").await;
        assert!(outcome.is_success());

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(&calls[0].1[..2], &["ec2", "describe-instances"]);
    }

    #[tokio::test]
    async fn test_handler_reads_command_argument() {
        let runner = RecordingRunner::ok("[]");
        let t = tool(runner.clone()).with_program("/usr/local/bin/aws");
        let input: HashMap<String, Value> = [("command".to_string(), json!("s3api list-buckets"))].into();

        let outcome = t.call(&input).await;
        assert_eq!(outcome.to_value(), json!({"output": []}));
        assert_eq!(runner.calls.lock().unwrap()[0].0, "/usr/local/bin/aws");
    }
}
