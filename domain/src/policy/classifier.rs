//! Command classification: decides whether an AWS CLI verb phrase may run
//! without review.
//!
//! The policy is purely lexical. A false positive (refusing a benign command
//! that happens to contain a denied substring) is accepted; letting an
//! unreviewed mutating call through is not.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Substrings associated with mutation or lifecycle change.
pub const DENIED_TOKENS: &[&str] = &[
    "delete",
    "terminate",
    "remove",
    "destroy",
    "create",
    "modify",
    "update",
    "put",
    "start",
    "stop",
    "reboot",
];

/// Operation prefixes accepted by [`ReadOnlyVerbClassifier`].
pub const READ_ONLY_PREFIXES: &[&str] = &["describe", "list", "get"];

/// Stateless safety check over command text.
pub trait CommandClassifier: Send + Sync {
    /// `true` when the command may be executed autonomously.
    fn is_safe(&self, command: &str) -> bool;
}

/// Case-insensitive substring match against [`DENIED_TOKENS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyListClassifier;

impl DenyListClassifier {
    /// First denied token found in the command, if any.
    pub fn matched_token(command: &str) -> Option<&'static str> {
        let lowered = command.to_lowercase();
        DENIED_TOKENS.iter().copied().find(|t| lowered.contains(t))
    }
}

impl CommandClassifier for DenyListClassifier {
    fn is_safe(&self, command: &str) -> bool {
        Self::matched_token(command).is_none()
    }
}

/// Deny-list plus an allow-list on the operation word.
///
/// The second whitespace-separated token (`ec2 describe-instances` →
/// `describe-instances`), after an optional leading `aws`, must start with one of [`READ_ONLY_PREFIXES`] or be
/// `ls`. Closes the gap where a mutating verb missing from the deny-list
/// (e.g. `attach-volume`) would otherwise be allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyVerbClassifier;

impl CommandClassifier for ReadOnlyVerbClassifier {
    fn is_safe(&self, command: &str) -> bool {
        if !DenyListClassifier.is_safe(command) {
            return false;
        }
        let mut words = command.split_whitespace().peekable();
        words.next_if(|w| w.eq_ignore_ascii_case("aws"));
        let Some(operation) = words.nth(1) else {
            return false;
        };
        let operation = operation.to_lowercase();
        operation == "ls" || READ_ONLY_PREFIXES.iter().any(|p| operation.starts_with(p))
    }
}

/// Which classifier the passthrough tool uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandPolicy {
    #[default]
    DenyList,
    ReadOnlyVerbs,
}

impl CommandPolicy {
    pub fn classifier(&self) -> Box<dyn CommandClassifier> {
        match self {
            CommandPolicy::DenyList => Box::new(DenyListClassifier),
            CommandPolicy::ReadOnlyVerbs => Box::new(ReadOnlyVerbClassifier),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandPolicy::DenyList => "deny_list",
            CommandPolicy::ReadOnlyVerbs => "read_only_verbs",
        }
    }
}

impl FromStr for CommandPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "deny_list" => Ok(CommandPolicy::DenyList),
            "read_only_verbs" | "strict" => Ok(CommandPolicy::ReadOnlyVerbs),
            other => Err(DomainError::InvalidPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for CommandPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAFE_CORPUS: &[&str] = &[
        "ec2 describe-instances",
        "s3 ls",
        "sts get-caller-identity",
        "iam list-users",
        "ec2 describe-vpcs --filters Name=isDefault,Values=true",
    ];

    #[test]
    fn test_deny_list_rejects_every_token() {
        for token in DENIED_TOKENS {
            let command = format!("ec2 {}-something --id i-123", token);
            assert!(!DenyListClassifier.is_safe(&command), "{} should be denied", command);
        }
    }

    #[test]
    fn test_deny_list_is_case_insensitive() {
        assert!(!DenyListClassifier.is_safe("EC2 TERMINATE-INSTANCES --instance-ids i-1"));
        assert!(!DenyListClassifier.is_safe("s3api PutObject"));
    }

    #[test]
    fn test_deny_list_matches_anywhere() {
        // Substring matching is intentionally coarse.
        assert!(!DenyListClassifier.is_safe("logs describe-log-groups --log-group-name-prefix /startup"));
        assert_eq!(
            DenyListClassifier::matched_token("ec2 describe-instances --query StateReason stopped"),
            Some("stop")
        );
        assert_eq!(
            DenyListClassifier::matched_token("ec2 describe-instances --output table"),
            Some("put")
        );
    }

    #[test]
    fn test_deny_list_accepts_safe_corpus() {
        for command in SAFE_CORPUS {
            assert!(DenyListClassifier.is_safe(command), "{} should be safe", command);
        }
    }

    #[test]
    fn test_read_only_verbs_skip_aws_prefix() {
        assert!(ReadOnlyVerbClassifier.is_safe("aws ec2 describe-instances"));
        assert!(ReadOnlyVerbClassifier.is_safe("AWS s3 ls"));
        assert!(!ReadOnlyVerbClassifier.is_safe("aws ec2 attach-volume --volume-id vol-1"));
    }

    #[test]
    fn test_read_only_verbs() {
        for command in SAFE_CORPUS {
            assert!(ReadOnlyVerbClassifier.is_safe(command), "{} should be safe", command);
        }
        // Passes the deny-list but is not a read verb.
        assert!(DenyListClassifier.is_safe("ec2 attach-volume --volume-id vol-1"));
        assert!(!ReadOnlyVerbClassifier.is_safe("ec2 attach-volume --volume-id vol-1"));
        assert!(!ReadOnlyVerbClassifier.is_safe("ec2"));
        assert!(!ReadOnlyVerbClassifier.is_safe("aws ec2"));
        assert!(!ReadOnlyVerbClassifier.is_safe("ec2 describe-instances; ec2 delete-vpc"));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("deny_list".parse::<CommandPolicy>().unwrap(), CommandPolicy::DenyList);
        assert_eq!("read-only-verbs".parse::<CommandPolicy>().unwrap(), CommandPolicy::ReadOnlyVerbs);
        assert_eq!("STRICT".parse::<CommandPolicy>().unwrap(), CommandPolicy::ReadOnlyVerbs);
        assert!("allow_all".parse::<CommandPolicy>().is_err());
    }

    #[test]
    fn test_policy_classifier() {
        let strict = CommandPolicy::ReadOnlyVerbs.classifier();
        assert!(!strict.is_safe("ec2 attach-volume"));
        let default = CommandPolicy::default().classifier();
        assert!(default.is_safe("ec2 attach-volume"));
    }
}
