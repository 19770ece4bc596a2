//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid instance state filter: {0} (expected running, stopped or all)")]
    InvalidStateFilter(String),

    #[error("Invalid command policy: {0} (expected deny_list or read_only_verbs)")]
    InvalidPolicy(String),

    #[error("Invalid cost period: {0}")]
    InvalidCostPeriod(String),
}
