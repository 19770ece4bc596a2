//! Cloud provider ports
//!
//! Capability interfaces over the provider's resource-query and
//! cost-reporting APIs, so alternate backends (or in-memory fakes) can be
//! substituted without touching the tool handlers.

use async_trait::async_trait;
use awsops_domain::{CostPeriod, CostPeriodResult, InstanceRecord, InstanceStateFilter, SecurityGroupRecord};
use thiserror::Error;

/// Errors raised by provider adapters.
///
/// Tool handlers turn every one of these into an error outcome.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{operation} failed: {message}")]
    Api { operation: &'static str, message: String },

    #[error("Credentials unavailable: {0}")]
    Credentials(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider call timed out")]
    Timeout,
}

impl ProviderError {
    pub fn api(operation: &'static str, message: impl Into<String>) -> Self {
        ProviderError::Api {
            operation,
            message: message.into(),
        }
    }
}

/// Compute instance listing.
#[async_trait]
pub trait ComputeInventory: Send + Sync {
    /// All instances matching the lifecycle filter, across every page.
    async fn describe_instances(&self, filter: InstanceStateFilter) -> Result<Vec<InstanceRecord>, ProviderError>;
}

/// Network security group listing.
#[async_trait]
pub trait NetworkInventory: Send + Sync {
    /// Security groups, optionally scoped to one VPC.
    async fn describe_security_groups(&self, vpc_id: Option<&str>) -> Result<Vec<SecurityGroupRecord>, ProviderError>;
}

/// Cost reporting.
#[async_trait]
pub trait CostReporter: Send + Sync {
    /// Daily unblended cost grouped by service over `period`.
    async fn cost_by_service(&self, period: &CostPeriod) -> Result<Vec<CostPeriodResult>, ProviderError>;
}
