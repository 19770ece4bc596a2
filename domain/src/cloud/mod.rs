//! Provider record types returned by the inspection ports.
//!
//! These are provider-neutral projections of what the cloud APIs return;
//! the infrastructure adapters map SDK types into them.

pub mod compute;
pub mod cost;
pub mod network;

pub use compute::{InstanceRecord, InstanceStateFilter, NOT_AVAILABLE};
pub use cost::{CostPeriod, CostPeriodResult, ServiceCost, ServiceTotal, format_currency, summarize};
pub use network::{IngressRule, SecurityGroupRecord, UNRESTRICTED_CIDR};
