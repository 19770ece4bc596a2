//! AWS service adapters for the inspection ports.

mod cost_explorer;
mod ec2;

pub use cost_explorer::{COST_EXPLORER_REGION, CostExplorerReporter};
pub use ec2::Ec2Inventory;
