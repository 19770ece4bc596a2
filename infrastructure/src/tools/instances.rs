//! EC2 instance listing tool: get_ec2_instances

use super::registry::ToolHandler;
use super::string_arg;
use async_trait::async_trait;
use awsops_application::ports::cloud::ComputeInventory;
use awsops_domain::tool::{
    entities::{ToolDefinition, ToolParameter},
    value_objects::ToolOutcome,
};
use awsops_domain::{InstanceRecord, InstanceStateFilter};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool name constant
pub const GET_EC2_INSTANCES: &str = "get_ec2_instances";

/// Get the tool definition for get_ec2_instances
pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_EC2_INSTANCES,
        "List EC2 instances in the current region.",
    )
    .with_parameter(
        ToolParameter::new("state", "Instance state to filter by (running, stopped, all)", false)
            .with_enum(["running", "stopped", "all"])
            .with_default("all"),
    )
}

pub struct InstancesTool {
    inventory: Arc<dyn ComputeInventory>,
}

impl InstancesTool {
    pub fn new(inventory: Arc<dyn ComputeInventory>) -> Self {
        Self { inventory }
    }

    pub async fn list(&self, filter: InstanceStateFilter) -> ToolOutcome {
        let records = match self.inventory.describe_instances(filter).await {
            Ok(records) => records,
            Err(e) => return ToolOutcome::external(e),
        };

        let instances: Vec<Value> = records
            .iter()
            .filter(|r| filter.matches(&r.state))
            .map(project)
            .collect();
        let count = instances.len();

        ToolOutcome::success(json!({ "instances": instances, "count": count }))
    }
}

fn project(record: &InstanceRecord) -> Value {
    json!({
        "InstanceId": record.instance_id,
        "Name": record.name(),
        "Type": record.instance_type,
        "State": record.state,
        "PrivateIp": record.private_ip_or_na(),
        "PublicIp": record.public_ip_or_na(),
        "LaunchTime": record.launch_time_text(),
    })
}

#[async_trait]
impl ToolHandler for InstancesTool {
    fn definition(&self) -> ToolDefinition {
        definition()
    }

    async fn call(&self, input: &HashMap<String, Value>) -> ToolOutcome {
        let filter = match string_arg(input, "state") {
            Ok(None) => InstanceStateFilter::default(),
            Ok(Some(state)) => match state.parse() {
                Ok(filter) => filter,
                Err(e) => return ToolOutcome::invalid_argument(format!("{}", e)),
            },
            Err(outcome) => return outcome,
        };
        self.list(filter).await
    }
}
