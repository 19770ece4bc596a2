//! Security group exposure tool: get_security_groups
//!
//! Flags inbound rules open to 0.0.0.0/0 so the engine does not have to
//! interpret the provider's raw rule schema.

use super::registry::ToolHandler;
use super::string_arg;
use async_trait::async_trait;
use awsops_application::ports::cloud::NetworkInventory;
use awsops_domain::cloud::{SecurityGroupRecord, UNRESTRICTED_CIDR};
use awsops_domain::cloud::compute::NOT_AVAILABLE;
use awsops_domain::tool::{
    entities::{ToolDefinition, ToolParameter},
    value_objects::ToolOutcome,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool name constant
pub const GET_SECURITY_GROUPS: &str = "get_security_groups";

/// Get the tool definition for get_security_groups
pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_SECURITY_GROUPS,
        "List security groups and flag inbound rules open to the internet.",
    )
    .with_parameter(ToolParameter::new(
        "vpc_id",
        "VPC ID (optional; all VPCs when omitted)",
        false,
    ))
}

pub struct SecurityGroupsTool {
    inventory: Arc<dyn NetworkInventory>,
}

impl SecurityGroupsTool {
    pub fn new(inventory: Arc<dyn NetworkInventory>) -> Self {
        Self { inventory }
    }

    pub async fn list(&self, vpc_id: Option<&str>) -> ToolOutcome {
        let groups = match self.inventory.describe_security_groups(vpc_id).await {
            Ok(groups) => groups,
            Err(e) => return ToolOutcome::external(e),
        };

        let security_groups: Vec<Value> = groups.iter().map(project).collect();
        let count = security_groups.len();

        ToolOutcome::success(json!({ "security_groups": security_groups, "count": count }))
    }
}

fn project(group: &SecurityGroupRecord) -> Value {
    let risky_rules: Vec<Value> = group
        .risky_rules()
        .map(|rule| {
            json!({
                "port": rule.from_port.map_or_else(|| json!("All"), |p| json!(p)),
                "protocol": rule.protocol,
                "source": UNRESTRICTED_CIDR,
            })
        })
        .collect();

    json!({
        "GroupId": group.group_id,
        "GroupName": group.group_name,
        "VpcId": group.vpc_id.as_deref().unwrap_or(NOT_AVAILABLE),
        "Description": group.description,
        "InboundRulesCount": group.ingress.len(),
        "RiskyRules": risky_rules,
    })
}

#[async_trait]
impl ToolHandler for SecurityGroupsTool {
    fn definition(&self) -> ToolDefinition {
        definition()
    }

    async fn call(&self, input: &HashMap<String, Value>) -> ToolOutcome {
        match string_arg(input, "vpc_id") {
            Ok(vpc_id) => self.list(vpc_id.map(str::trim).filter(|v| !v.is_empty())).await,
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsops_application::ports::cloud::ProviderError;
    use awsops_domain::cloud::IngressRule;
    use std::sync::Mutex;

    struct FakeNetwork {
        groups: Vec<SecurityGroupRecord>,
        scopes: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl NetworkInventory for FakeNetwork {
        async fn describe_security_groups(&self, vpc_id: Option<&str>) -> Result<Vec<SecurityGroupRecord>, ProviderError> {
            self.scopes.lock().unwrap().push(vpc_id.map(String::from));
            Ok(self
                .groups
                .iter()
                .filter(|g| vpc_id.is_none() || g.vpc_id.as_deref() == vpc_id)
                .cloned()
                .collect())
        }
    }

    fn network() -> Arc<FakeNetwork> {
        Arc::new(FakeNetwork {
            groups: vec![
                SecurityGroupRecord::new("sg-open", "bastion")
                    .with_vpc("vpc-1")
                    .with_description("SSH from anywhere")
                    .with_rule(IngressRule::new("tcp", Some(22)).with_cidr("0.0.0.0/0"))
                    .with_rule(IngressRule::new("tcp", Some(443)).with_cidr("10.0.0.0/8")),
                SecurityGroupRecord::new("sg-closed", "db")
                    .with_vpc("vpc-2")
                    .with_description("Internal only")
                    .with_rule(IngressRule::new("tcp", Some(5432)).with_cidr("10.0.0.0/16")),
                SecurityGroupRecord::new("sg-all", "wide")
                    .with_rule(IngressRule::new("-1", None).with_cidr("0.0.0.0/0")),
            ],
            scopes: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_world_open_ssh_is_flagged() {
        let outcome = SecurityGroupsTool::new(network()).list(None).await;
        let groups = outcome.get("security_groups").unwrap().as_array().unwrap();
        assert_eq!(outcome.get("count"), Some(&json!(3)));

        let open = &groups[0];
        assert_eq!(open["GroupId"], "sg-open");
        assert_eq!(open["InboundRulesCount"], 2);
        assert_eq!(
            open["RiskyRules"],
            json!([{"port": 22, "protocol": "tcp", "source": "0.0.0.0/0"}])
        );

        assert_eq!(groups[1]["RiskyRules"], json!([]));
    }

    #[tokio::test]
    async fn test_all_ports_rule_and_missing_vpc() {
        let outcome = SecurityGroupsTool::new(network()).list(None).await;
        let wide = &outcome.get("security_groups").unwrap()[2];
        assert_eq!(wide["VpcId"], "N/A");
        assert_eq!(wide["RiskyRules"][0]["port"], "All");
        assert_eq!(wide["RiskyRules"][0]["protocol"], "-1");
    }

    #[tokio::test]
    async fn test_vpc_scope() {
        let net = network();
        let tool = SecurityGroupsTool::new(net.clone());

        let input: HashMap<String, Value> = [("vpc_id".to_string(), json!("vpc-2"))].into();
        let outcome = tool.call(&input).await;
        assert_eq!(outcome.get("count"), Some(&json!(1)));

        let blank: HashMap<String, Value> = [("vpc_id".to_string(), json!("  "))].into();
        tool.call(&blank).await;

        assert_eq!(*net.scopes.lock().unwrap(), vec![Some("vpc-2".to_string()), None]);
    }
}
