//! Security group records and world-open ingress detection.

use serde::{Deserialize, Serialize};

/// The unrestricted IPv4 range.
pub const UNRESTRICTED_CIDR: &str = "0.0.0.0/0";

/// One inbound permission of a security group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngressRule {
    /// Provider protocol string (`tcp`, `udp`, `-1` for all)
    pub protocol: String,
    /// Start of the port range, absent when the rule covers every port
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    pub cidrs: Vec<String>,
}

impl IngressRule {
    pub fn new(protocol: impl Into<String>, from_port: Option<i32>) -> Self {
        Self {
            protocol: protocol.into(),
            from_port,
            to_port: from_port,
            cidrs: Vec::new(),
        }
    }

    pub fn with_cidr(mut self, cidr: impl Into<String>) -> Self {
        self.cidrs.push(cidr.into());
        self
    }

    /// Number of source ranges in this rule that are open to the world.
    pub fn unrestricted_sources(&self) -> usize {
        self.cidrs.iter().filter(|c| c.as_str() == UNRESTRICTED_CIDR).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityGroupRecord {
    pub group_id: String,
    pub group_name: String,
    pub vpc_id: Option<String>,
    pub description: String,
    pub ingress: Vec<IngressRule>,
}

impl SecurityGroupRecord {
    pub fn new(group_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
            ..Default::default()
        }
    }

    pub fn with_vpc(mut self, vpc_id: impl Into<String>) -> Self {
        self.vpc_id = Some(vpc_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rule(mut self, rule: IngressRule) -> Self {
        self.ingress.push(rule);
        self
    }

    /// Rules with at least one world-open source, repeated once per such source.
    pub fn risky_rules(&self) -> impl Iterator<Item = &IngressRule> {
        self.ingress
            .iter()
            .flat_map(|r| std::iter::repeat_n(r, r.unrestricted_sources()))
    }
}
