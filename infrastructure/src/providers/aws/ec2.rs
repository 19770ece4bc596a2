//! EC2 adapter: instance and security group inventory.

use crate::providers::load_sdk_config;
use async_trait::async_trait;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, Instance, IpPermission, SecurityGroup};
use awsops_application::ports::cloud::{ComputeInventory, NetworkInventory, ProviderError};
use awsops_domain::{IngressRule, InstanceRecord, InstanceStateFilter, SecurityGroupRecord};
use chrono::{DateTime, Utc};
use tracing::debug;

const DESCRIBE_INSTANCES: &str = "DescribeInstances";
const DESCRIBE_SECURITY_GROUPS: &str = "DescribeSecurityGroups";

/// EC2-backed [`ComputeInventory`] and [`NetworkInventory`].
pub struct Ec2Inventory {
    client: Ec2Client,
}

impl Ec2Inventory {
    pub async fn new(region: &str, profile: Option<&str>) -> Self {
        let sdk_config = load_sdk_config(region, profile).await;
        Self::with_client(Ec2Client::new(&sdk_config))
    }

    pub fn with_client(client: Ec2Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ComputeInventory for Ec2Inventory {
    async fn describe_instances(&self, filter: InstanceStateFilter) -> Result<Vec<InstanceRecord>, ProviderError> {
        let filters = filter.as_filter_value().map(|state| {
            vec![
                Filter::builder()
                    .name("instance-state-name")
                    .values(state)
                    .build(),
            ]
        });

        let mut pages = self
            .client
            .describe_instances()
            .set_filters(filters)
            .into_paginator()
            .send();

        let mut records = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| ProviderError::api(DESCRIBE_INSTANCES, DisplayErrorContext(&e).to_string()))?;
            records.extend(
                page.reservations()
                    .iter()
                    .flat_map(|r| r.instances())
                    .map(instance_record),
            );
        }

        debug!(count = records.len(), filter = %filter, "Described instances");
        Ok(records)
    }
}

#[async_trait]
impl NetworkInventory for Ec2Inventory {
    async fn describe_security_groups(&self, vpc_id: Option<&str>) -> Result<Vec<SecurityGroupRecord>, ProviderError> {
        let filters = vpc_id.map(|vpc| vec![Filter::builder().name("vpc-id").values(vpc).build()]);

        let mut pages = self
            .client
            .describe_security_groups()
            .set_filters(filters)
            .into_paginator()
            .send();

        let mut records = Vec::new();
        while let Some(page) = pages.next().await {
            let page =
                page.map_err(|e| ProviderError::api(DESCRIBE_SECURITY_GROUPS, DisplayErrorContext(&e).to_string()))?;
            records.extend(page.security_groups().iter().map(security_group_record));
        }

        debug!(count = records.len(), vpc = vpc_id.unwrap_or("*"), "Described security groups");
        Ok(records)
    }
}

fn to_chrono(at: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(at.secs(), at.subsec_nanos())
}

fn instance_record(instance: &Instance) -> InstanceRecord {
    let mut record = InstanceRecord::new(
        instance.instance_id().unwrap_or_default(),
        instance.instance_type().map(|t| t.as_str()).unwrap_or_default(),
        instance
            .state()
            .and_then(|s| s.name())
            .map(|n| n.as_str())
            .unwrap_or_default(),
    );

    for tag in instance.tags() {
        if let (Some(key), Some(value)) = (tag.key(), tag.value()) {
            record = record.with_tag(key, value);
        }
    }
    if let Some(ip) = instance.private_ip_address() {
        record = record.with_private_ip(ip);
    }
    if let Some(ip) = instance.public_ip_address() {
        record = record.with_public_ip(ip);
    }
    if let Some(at) = instance.launch_time().and_then(to_chrono) {
        record = record.with_launch_time(at);
    }
    record
}

fn ingress_rule(permission: &IpPermission) -> IngressRule {
    let mut rule = IngressRule::new(permission.ip_protocol().unwrap_or("-1"), permission.from_port());
    rule.to_port = permission.to_port();
    for range in permission.ip_ranges() {
        if let Some(cidr) = range.cidr_ip() {
            rule = rule.with_cidr(cidr);
        }
    }
    rule
}

fn security_group_record(group: &SecurityGroup) -> SecurityGroupRecord {
    let mut record = SecurityGroupRecord::new(
        group.group_id().unwrap_or_default(),
        group.group_name().unwrap_or_default(),
    );
    if let Some(vpc) = group.vpc_id() {
        record = record.with_vpc(vpc);
    }
    if let Some(description) = group.description() {
        record = record.with_description(description);
    }
    for permission in group.ip_permissions() {
        record = record.with_rule(ingress_rule(permission));
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{InstanceState, InstanceStateName, InstanceType, IpRange, Tag};

    #[test]
    fn test_instance_record_mapping() {
        let instance = Instance::builder()
            .instance_id("i-0abc")
            .instance_type(InstanceType::T3Micro)
            .state(InstanceState::builder().name(InstanceStateName::Running).build())
            .tags(Tag::builder().key("Name").value("web-1").build())
            .tags(Tag::builder().key("env").value("prod").build())
            .private_ip_address("10.0.1.5")
            .launch_time(aws_smithy_types::DateTime::from_secs(1_740_821_400))
            .build();

        let record = instance_record(&instance);
        assert_eq!(record.instance_id, "i-0abc");
        assert_eq!(record.instance_type, "t3.micro");
        assert_eq!(record.state, "running");
        assert_eq!(record.name(), "web-1");
        assert_eq!(record.tag("env"), Some("prod"));
        assert_eq!(record.private_ip_or_na(), "10.0.1.5");
        assert_eq!(record.public_ip_or_na(), "N/A");
        assert_eq!(record.launch_time_text(), "2025-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_instance_record_missing_fields() {
        let record = instance_record(&Instance::builder().build());
        assert_eq!(record.instance_id, "");
        assert_eq!(record.name(), "");
        assert!(record.launch_time.is_none());
    }

    #[test]
    fn test_security_group_mapping() {
        let group = SecurityGroup::builder()
            .group_id("sg-1")
            .group_name("web")
            .vpc_id("vpc-9")
            .description("web tier")
            .ip_permissions(
                IpPermission::builder()
                    .ip_protocol("tcp")
                    .from_port(22)
                    .to_port(22)
                    .ip_ranges(IpRange::builder().cidr_ip("0.0.0.0/0").build())
                    .ip_ranges(IpRange::builder().cidr_ip("10.0.0.0/8").build())
                    .build(),
            )
            .ip_permissions(IpPermission::builder().ip_protocol("-1").build())
            .build();

        let record = security_group_record(&group);
        assert_eq!(record.group_id, "sg-1");
        assert_eq!(record.vpc_id.as_deref(), Some("vpc-9"));
        assert_eq!(record.ingress.len(), 2);
        assert_eq!(record.ingress[0].cidrs, vec!["0.0.0.0/0", "10.0.0.0/8"]);
        assert_eq!(record.ingress[1].from_port, None);
        assert_eq!(record.risky_rules().count(), 1);
    }
}
