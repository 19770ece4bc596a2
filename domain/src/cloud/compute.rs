//! Compute instance records and the lifecycle-state filter.

use crate::core::error::DomainError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sentinel used when an instance has no address of a given kind.
pub const NOT_AVAILABLE: &str = "N/A";

/// Lifecycle-state filter for instance listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStateFilter {
    Running,
    Stopped,
    #[default]
    All,
}

impl InstanceStateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStateFilter::Running => "running",
            InstanceStateFilter::Stopped => "stopped",
            InstanceStateFilter::All => "all",
        }
    }

    /// Value for the provider's `instance-state-name` filter, `None` for `All`.
    pub fn as_filter_value(&self) -> Option<&'static str> {
        match self {
            InstanceStateFilter::All => None,
            other => Some(other.as_str()),
        }
    }

    pub fn matches(&self, state: &str) -> bool {
        match self.as_filter_value() {
            None => true,
            Some(wanted) => state.eq_ignore_ascii_case(wanted),
        }
    }
}

impl FromStr for InstanceStateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(InstanceStateFilter::Running),
            "stopped" => Ok(InstanceStateFilter::Stopped),
            "all" | "" => Ok(InstanceStateFilter::All),
            other => Err(DomainError::InvalidStateFilter(other.to_string())),
        }
    }
}

impl std::fmt::Display for InstanceStateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compute instance as reported by the provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceRecord {
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    pub tags: Vec<(String, String)>,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
}

impl InstanceRecord {
    pub fn new(instance_id: impl Into<String>, instance_type: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            instance_type: instance_type.into(),
            state: state.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    pub fn with_private_ip(mut self, ip: impl Into<String>) -> Self {
        self.private_ip = Some(ip.into());
        self
    }

    pub fn with_public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ip = Some(ip.into());
        self
    }

    pub fn with_launch_time(mut self, at: DateTime<Utc>) -> Self {
        self.launch_time = Some(at);
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Value of the `Name` tag, empty when absent.
    pub fn name(&self) -> &str {
        self.tag("Name").unwrap_or("")
    }

    pub fn private_ip_or_na(&self) -> &str {
        self.private_ip.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn public_ip_or_na(&self) -> &str {
        self.public_ip.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Launch time in RFC 3339 with second precision, empty when unknown.
    pub fn launch_time_text(&self) -> String {
        self.launch_time
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_state_filter_parse() {
        assert_eq!("running".parse::<InstanceStateFilter>().unwrap(), InstanceStateFilter::Running);
        assert_eq!("STOPPED".parse::<InstanceStateFilter>().unwrap(), InstanceStateFilter::Stopped);
        assert_eq!("all".parse::<InstanceStateFilter>().unwrap(), InstanceStateFilter::All);
        assert_eq!(InstanceStateFilter::default(), InstanceStateFilter::All);
        assert!(matches!(
            "pending".parse::<InstanceStateFilter>(),
            Err(DomainError::InvalidStateFilter(s)) if s == "pending"
        ));
    }

    #[test]
    fn test_state_filter_matching() {
        assert!(InstanceStateFilter::All.matches("terminated"));
        assert!(InstanceStateFilter::Running.matches("running"));
        assert!(!InstanceStateFilter::Running.matches("stopped"));
        assert_eq!(InstanceStateFilter::All.as_filter_value(), None);
        assert_eq!(InstanceStateFilter::Stopped.as_filter_value(), Some("stopped"));
    }

    #[test]
    fn test_record_projection_helpers() {
        let launched = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let record = InstanceRecord::new("i-0abc", "t3.micro", "running")
            .with_tag("env", "prod")
            .with_tag("Name", "web-1")
            .with_private_ip("10.0.1.5")
            .with_launch_time(launched);

        assert_eq!(record.name(), "web-1");
        assert_eq!(record.private_ip_or_na(), "10.0.1.5");
        assert_eq!(record.public_ip_or_na(), "N/A");
        assert_eq!(record.launch_time_text(), "2025-03-01T09:30:00+00:00");

        let bare = InstanceRecord::new("i-1", "t3.nano", "stopped");
        assert_eq!(bare.name(), "");
        assert_eq!(bare.launch_time_text(), "");
    }
}
