//! External service adapters
//!
//! - [`aws`]: EC2 and Cost Explorer behind the inspection ports
//! - [`bedrock`]: the reasoning engine via the Bedrock Converse API

pub mod aws;
pub mod bedrock;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load shared AWS SDK configuration for one region.
///
/// Credentials come from the default provider chain (environment, shared
/// profile, SSO, instance metadata); `profile` selects a named profile.
pub async fn load_sdk_config(region: &str, profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}
