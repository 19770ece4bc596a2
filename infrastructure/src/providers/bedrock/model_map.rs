//! Bedrock model ID mapping
//!
//! Resolves short model aliases to Bedrock model identifiers with the
//! cross-region inference profile prefix Claude 4 models require.

/// Alias → base Bedrock model ID.
const ALIASES: &[(&str, &str)] = &[
    ("claude-sonnet-4", "anthropic.claude-sonnet-4-20250514-v1:0"),
    ("claude-sonnet-4.5", "anthropic.claude-sonnet-4-5-20250929-v1:0"),
    ("claude-haiku-4.5", "anthropic.claude-haiku-4-5-20251001-v1:0"),
    ("claude-opus-4", "anthropic.claude-opus-4-20250514-v1:0"),
    ("claude-opus-4.1", "anthropic.claude-opus-4-1-20250805-v1:0"),
];

/// Resolve a configured model name to the ID sent to Bedrock.
///
/// - Known aliases get the inference profile prefix for `region`
///   (`us-east-1` → `us.`, `ap-northeast-2` → `apac.`).
/// - Anything else (a full model ID, a profile ID or an ARN) is passed
///   through unchanged.
pub fn resolve_model_id(model: &str, region: &str) -> String {
    let model = model.trim();
    match ALIASES.iter().find(|(alias, _)| alias.eq_ignore_ascii_case(model)) {
        Some((_, base_id)) => format!("{}.{}", inference_profile_prefix(region), base_id),
        None => model.to_string(),
    }
}

/// Region group of a cross-region inference profile.
fn inference_profile_prefix(region: &str) -> &'static str {
    match region.split('-').next() {
        Some("eu") => "eu",
        Some("ap") => "apac",
        Some("us") | Some("ca") => "us",
        _ => "us",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_us_region() {
        assert_eq!(
            resolve_model_id("claude-sonnet-4", "us-east-1"),
            "us.anthropic.claude-sonnet-4-20250514-v1:0"
        );
    }

    #[test]
    fn test_alias_regional_prefixes() {
        assert_eq!(
            resolve_model_id("Claude-Sonnet-4.5", "eu-west-1"),
            "eu.anthropic.claude-sonnet-4-5-20250929-v1:0"
        );
        assert_eq!(
            resolve_model_id("claude-opus-4", "ap-northeast-2"),
            "apac.anthropic.claude-opus-4-20250514-v1:0"
        );
    }

    #[test]
    fn test_full_ids_pass_through() {
        assert_eq!(
            resolve_model_id("us.anthropic.claude-sonnet-4-20250514-v1:0", "eu-west-1"),
            "us.anthropic.claude-sonnet-4-20250514-v1:0"
        );
        let arn = "arn:aws:bedrock:us-east-1:123456789012:inference-profile/custom";
        assert_eq!(resolve_model_id(arn, "us-east-1"), arn);
    }
}
