//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDefinition, ToolParameter};
use serde_json::Value;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks required parameters, rejects unknown ones, and enforces
/// enumerations. `null` counts as "not provided" so the handler default applies.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.has_arg(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };
            if value.is_null() {
                continue;
            }
            check_enum(param, value)?;
        }

        Ok(())
    }
}

fn check_enum(param: &ToolParameter, value: &Value) -> Result<(), String> {
    if param.enum_values.is_empty() {
        return Ok(());
    }
    match value.as_str() {
        Some(s) if param.enum_values.iter().any(|v| v.eq_ignore_ascii_case(s)) => Ok(()),
        _ => Err(format!(
            "Invalid value {} for '{}': expected one of {}",
            value,
            param.name,
            param.enum_values.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instances_tool() -> ToolDefinition {
        ToolDefinition::new("get_ec2_instances", "List instances").with_parameter(
            ToolParameter::new("state", "State filter", false).with_enum(["running", "stopped", "all"]),
        )
    }

    #[test]
    fn test_validator_missing_required() {
        let definition = ToolDefinition::new("aws_cli", "Run CLI")
            .with_parameter(ToolParameter::new("command", "Command", true));

        let call = ToolCall::new("t1", "aws_cli");
        let result = DefaultToolValidator.validate(&call, &definition);
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("t1", "get_ec2_instances").with_arg("region", "us-east-1");
        let result = DefaultToolValidator.validate(&call, &instances_tool());
        assert!(result.unwrap_err().contains("Unknown parameter"));
    }

    #[test]
    fn test_validator_enum() {
        let definition = instances_tool();

        let ok = ToolCall::new("t1", "get_ec2_instances").with_arg("state", "Running");
        assert!(DefaultToolValidator.validate(&ok, &definition).is_ok());

        let bad = ToolCall::new("t2", "get_ec2_instances").with_arg("state", "pending");
        let err = DefaultToolValidator.validate(&bad, &definition).unwrap_err();
        assert!(err.contains("expected one of running, stopped, all"));
    }

    #[test]
    fn test_validator_null_is_omitted() {
        let call = ToolCall::new("t1", "get_ec2_instances").with_arg("state", Value::Null);
        assert!(DefaultToolValidator.validate(&call, &instances_tool()).is_ok());
    }
}
