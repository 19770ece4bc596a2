//! Tool implementations for the AWS inspection agent
//!
//! Each handler reads an external system and returns data; none keeps
//! per-conversation state, so one [`ToolRegistry`] can serve many sessions.
//!
//! | Tool                  | Handler                     | Backend            |
//! |-----------------------|-----------------------------|--------------------|
//! | `aws_cli`             | [`AwsCliTool`]              | AWS CLI subprocess |
//! | `get_ec2_instances`   | [`InstancesTool`]           | EC2 API            |
//! | `get_security_groups` | [`SecurityGroupsTool`]      | EC2 API            |
//! | `get_cost_summary`    | [`CostSummaryTool`]         | Cost Explorer API  |

pub mod aws_cli;
pub mod cost;
pub mod instances;
pub mod process;
pub mod security_groups;

mod registry;
mod schema;

pub use aws_cli::AwsCliTool;
pub use cost::CostSummaryTool;
pub use instances::InstancesTool;
pub use process::{TokioCommandRunner, locate_program};
pub use registry::{ToolHandler, ToolRegistry};
pub use schema::JsonSchemaToolConverter;
pub use security_groups::SecurityGroupsTool;

use awsops_domain::tool::{entities::ToolDefinition, value_objects::ToolOutcome};
use serde_json::Value;
use std::collections::HashMap;

/// Definitions of every tool, in registration order.
pub fn aws_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        aws_cli::definition(),
        instances::definition(),
        security_groups::definition(),
        cost::definition(),
    ]
}

/// Optional string argument. `null` and absence both mean "not provided".
pub(crate) fn string_arg<'a>(input: &'a HashMap<String, Value>, key: &str) -> Result<Option<&'a str>, ToolOutcome> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ToolOutcome::invalid_argument(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
    }
}

/// Optional integer argument. Numeric strings such as `"14"` are accepted.
pub(crate) fn integer_arg(input: &HashMap<String, Value>, key: &str) -> Result<Option<i64>, ToolOutcome> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
            ToolOutcome::invalid_argument(format!("'{}' must be an integer, got {}", key, n))
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| {
            ToolOutcome::invalid_argument(format!("'{}' must be an integer, got \"{}\"", key, s))
        }),
        Some(other) => Err(ToolOutcome::invalid_argument(format!(
            "'{}' must be an integer, got {}",
            key, other
        ))),
    }
}
