//! System instruction for the infrastructure agent

use crate::tool::entities::ToolSpec;

/// Templates for generating the agent's system instruction
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// System instruction sent with every engine call.
    ///
    /// Lists the registered tools so the instruction and the tool
    /// configuration never drift apart.
    pub fn agent_system(tool_spec: &ToolSpec, region: &str) -> String {
        let tool_descriptions = tool_spec
            .all()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are an AWS infrastructure management expert working in region {region}.

## Role
- Monitor and analyze the state of AWS resources
- Review security settings and recommend fixes
- Suggest cost optimizations
- Troubleshoot infrastructure problems

## Available Tools
{tool_descriptions}

## Principles
1. Safety first: never modify or delete resources; mutating commands are refused automatically.
2. Cost awareness: warn before suggesting anything that incurs cost.
3. Least privilege: perform only the minimum operations the question requires.
4. Clear explanations: explain every action taken and every result returned.

When a tool returns an `error` field, explain the failure to the user or retry with
different arguments instead of inventing data."#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolDefinition;

    #[test]
    fn test_system_prompt_lists_tools() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("get_cost_summary", "Summarize recent AWS cost"))
            .register(ToolDefinition::new("aws_cli", "Run a read-only AWS CLI command"));

        let prompt = AgentPromptTemplate::agent_system(&spec, "ap-northeast-2");
        assert!(prompt.contains("region ap-northeast-2"));
        assert!(prompt.contains("- aws_cli: Run a read-only AWS CLI command"));
        assert!(prompt.contains("- get_cost_summary: Summarize recent AWS cost"));
        assert!(prompt.contains("Safety first"));
        assert!(prompt.contains("Cost awareness"));
    }
}
