//! Cost summary tool: get_cost_summary

use super::integer_arg;
use super::registry::ToolHandler;
use async_trait::async_trait;
use awsops_application::ports::cloud::CostReporter;
use awsops_domain::cloud::{CostPeriod, format_currency, summarize};
use awsops_domain::tool::{
    entities::{ToolDefinition, ToolParameter},
    value_objects::ToolOutcome,
};
use chrono::{Local, NaiveDate};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool name constant
pub const GET_COST_SUMMARY: &str = "get_cost_summary";

pub const DEFAULT_DAYS: i64 = 7;

/// Number of services listed in `top_services`
pub const TOP_SERVICES: usize = 5;

/// Get the tool definition for get_cost_summary
pub fn definition() -> ToolDefinition {
    ToolDefinition::new(GET_COST_SUMMARY, "Summarize recent AWS cost by service.").with_parameter(
        ToolParameter::new("days", "Number of days to look back (default: 7)", false)
            .with_type("integer")
            .with_default(DEFAULT_DAYS),
    )
}

pub struct CostSummaryTool {
    reporter: Arc<dyn CostReporter>,
    /// Fixed "today" for deterministic output; local date when unset
    today: Option<NaiveDate>,
}

impl CostSummaryTool {
    pub fn new(reporter: Arc<dyn CostReporter>) -> Self {
        Self { reporter, today: None }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub async fn summarize(&self, days: i64) -> ToolOutcome {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let period = match CostPeriod::trailing(days, today) {
            Ok(period) => period,
            Err(e) => return ToolOutcome::invalid_argument(e.to_string()),
        };

        let results = match self.reporter.cost_by_service(&period).await {
            Ok(results) => results,
            Err(e) => return ToolOutcome::external(e),
        };

        let (totals, grand_total) = summarize(&results);
        let top_services: Vec<Value> = totals
            .iter()
            .take(TOP_SERVICES)
            .map(|s| json!({ "service": s.service, "cost": format_currency(s.total) }))
            .collect();

        ToolOutcome::success(json!({
            "period": period.label(),
            "total_cost": format_currency(grand_total),
            "top_services": top_services,
        }))
    }
}

#[async_trait]
impl ToolHandler for CostSummaryTool {
    fn definition(&self) -> ToolDefinition {
        definition()
    }

    async fn call(&self, input: &HashMap<String, Value>) -> ToolOutcome {
        match integer_arg(input, "days") {
            Ok(days) => self.summarize(days.unwrap_or(DEFAULT_DAYS)).await,
            Err(outcome) => outcome,
        }
    }
}
