//! Cost Explorer adapter: daily unblended cost grouped by service.

use crate::providers::load_sdk_config;
use async_trait::async_trait;
use aws_sdk_costexplorer::Client as CostExplorerClient;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{DateInterval, Granularity, GroupDefinition, GroupDefinitionType, ResultByTime};
use awsops_application::ports::cloud::{CostReporter, ProviderError};
use awsops_domain::{CostPeriod, CostPeriodResult, ServiceCost};
use tracing::debug;

/// Cost Explorer is a global service served from us-east-1 only.
pub const COST_EXPLORER_REGION: &str = "us-east-1";

const GET_COST_AND_USAGE: &str = "GetCostAndUsage";
const METRIC: &str = "UnblendedCost";

/// Cost Explorer-backed [`CostReporter`].
pub struct CostExplorerReporter {
    client: CostExplorerClient,
}

impl CostExplorerReporter {
    pub async fn new(region: &str, profile: Option<&str>) -> Self {
        let sdk_config = load_sdk_config(region, profile).await;
        Self::with_client(CostExplorerClient::new(&sdk_config))
    }

    pub fn with_client(client: CostExplorerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CostReporter for CostExplorerReporter {
    async fn cost_by_service(&self, period: &CostPeriod) -> Result<Vec<CostPeriodResult>, ProviderError> {
        let interval = DateInterval::builder()
            .start(period.start.format("%Y-%m-%d").to_string())
            .end(period.end.format("%Y-%m-%d").to_string())
            .build()
            .map_err(|e| ProviderError::api(GET_COST_AND_USAGE, e.to_string()))?;

        let mut results = Vec::new();
        let mut next_page_token: Option<String> = None;
        loop {
            let response = self
                .client
                .get_cost_and_usage()
                .time_period(interval.clone())
                .granularity(Granularity::Daily)
                .metrics(METRIC)
                .group_by(
                    GroupDefinition::builder()
                        .r#type(GroupDefinitionType::Dimension)
                        .key("SERVICE")
                        .build(),
                )
                .set_next_page_token(next_page_token.take())
                .send()
                .await
                .map_err(|e| ProviderError::api(GET_COST_AND_USAGE, DisplayErrorContext(&e).to_string()))?;

            results.extend(period_results(response.results_by_time())?);

            match response.next_page_token() {
                Some(token) if !token.is_empty() => next_page_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(periods = results.len(), period = %period.label(), "Fetched cost and usage");
        Ok(results)
    }
}

/// Map result periods to domain records. Groups without a key or without
/// the unblended cost metric are skipped; an unparseable amount is an error.
fn period_results(periods: &[ResultByTime]) -> Result<Vec<CostPeriodResult>, ProviderError> {
    periods
        .iter()
        .map(|period| {
            let mut groups = Vec::new();
            for group in period.groups() {
                let Some(service) = group.keys().first() else {
                    continue;
                };
                let Some(amount) = group
                    .metrics()
                    .and_then(|m| m.get(METRIC))
                    .and_then(|v| v.amount())
                else {
                    continue;
                };
                let amount: f64 = amount.trim().parse().map_err(|_| {
                    ProviderError::MalformedResponse(format!("cost amount {:?} for {} is not a number", amount, service))
                })?;
                groups.push(ServiceCost::new(service.as_str(), amount));
            }
            Ok(CostPeriodResult::new(groups))
        })
        .collect()
}
