//! Cost reporting records and per-service aggregation.

use crate::core::error::DomainError;
use chrono::{NaiveDate, TimeDelta};
use std::collections::HashMap;

/// Reporting window `[start, end)` ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CostPeriod {
    /// The trailing `days` days ending at `today`.
    pub fn trailing(days: i64, today: NaiveDate) -> Result<Self, DomainError> {
        if days < 1 {
            return Err(DomainError::InvalidCostPeriod(format!(
                "days must be at least 1, got {}",
                days
            )));
        }
        let start = TimeDelta::try_days(days)
            .and_then(|delta| today.checked_sub_signed(delta))
            .ok_or_else(|| DomainError::InvalidCostPeriod(format!("{} days is out of range", days)))?;
        Ok(Self { start, end: today })
    }

    /// `"<start> ~ <end>"` with ISO dates.
    pub fn label(&self) -> String {
        format!("{} ~ {}", self.start, self.end)
    }
}

/// Cost of one service within one reporting bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCost {
    pub service: String,
    pub amount: f64,
}

impl ServiceCost {
    pub fn new(service: impl Into<String>, amount: f64) -> Self {
        Self {
            service: service.into(),
            amount,
        }
    }
}

/// One daily bucket of grouped cost data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostPeriodResult {
    pub groups: Vec<ServiceCost>,
}

impl CostPeriodResult {
    pub fn new(groups: Vec<ServiceCost>) -> Self {
        Self { groups }
    }
}

/// A service's cost summed over the whole period.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceTotal {
    pub service: String,
    pub total: f64,
}

/// Sum each service across all buckets, sorted by total descending.
///
/// Ties are ordered by service name so the output is stable.
pub fn summarize(results: &[CostPeriodResult]) -> (Vec<ServiceTotal>, f64) {
    let mut by_service: HashMap<&str, f64> = HashMap::new();
    let mut grand_total = 0.0;

    for group in results.iter().flat_map(|r| &r.groups) {
        *by_service.entry(group.service.as_str()).or_default() += group.amount;
        grand_total += group.amount;
    }

    let mut totals: Vec<ServiceTotal> = by_service
        .into_iter()
        .map(|(service, total)| ServiceTotal {
            service: service.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.service.cmp(&b.service))
    });

    (totals, grand_total)
}

/// Two-decimal dollar amount, e.g. `$12.30`.
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(groups: &[(&str, f64)]) -> CostPeriodResult {
        CostPeriodResult::new(groups.iter().map(|(s, a)| ServiceCost::new(*s, *a)).collect())
    }

    #[test]
    fn test_trailing_period() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let period = CostPeriod::trailing(7, today).unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(period.label(), "2025-03-03 ~ 2025-03-10");
    }

    #[test]
    fn test_trailing_rejects_non_positive() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(CostPeriod::trailing(0, today).is_err());
        assert!(CostPeriod::trailing(-3, today).is_err());
    }

    #[test]
    fn test_trailing_rejects_out_of_range() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(matches!(
            CostPeriod::trailing(i64::MAX / 1000, today),
            Err(DomainError::InvalidCostPeriod(_))
        ));
        assert!(CostPeriod::trailing(10_000_000, today).is_err());
    }

    #[test]
    fn test_summarize_sums_and_sorts() {
        let results = vec![
            day(&[("Amazon EC2", 1.5), ("Amazon S3", 0.25)]),
            day(&[("Amazon EC2", 2.0), ("AWS Lambda", 3.0)]),
        ];
        let (totals, grand) = summarize(&results);

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].service, "Amazon EC2");
        assert!((totals[0].total - 3.5).abs() < 1e-9);
        assert_eq!(totals[1].service, "AWS Lambda");
        assert_eq!(totals[2].service, "Amazon S3");
        assert!((grand - 6.75).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        let (totals, grand) = summarize(&[]);
        assert!(totals.is_empty());
        assert_eq!(grand, 0.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.567), "$1234.57");
    }
}
