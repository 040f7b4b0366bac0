//! Monthly category breakdown feeding the pie chart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LedgerEntry, YearMonth};
use crate::errors::LedgerError;

use super::ServiceResult;

/// One category's share of a month's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    pub fraction: f64,
}

/// `{name, value}` point consumed by the charting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Per-category totals for a single month, categories in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub month: YearMonth,
    pub total: f64,
    pub entry_count: usize,
    pub shares: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn fractions(&self) -> Vec<(String, f64)> {
        self.shares
            .iter()
            .map(|share| (share.category.clone(), share.fraction))
            .collect()
    }

    /// Shares ordered by descending magnitude; ties keep first-seen order.
    pub fn sorted_by_share(&self) -> Vec<CategoryShare> {
        let mut shares = self.shares.clone();
        shares.sort_by(|a, b| b.fraction.abs().total_cmp(&a.fraction.abs()));
        shares
    }

    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.shares
            .iter()
            .map(|share| ChartPoint {
                name: share.category.clone(),
                value: share.fraction,
            })
            .collect()
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Groups the entries dated within `month` by category.
    ///
    /// Returns [`LedgerError::NoData`] when nothing falls in the month, the
    /// amounts cancel out to zero, or the total is not finite.
    pub fn aggregate_by_month(
        entries: &[LedgerEntry],
        month: YearMonth,
    ) -> ServiceResult<CategoryBreakdown> {
        let selected: Vec<&LedgerEntry> = entries
            .iter()
            .filter(|entry| month.contains(entry.date))
            .collect();
        let total: f64 = selected.iter().map(|entry| entry.amount).sum();
        if selected.is_empty() || !total.is_finite() || total.abs() < f64::EPSILON {
            debug!(%month, selected = selected.len(), "no data to aggregate");
            return Err(LedgerError::NoData { month }.into());
        }

        let mut order: Vec<(&str, f64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for entry in &selected {
            let category = entry.category.as_str();
            match index.get(category) {
                Some(&slot) => order[slot].1 += entry.amount,
                None => {
                    index.insert(category, order.len());
                    order.push((category, entry.amount));
                }
            }
        }

        let shares = order
            .into_iter()
            .map(|(category, category_total)| CategoryShare {
                category: category.to_string(),
                total: category_total,
                fraction: category_total / total,
            })
            .collect::<Vec<_>>();
        debug!(%month, total, categories = shares.len(), "aggregated month");

        Ok(CategoryBreakdown {
            month,
            total,
            entry_count: selected.len(),
            shares,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::domain::{EntryId, PaymentMethod};
    use chrono::NaiveDate;

    fn entry(id: u64, date: (i32, u32, u32), category: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            id: EntryId(id),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category: category.into(),
            description: "item".into(),
            amount,
            payment_method: PaymentMethod::Cash,
        }
    }

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn computes_fractions_per_category() {
        let entries = vec![
            entry(1, (2024, 3, 1), "food", 100.0),
            entry(2, (2024, 3, 2), "rent", 300.0),
        ];
        let breakdown = SummaryService::aggregate_by_month(&entries, march()).unwrap();
        assert_eq!(
            breakdown.fractions(),
            vec![("food".to_string(), 0.25), ("rent".to_string(), 0.75)]
        );
        assert_eq!(breakdown.total, 400.0);
    }

    #[test]
    fn groups_repeated_categories_in_first_seen_order() {
        let entries = vec![
            entry(1, (2024, 3, 1), "rent", 200.0),
            entry(2, (2024, 3, 4), "food", 30.0),
            entry(3, (2024, 3, 9), "rent", 100.0),
            entry(4, (2024, 3, 20), "food", 70.0),
        ];
        let breakdown = SummaryService::aggregate_by_month(&entries, march()).unwrap();
        let categories: Vec<_> = breakdown
            .shares
            .iter()
            .map(|share| (share.category.as_str(), share.total))
            .collect();
        assert_eq!(categories, vec![("rent", 300.0), ("food", 100.0)]);
        let sum: f64 = breakdown.shares.iter().map(|share| share.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn excludes_other_months() {
        let entries = vec![
            entry(1, (2024, 3, 31), "food", 10.0),
            entry(2, (2024, 4, 1), "travel", 500.0),
            entry(3, (2023, 3, 15), "gifts", 80.0),
        ];
        let breakdown = SummaryService::aggregate_by_month(&entries, march()).unwrap();
        assert_eq!(breakdown.fractions(), vec![("food".to_string(), 1.0)]);
        assert_eq!(breakdown.entry_count, 1);
    }

    #[test]
    fn empty_month_reports_no_data() {
        let entries = vec![entry(1, (2024, 4, 1), "food", 10.0)];
        let err = SummaryService::aggregate_by_month(&entries, march())
            .expect_err("empty month must not produce fractions");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::NoData { month }) if month == march()
        ));
    }

    #[test]
    fn cancelling_amounts_report_no_data() {
        let entries = vec![
            entry(1, (2024, 3, 1), "salary", 100.0),
            entry(2, (2024, 3, 2), "refund", -100.0),
        ];
        assert!(SummaryService::aggregate_by_month(&entries, march()).is_err());
    }

    #[test]
    fn non_finite_totals_report_no_data() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let entries = vec![
                entry(1, (2024, 3, 1), "food", 100.0),
                entry(2, (2024, 3, 2), "food", bad),
            ];
            let err = SummaryService::aggregate_by_month(&entries, march())
                .expect_err("non-finite total must not produce fractions");
            assert!(matches!(err, ServiceError::Ledger(LedgerError::NoData { .. })));
        }
    }

    #[test]
    fn sorted_by_share_orders_by_magnitude() {
        let entries = vec![
            entry(1, (2024, 3, 1), "food", 100.0),
            entry(2, (2024, 3, 2), "rent", 300.0),
            entry(3, (2024, 3, 3), "fun", 100.0),
        ];
        let breakdown = SummaryService::aggregate_by_month(&entries, march()).unwrap();
        let sorted: Vec<_> = breakdown
            .sorted_by_share()
            .into_iter()
            .map(|share| share.category)
            .collect();
        assert_eq!(sorted, vec!["rent", "food", "fun"]);
        let series = breakdown.chart_series();
        assert_eq!(series[1].name, "rent");
        assert!((series[1].value - 0.6).abs() < 1e-12);
    }
}
