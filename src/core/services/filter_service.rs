//! Non-destructive views over the ledger: date range, payment method, and amount order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, LedgerEntry, PaymentMethod};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Ordering applied to the amount column.
pub enum SortOrder {
    /// Keep insertion order.
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            "none" | "off" | "clear" => Some(SortOrder::None),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortOrder::None => "none",
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        f.write_str(label)
    }
}

/// Stateless helpers that derive filtered copies of the entry list.
pub struct FilterService;

impl FilterService {
    /// Entries whose date falls inside `range` (inclusive), in their original order.
    pub fn filter_by_date_range(entries: &[LedgerEntry], range: &DateRange) -> Vec<LedgerEntry> {
        entries
            .iter()
            .filter(|entry| range.contains(entry.date))
            .cloned()
            .collect()
    }

    /// Entries paid with one of `methods`. An empty slice keeps everything.
    pub fn filter_by_payment_methods(
        entries: &[LedgerEntry],
        methods: &[PaymentMethod],
    ) -> Vec<LedgerEntry> {
        entries
            .iter()
            .filter(|entry| methods.is_empty() || methods.contains(&entry.payment_method))
            .cloned()
            .collect()
    }

    /// Stable sort on the numeric amount.
    pub fn sort_by_amount(entries: &mut [LedgerEntry], order: SortOrder) {
        match order {
            SortOrder::None => {}
            SortOrder::Ascending => entries.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            SortOrder::Descending => entries.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        }
    }
}

/// View state for the entry table. Applying it never touches the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerQuery {
    pub range: DateRange,
    pub payment_methods: Vec<PaymentMethod>,
    pub sort: SortOrder,
}

impl LedgerQuery {
    pub fn is_identity(&self) -> bool {
        self.range.is_unbounded() && self.payment_methods.is_empty() && self.sort == SortOrder::None
    }

    /// Derives the view: date range first, then payment method, then ordering.
    pub fn apply(&self, entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
        let dated = FilterService::filter_by_date_range(entries, &self.range);
        let mut view = FilterService::filter_by_payment_methods(&dated, &self.payment_methods);
        FilterService::sort_by_amount(&mut view, self.sort);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryId;
    use chrono::NaiveDate;

    fn entry(id: u64, day: u32, amount: f64, method: PaymentMethod) -> LedgerEntry {
        LedgerEntry {
            id: EntryId(id),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            category: "misc".into(),
            description: format!("entry {id}"),
            amount,
            payment_method: method,
        }
    }

    fn sample() -> Vec<LedgerEntry> {
        vec![
            entry(1, 3, 50.0, PaymentMethod::Cash),
            entry(2, 10, -5.0, PaymentMethod::CreditCard),
            entry(3, 15, 120.0, PaymentMethod::Transfer),
            entry(4, 20, 7.5, PaymentMethod::Cash),
        ]
    }

    fn ids(entries: &[LedgerEntry]) -> Vec<u64> {
        entries.iter().map(|entry| entry.id.0).collect()
    }

    #[test]
    fn date_range_is_inclusive_and_preserves_order() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 10),
            NaiveDate::from_ymd_opt(2024, 1, 20),
        )
        .unwrap();
        let filtered = FilterService::filter_by_date_range(&sample(), &range);
        assert_eq!(ids(&filtered), vec![2, 3, 4]);
    }

    #[test]
    fn date_range_filter_is_idempotent() {
        let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 5), None).unwrap();
        let once = FilterService::filter_by_date_range(&sample(), &range);
        let twice = FilterService::filter_by_date_range(&once, &range);
        assert_eq!(once, twice);
    }

    #[test]
    fn payment_filter_matches_exact_methods() {
        let filtered =
            FilterService::filter_by_payment_methods(&sample(), &[PaymentMethod::Cash]);
        assert_eq!(ids(&filtered), vec![1, 4]);
        let everything = FilterService::filter_by_payment_methods(&sample(), &[]);
        assert_eq!(everything.len(), 4);
    }

    #[test]
    fn amount_sort_is_numeric() {
        let mut entries = sample();
        FilterService::sort_by_amount(&mut entries, SortOrder::Ascending);
        assert_eq!(ids(&entries), vec![2, 4, 1, 3]);
        FilterService::sort_by_amount(&mut entries, SortOrder::Descending);
        assert_eq!(ids(&entries), vec![3, 1, 4, 2]);
    }

    #[test]
    fn query_composes_filters_without_mutating_input() {
        let source = sample();
        let query = LedgerQuery {
            range: DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 2), None).unwrap(),
            payment_methods: vec![PaymentMethod::Cash, PaymentMethod::Transfer],
            sort: SortOrder::Descending,
        };
        let view = query.apply(&source);
        assert_eq!(ids(&view), vec![3, 1, 4]);
        assert_eq!(source.len(), 4);
        assert!(LedgerQuery::default().is_identity());
        assert_eq!(LedgerQuery::default().apply(&source), source);
    }

    #[test]
    fn sort_order_parses_aliases() {
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::parse("descending"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::parse("clear"), Some(SortOrder::None));
        assert_eq!(SortOrder::parse("sideways"), None);
    }
}
