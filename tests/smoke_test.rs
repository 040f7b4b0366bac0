use chrono::NaiveDate;
use ledger_core::{
    core::services::{LedgerQuery, SortOrder, SummaryService},
    domain::{EntryDraft, PaymentMethod, YearMonth},
    init, LedgerStore,
};

#[test]
fn ledger_view_and_chart_smoke() {
    init();

    let mut store = LedgerStore::new();
    let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    store.add(EntryDraft::new(day, "food", "market", 42.0, PaymentMethod::Cash));
    store.add(EntryDraft::new(day, "transport", "bus pass", 18.0, PaymentMethod::CreditCard));

    let query = LedgerQuery {
        sort: SortOrder::Ascending,
        ..LedgerQuery::default()
    };
    let view = query.apply(store.list());
    assert_eq!(view[0].category, "transport");

    let breakdown = SummaryService::aggregate_by_month(store.list(), YearMonth::of(day)).unwrap();
    assert_eq!(breakdown.chart_series().len(), 2);
    assert!((breakdown.total - 60.0).abs() < f64::EPSILON);
}
