use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledger_core::core::services::{FilterService, LedgerQuery, SortOrder, SummaryService};
use ledger_core::core::{Clock, LedgerStore};
use ledger_core::domain::{DateRange, EntryDraft, PaymentMethod, YearMonth};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

const CATEGORIES: [&str; 6] = ["food", "rent", "transport", "fun", "health", "gifts"];

fn build_store(entry_count: usize) -> LedgerStore {
    let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut store = LedgerStore::with_clock(Arc::new(FixedClock(instant)));
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..entry_count {
        let method = match idx % 3 {
            0 => PaymentMethod::Cash,
            1 => PaymentMethod::CreditCard,
            _ => PaymentMethod::Transfer,
        };
        store.add(EntryDraft::new(
            start + Duration::days((idx % 365) as i64),
            CATEGORIES[idx % CATEGORIES.len()],
            format!("entry {idx}"),
            5.0 + (idx % 97) as f64,
            method,
        ));
    }
    store
}

fn bench_filtering(c: &mut Criterion) {
    let store = build_store(black_box(10_000));
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 3, 1),
        NaiveDate::from_ymd_opt(2025, 6, 30),
    )
    .unwrap();

    c.bench_function("filter_date_range_10k", |b| {
        b.iter(|| black_box(FilterService::filter_by_date_range(store.list(), &range)))
    });

    let query = LedgerQuery {
        range,
        payment_methods: vec![PaymentMethod::Cash, PaymentMethod::Transfer],
        sort: SortOrder::Descending,
    };
    c.bench_function("query_apply_10k", |b| {
        b.iter(|| black_box(query.apply(store.list())))
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let store = build_store(black_box(10_000));
    let month = YearMonth::new(2025, 4).unwrap();

    c.bench_function("aggregate_month_10k", |b| {
        b.iter(|| {
            let breakdown = SummaryService::aggregate_by_month(store.list(), month).unwrap();
            black_box(breakdown.chart_series())
        })
    });
}

criterion_group!(benches, bench_filtering, bench_aggregation);
criterion_main!(benches);
