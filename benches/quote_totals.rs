#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use oficina_quotes::application::QuoteService;
use oficina_quotes::application::commands::{CreateQuote, NewQuoteItem};
use oficina_quotes::config::PaginationSettings;
use oficina_quotes::domain::entities::{Quote, QuoteItem};
use oficina_quotes::domain::services::calculate_quote_totals;
use oficina_quotes::domain::value_objects::{CustomerId, Money, QuoteItemType};
use oficina_quotes::infrastructure::persistence::in_memory::{
    InMemoryCustomerRepository, InMemoryQuoteRepository,
};
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;

fn items(count: i64) -> Vec<QuoteItem> {
    (0..count)
        .map(|i| {
            QuoteItem::create(
                Money::from_cents(1_000 + i),
                i % 5 + 1,
                QuoteItemType::Part,
                None,
            )
            .unwrap()
        })
        .collect()
}

fn bench_calculate_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("totals/calculate");
    for count in [1, 10, 100, 1_000] {
        let items = items(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| calculate_quote_totals(black_box(items)).unwrap());
        });
    }
    group.finish();
}

fn bench_add_item(c: &mut Criterion) {
    let base = Quote::builder(CustomerId::new("bench"))
        .items(items(50))
        .build()
        .unwrap();
    let extra = items(1).remove(0);

    c.bench_function("quote/add_item_to_50", |b| {
        b.iter(|| {
            let mut quote = base.clone();
            quote.add_item(black_box(extra.clone())).unwrap();
            quote
        });
    });
}

fn bench_service_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = QuoteService::new(
        Arc::new(InMemoryQuoteRepository::new()),
        Arc::new(InMemoryCustomerRepository::with_customers([CustomerId::new("bench")])),
        PaginationSettings::default(),
    );

    c.bench_function("service/create_quote", |b| {
        b.iter(|| {
            rt.block_on(async {
                let cmd = CreateQuote::new("bench")
                    .with_item(NewQuoteItem::new(Decimal::new(4590, 2), 2, "PART"))
                    .with_item(NewQuoteItem::new(Decimal::new(12000, 2), 1, "SERVICE"));
                service.create_quote(cmd).await.unwrap()
            })
        });
    });
}

criterion_group!(
    benches,
    bench_calculate_totals,
    bench_add_item,
    bench_service_create
);
criterion_main!(benches);
