//! Criterion benchmarks for the aggregation and filter pipeline

use chrono::{Duration, TimeZone, Utc};
use creatrack::services::bucketing::Bucketing;
use creatrack::services::filter::FilterPipeline;
use creatrack::services::merge::CreativeAggregator;
use creatrack::types::{Filters, RawRecord};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Synthetic export: `rows` daily rows spread over 90 days, 200 creatives,
/// 40 ad sets, 10 accounts
fn synthetic_rows(rows: usize) -> Vec<RawRecord> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    (0..rows)
        .map(|i| RawRecord {
            date: start + Duration::days((i % 90) as i64),
            cost: 10.0 + (i % 37) as f64,
            cost_per_lead: if i % 5 == 0 { 0.0 } else { 20.0 + (i % 11) as f64 },
            cost_per_click: 2.0 + (i % 7) as f64,
            account_name: format!("Account {}", i % 10),
            campaign_name: format!("Campaign {}", i % 25),
            campaign_status: "ACTIVE".into(),
            creative_id: Some(format!("cr-{}", i % 200)),
            creative_name: format!("Creative {}", i % 200),
            image_url: String::new(),
            ad_set_id: format!("as-{}", i % 40),
            ad_id: format!("ad-{i}"),
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for rows in [1_000usize, 10_000, 50_000] {
        let records = synthetic_rows(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &records, |b, records| {
            b.iter(|| CreativeAggregator::merge(black_box(records)));
        });
    }

    group.finish();
}

fn bench_filter_pipeline(c: &mut Criterion) {
    let records = synthetic_rows(10_000);
    let outcome = CreativeAggregator::merge(&records);
    let bucketing = Bucketing::with_now(
        chrono::FixedOffset::east_opt(9 * 3600).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 30, 0, 0, 0).unwrap(),
    );
    let filters = Filters {
        search: "creative 1".into(),
        accounts: Some(vec!["Account 3".into(), "Account 7".into()]),
        ..Default::default()
    };

    c.bench_function("filter_pipeline_10k_rows", |b| {
        b.iter(|| {
            FilterPipeline::apply(
                black_box(&outcome.creatives),
                black_box(&filters),
                &bucketing,
            )
        });
    });
}

criterion_group!(benches, bench_merge, bench_filter_pipeline);
criterion_main!(benches);
