use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use streamgraph::api::{ChartDefaults, ResolvedChartOptions, StreamChart, StyleBag, TipMode};
use streamgraph::core::{CanonicalRecord, StackLayout, StreamOffset, stack_columns};

fn generated_records(dates: u64, categories: usize) -> Vec<CanonicalRecord> {
    let base = NaiveDate::from_ymd_opt(1880, 1, 1).expect("valid date");
    (0..dates)
        .flat_map(|day| {
            let date = base.checked_add_days(Days::new(day * 365)).expect("in range");
            (0..categories).map(move |category| {
                let value = 100.0 + ((day as f64) * 0.37 + category as f64).sin().abs() * 1_000.0;
                CanonicalRecord::new(date, format!("name-{category:02}"), value)
            })
        })
        .collect()
}

fn bench_stack_columns_wiggle(c: &mut Criterion) {
    let values: Vec<Vec<f64>> = (0..20)
        .map(|layer| (0..500).map(|column| f64::from((layer * 7 + column) % 50 + 1)).collect())
        .collect();

    c.bench_function("stack_columns_wiggle_20x500", |b| {
        b.iter(|| stack_columns(black_box(&values), black_box(StreamOffset::Wiggle)))
    });
}

fn bench_stack_layout_from_records(c: &mut Criterion) {
    let records = generated_records(140, 10);

    c.bench_function("stack_layout_from_records_1400", |b| {
        b.iter(|| StackLayout::from_records(black_box(&records), black_box(StreamOffset::Silhouette)))
    });
}

fn bench_configure_and_build_frame(c: &mut Criterion) {
    let records = generated_records(140, 10);
    let mut options =
        ResolvedChartOptions::resolve(&StyleBag::new(), &ChartDefaults::default(), None);
    options.tip = TipMode::Custom;

    c.bench_function("stream_chart_configure_and_frame", |b| {
        b.iter(|| {
            let chart = StreamChart::configure(black_box(records.clone()), black_box(&options))
                .expect("configure");
            let _ = chart.build_frame(None).expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_stack_columns_wiggle,
    bench_stack_layout_from_records,
    bench_configure_and_build_frame
);
criterion_main!(benches);
