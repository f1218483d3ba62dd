//! Benchmarks for the reasoning pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use polylogos::engine::Engine;
use polylogos::metrics::EngineMetrics;
use polylogos::operator::OperatorTable;
use polylogos::paradigm::{Classical, Paradigm, Temporal};

const INPUT: &str = "If it rains then the ground is wet. It rains. \
                     All roads are slippery. Maybe the match is cancelled.";

fn bench_extract(c: &mut Criterion) {
    let operators = OperatorTable::seeded(Classical::new().operators()).unwrap();
    let metrics = EngineMetrics::new();

    c.bench_function("extract", |bench| {
        bench.iter(|| black_box(polylogos::extract::extract(INPUT, None, &operators, &metrics)))
    });
}

fn bench_classical_reason(c: &mut Criterion) {
    let engine = Engine::new(Classical::new());
    engine.initialize().unwrap();

    c.bench_function("classical_reason", |bench| {
        bench.iter(|| black_box(engine.reason(INPUT, None).unwrap()))
    });
}

fn bench_temporal_reason(c: &mut Criterion) {
    let engine = Engine::new(Temporal::new());
    engine.initialize().unwrap();
    let input = "I will finish the report. I finished the plan. The review was yesterday.";

    c.bench_function("temporal_reason", |bench| {
        bench.iter(|| black_box(engine.reason(input, None).unwrap()))
    });
}

criterion_group!(benches, bench_extract, bench_classical_reason, bench_temporal_reason);
criterion_main!(benches);
