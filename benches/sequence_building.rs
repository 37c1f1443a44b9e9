//! Benchmark suite for sequence building.
//!
//! Run with: `cargo bench`
//!
//! This benchmark measures:
//! - Single-appearance expansion across window lengths
//! - Full builds, sequential vs. parallel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pitch_sequencer::prelude::*;

const FEATURES: usize = 24;

fn layout() -> TableLayout {
    TableLayout::pitch_and_zones(FEATURES, 7, 3, 3)
}

/// Appearance with `n` pitches and deterministic feature values.
fn create_appearance(key: usize, n: usize) -> Appearance {
    let rows = (1..=n)
        .map(|p| {
            let mut values: Vec<f64> = (0..FEATURES)
                .map(|f| ((key * 31 + p * 7 + f) % 11) as f64 / 10.0)
                .collect();
            let mut pitch = vec![0.0; 7];
            pitch[(key + p) % 7] = 1.0;
            let mut vertical = vec![0.0; 3];
            vertical[p % 3] = 1.0;
            let mut horizontal = vec![0.0; 3];
            horizontal[(key + 2 * p) % 3] = 1.0;
            values.extend(pitch);
            values.extend(vertical);
            values.extend(horizontal);
            PitchRow::new(p as f64, values)
        })
        .collect();
    Appearance::new(key as f64, rows)
}

/// A season-sized set of appearances (1 to 10 pitches each).
fn create_appearances(count: usize) -> Vec<Appearance> {
    (0..count)
        .map(|a| create_appearance(a, (a * 7) % 10 + 1))
        .collect()
}

fn bench_single_appearance(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_appearance");
    let appearance = create_appearance(1, 12);

    for max_length in [2usize, 4, 8, 12] {
        let builder = SequenceBuilder::new(SequenceConfig::new(max_length), layout()).unwrap();
        group.throughput(Throughput::Elements(
            builder.config().windows_for_length(12) as u64,
        ));
        group.bench_with_input(
            BenchmarkId::new("max_length", max_length),
            &appearance,
            |b, appearance| b.iter(|| builder.sequence_appearance(black_box(appearance))),
        );
    }

    group.finish();
}

fn bench_full_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_build");
    group.sample_size(20);

    let appearances = create_appearances(2_000);
    let builder = SequenceBuilder::new(SequenceConfig::new(6), layout()).unwrap();

    group.bench_function("sequential", |b| {
        b.iter(|| builder.build(black_box(&appearances)))
    });

    for threads in [2usize, 4] {
        let processor =
            BatchProcessor::new(builder.clone(), BatchConfig::new().with_threads(threads));
        group.bench_with_input(
            BenchmarkId::new("parallel", threads),
            &appearances,
            |b, appearances| b.iter(|| processor.process(black_box(appearances))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_appearance, bench_full_build);
criterion_main!(benches);
