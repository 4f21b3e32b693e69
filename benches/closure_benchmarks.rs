//! Benchmark suite for the record analyses
//!
//! Both engines are quadratic in the batch size, so the interesting axis is
//! the record count. Batches are generated deterministically so results are
//! comparable across runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use faultsift::{compute_dominance, minimize, FaultRecord, SignatureRule, Ternary};

const SIZES: [usize; 4] = [10, 50, 200, 500];

/// Deterministic pseudo-random batch. A small multiplicative generator keeps
/// the attribute mix stable without pulling in a random-number crate.
fn synthetic_batch(n: usize) -> Vec<FaultRecord> {
    let mut state: u64 = 0x9e37_79b9;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as u32
    };
    let ternary = |v: u32| match v % 3 {
        0 => Ternary::Zero,
        1 => Ternary::One,
        _ => Ternary::DontCare,
    };
    let ops = ["R0", "R1", "W0", "W1", "W1, R1", "W0, R0"];

    (0..n)
        .map(|_| {
            FaultRecord::new(
                ternary(next()),
                ternary(next()),
                ternary(next()),
                ternary(next()),
                ops[(next() as usize) % ops.len()],
            )
        })
        .collect()
}

fn bench_dominance(c: &mut Criterion) {
    let mut group = c.benchmark_group("dominance");

    for n in SIZES {
        let batch = synthetic_batch(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("exact", n), &batch, |b, data| {
            b.iter(|| {
                let mut records = data.clone();
                compute_dominance(&mut records, SignatureRule::Exact);
                black_box(records);
            });
        });
        group.bench_with_input(BenchmarkId::new("superset", n), &batch, |b, data| {
            b.iter(|| {
                let mut records = data.clone();
                compute_dominance(&mut records, SignatureRule::Superset);
                black_box(records);
            });
        });
    }

    group.finish();
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for n in SIZES {
        let batch = synthetic_batch(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("closure_and_cover", n), &batch, |b, data| {
            b.iter(|| {
                let result = minimize(black_box(data)).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dominance, bench_minimize);
criterion_main!(benches);
