// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Benchmarks for cell reconciliation and decoding.

use cadmiumdb::cell::{compare_for_merge, merge_candidates, AtomicCell, AtomicCellView};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

fn random_cell() -> AtomicCell {
    // Timestamps drawn from a small range so the deeper tie-break rules
    // are exercised, not just rule 1.
    let ts = (rand::random::<u32>() % 4) as i64;
    match rand::random::<u32>() % 4 {
        0 => AtomicCell::make_dead(ts, rand::random::<u64>() % 1000),
        1 => {
            let value: Vec<u8> = (0..32).map(|_| rand::random::<u8>()).collect();
            AtomicCell::make_live(ts, value.as_slice())
        }
        2 => {
            let value: Vec<u8> = (0..32).map(|_| rand::random::<u8>()).collect();
            AtomicCell::make_live_expiring(
                ts,
                value.as_slice(),
                rand::random::<u64>() % 1000,
                rand::random::<u64>() % 100,
            )
        }
        _ => AtomicCell::make_live_counter_update(ts, rand::random::<i64>()),
    }
}

fn cell_pool(n: usize) -> Vec<AtomicCell> {
    (0..n).map(|_| random_cell()).collect()
}

fn bench_compare(c: &mut Criterion) {
    let pool = cell_pool(1024);

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(1));

    group.bench_function("compare_for_merge", |b| {
        b.iter_batched(
            || {
                let i = rand::random::<u32>() as usize % pool.len();
                let j = rand::random::<u32>() as usize % pool.len();
                (pool[i].view(), pool[j].view())
            },
            |(left, right)| compare_for_merge(left, right),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_merge_candidates(c: &mut Criterion) {
    let pool = cell_pool(1024);

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(16));

    group.bench_function("merge_candidates_16", |b| {
        b.iter_batched(
            || {
                (0..16)
                    .map(|_| pool[rand::random::<u32>() as usize % pool.len()].view())
                    .collect::<Vec<AtomicCellView<'_>>>()
            },
            |candidates| merge_candidates(candidates).unwrap().timestamp(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoded: Vec<Vec<u8>> = cell_pool(1024)
        .into_iter()
        .map(|cell| cell.into_bytes())
        .collect();

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(1));

    group.bench_function("decode_view", |b| {
        b.iter_batched(
            || rand::random::<u32>() as usize % encoded.len(),
            |i| AtomicCellView::from_bytes(&encoded[i]).unwrap().timestamp(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_compare, bench_merge_candidates, bench_decode);
criterion_main!(benches);
