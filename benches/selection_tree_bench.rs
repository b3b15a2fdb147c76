//! Benchmark for SelectionTree vs standard BinaryHeap.
//!
//! The heap only supports replacing its maximum, so the update benchmark
//! compares against a full rescan of a Vec instead.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use knockout::tree::SelectionTree;
use std::collections::BinaryHeap;
use std::hint::black_box;

// =============================================================================
// build Benchmark
// =============================================================================

fn benchmark_build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("build");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("SelectionTree", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let tree: SelectionTree<i32> = (0..size).map(black_box).collect();
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BinaryHeap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let heap: BinaryHeap<i32> = (0..size).map(black_box).collect();
                black_box(heap)
            });
        });
    }

    group.finish();
}

// =============================================================================
// update Benchmark
// =============================================================================

fn benchmark_update(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("update");

    for size in [100_usize, 1000, 10000] {
        let values: Vec<i32> = (0..size).map(|index| i32::try_from(index).unwrap_or(i32::MAX)).collect();

        group.bench_with_input(
            BenchmarkId::new("SelectionTree", size),
            &values,
            |bencher, values| {
                let mut tree: SelectionTree<i32> = values.iter().copied().collect();
                let mut step = 0_usize;
                bencher.iter(|| {
                    step = (step + 7919) % values.len();
                    tree.update(black_box(step), black_box(values[step] ^ 0x55)).ok();
                    black_box(tree.winner().copied())
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("VecRescan", size), &values, |bencher, values| {
            let mut vector = values.clone();
            let mut step = 0_usize;
            bencher.iter(|| {
                step = (step + 7919) % vector.len();
                vector[black_box(step)] = black_box(values[step] ^ 0x55);
                black_box(vector.iter().max().copied())
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert / delete Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("SelectionTree", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut tree = SelectionTree::new();
                    for value in 0..size {
                        tree.insert(black_box(value));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BinaryHeap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut heap = BinaryHeap::new();
                for value in 0..size {
                    heap.push(black_box(value));
                }
                black_box(heap)
            });
        });
    }

    group.finish();
}

fn benchmark_delete_last(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("delete_last");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("SelectionTree", size),
            &size,
            |bencher, &size| {
                bencher.iter_batched(
                    || (0..size).collect::<SelectionTree<i32>>(),
                    |mut tree| {
                        while !tree.is_empty() {
                            let last = tree.len() - 1;
                            black_box(tree.delete(last).ok());
                        }
                        tree
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_update,
    benchmark_insert,
    benchmark_delete_last
);

criterion_main!(benches);
