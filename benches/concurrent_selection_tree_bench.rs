//! Benchmark for ConcurrentSelectionTree read paths under contention.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use knockout::concurrent::{ConcurrentSelectionTree, ReadPath};
use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

// =============================================================================
// winner Benchmark
// =============================================================================

fn benchmark_uncontended_winner(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("winner_uncontended");

    for read_path in [ReadPath::Snapshot, ReadPath::Locked] {
        let tree = ConcurrentSelectionTree::from_iter(0..1024).with_read_path(read_path);
        group.bench_function(BenchmarkId::from_parameter(format!("{read_path:?}")), |bencher| {
            bencher.iter(|| black_box(tree.winner()));
        });
    }

    group.finish();
}

fn benchmark_contended_winner(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("winner_with_writer");

    for read_path in [ReadPath::Snapshot, ReadPath::Locked] {
        let tree = Arc::new(ConcurrentSelectionTree::from_iter(0..1024).with_read_path(read_path));
        let stop = Arc::new(AtomicBool::new(false));

        let writer = {
            let tree = Arc::clone(&tree);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut step = 0;
                while !stop.load(Ordering::Relaxed) {
                    step = (step + 31) % 1024;
                    tree.update(step, i32::try_from(step).unwrap_or(0) ^ 0x3ff).ok();
                }
            })
        };

        group.bench_function(BenchmarkId::from_parameter(format!("{read_path:?}")), |bencher| {
            bencher.iter(|| black_box(tree.winner()));
        });

        stop.store(true, Ordering::Relaxed);
        writer.join().ok();
    }

    group.finish();
}

criterion_group!(benches, benchmark_uncontended_winner, benchmark_contended_winner);

criterion_main!(benches);
