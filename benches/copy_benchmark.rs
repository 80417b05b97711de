//! Performance benchmarks for SortCopy
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

/// Create a test file of the specified size
fn create_test_file(dir: &std::path::Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();

    let chunk_size = 64 * 1024;
    let chunk: Vec<u8> = (0..chunk_size).map(|i| (i % 256) as u8).collect();
    let mut remaining = size;

    while remaining > 0 {
        let to_write = remaining.min(chunk_size);
        file.write_all(&chunk[..to_write]).unwrap();
        remaining -= to_write;
    }

    path
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

fn bench_sort_small_files(c: &mut Criterion) {
    let src_dir = TempDir::new().unwrap();
    let rt = runtime();

    // 500 small files spread over five extensions
    for i in 0..500 {
        let ext = ["txt", "log", "csv", "json", "bin"][i % 5];
        create_test_file(src_dir.path(), &format!("file_{}.{}", i, ext), 1024);
    }

    let mut group = c.benchmark_group("sort_500_small_files");

    for limit in [0usize, 16] {
        group.bench_with_input(BenchmarkId::new("max_concurrency", limit), &limit, |b, &limit| {
            b.iter(|| {
                let dst_dir = TempDir::new().unwrap();
                let dispatcher = sortcopy::core::Dispatcher::new().with_max_concurrency(limit);
                black_box(rt.block_on(dispatcher.dispatch(src_dir.path(), dst_dir.path())))
            });
        });
    }

    group.finish();
}

fn bench_copy_large_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_file_copy");
    let rt = runtime();

    for size in [1024 * 1024, 10 * 1024 * 1024, 100 * 1024 * 1024].iter() {
        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();

        let src_file = create_test_file(src_dir.path(), "large.bin", *size);

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("bucket", humansize::format_size(*size as u64, humansize::BINARY)),
            size,
            |b, _| {
                let copier = sortcopy::fs::BucketCopier::default_copier();
                b.iter(|| black_box(rt.block_on(copier.try_copy(&src_file, dst_dir.path()))));
            },
        );
    }

    group.finish();
}

fn bench_tree_walk(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();

    // Create test structure
    for i in 0..10 {
        let subdir = dir.path().join(format!("subdir_{}", i));
        std::fs::create_dir_all(&subdir).unwrap();

        for j in 0..100 {
            create_test_file(&subdir, &format!("file_{}.txt", j), 1024);
        }
    }

    c.bench_function("walk_1000_files", |b| {
        b.iter(|| {
            let walker = sortcopy::fs::TreeWalker::default();
            black_box(walker.collect(dir.path()).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_sort_small_files,
    bench_copy_large_file,
    bench_tree_walk
);

criterion_main!(benches);
