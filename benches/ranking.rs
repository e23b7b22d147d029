//! Benchmarks for report synthesis and waste ranking
//!
//! Measures synthesis and ranking over large synthetic projects to keep a
//! full analysis of a monorepo-sized scan well under a second.

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use usagescope::analysis::count_usage;
use usagescope::model::{
    AttributionResult, FileUsageSnapshot, ImportBinding, Location, ResolvedImport,
};
use usagescope::report::{rank_top_n, synthesize, RemovalCandidateWeights};

/// Create `files` snapshots, each importing `imports_per_file` symbols spread
/// over `dependencies` packages. Every third symbol is left unused.
fn create_snapshots(
    files: usize,
    imports_per_file: usize,
    dependencies: usize,
) -> Vec<FileUsageSnapshot> {
    (0..files)
        .map(|f| {
            let path = format!("src/file_{}.py", f);
            let mut text = String::new();
            let mut imports = Vec::with_capacity(imports_per_file);

            for i in 0..imports_per_file {
                let dep = format!("pkg-{}", (f + i) % dependencies);
                let symbol = format!("Sym{}", i);
                text.push_str(&format!("from {} import {}\n", dep, symbol));
                imports.push(ResolvedImport {
                    binding: ImportBinding::named(
                        dep.clone(),
                        symbol.clone(),
                        symbol,
                        Location::new(path.clone(), i + 1, 1),
                    ),
                    attribution: AttributionResult {
                        dependency_id: dep,
                        ambiguous: false,
                        undeclared: false,
                    },
                });
            }
            for i in (0..imports_per_file).filter(|i| i % 3 != 0) {
                text.push_str(&format!("value = Sym{}()\n", i));
            }

            let bindings: Vec<ImportBinding> = imports.iter().map(|r| r.binding.clone()).collect();
            FileUsageSnapshot {
                usage: count_usage(&text, &bindings),
                path,
                text,
                imports,
            }
        })
        .collect()
}

/// Benchmark lexical usage counting for a single file
fn bench_count_usage(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_usage");

    for imports in [10, 50, 200].iter() {
        let snapshot = create_snapshots(1, *imports, 10).remove(0);
        let bindings: Vec<ImportBinding> =
            snapshot.imports.iter().map(|r| r.binding.clone()).collect();

        group.bench_with_input(BenchmarkId::new("imports", imports), imports, |b, _| {
            b.iter(|| black_box(count_usage(&snapshot.text, &bindings)));
        });
    }

    group.finish();
}

/// Benchmark synthesizing one report per dependency
fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for files in [100, 500, 1000].iter() {
        let snapshots = create_snapshots(*files, 20, 50);

        group.bench_with_input(BenchmarkId::new("files", files), files, |b, _| {
            b.iter(|| {
                for d in 0..50 {
                    black_box(synthesize(&format!("pkg-{}", d), &snapshots, 20));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark ranking with default and composite weights
fn bench_rank_top_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_top_n");

    let snapshots = create_snapshots(200, 20, 500);
    let mut reports = BTreeMap::new();
    for d in 0..500 {
        let (report, _) = synthesize(&format!("pkg-{}", d), &snapshots, 20);
        reports.insert(report.name.clone(), report);
    }
    let reports: Vec<_> = reports.into_values().collect();

    let weights = [
        ("default", RemovalCandidateWeights::default()),
        ("composite", RemovalCandidateWeights::new(0.6, 0.3, 0.1)),
    ];
    for (label, weights) in weights.iter() {
        group.bench_with_input(BenchmarkId::new("weights", label), label, |b, _| {
            b.iter(|| black_box(rank_top_n(10, &reports, weights)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_count_usage, bench_synthesize, bench_rank_top_n);
criterion_main!(benches);
