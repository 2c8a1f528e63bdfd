//! Input parsing performance benchmarks
//!
//! Benchmarks parsing of scan statistics JSON, py3deps.toml and version
//! range strings.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use py3deps_benchmarks::{create_scan_statistics, criterion_config};
use py3deps_config::toml::parse_py3deps_toml;
use py3deps_config::parse_debian_defaults;
use py3deps_core::types::{ScanStatistics, VersionRange};

/// Benchmark statistics parsing for different numbers of private directories
fn bench_stats_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_parsing");

    for dir_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*dir_count as u64));
        let json = serde_json::to_string(&create_scan_statistics(*dir_count))
            .expect("statistics serialize");

        group.bench_with_input(BenchmarkId::new("private_dirs", dir_count), &json, |b, json| {
            b.iter(|| black_box(ScanStatistics::from_json(json).expect("statistics parse")))
        });
    }

    group.finish();
}

/// Benchmark configuration file parsing
fn bench_config_parsing(c: &mut Criterion) {
    let toml = r#"
[policy]
default-version = "3.6"
supported-versions = ["3.5", "3.6", "3.7"]

[options]
vrange = ">= 3.5, << 3.8"
guess-deps = true
depends = ["python3-bar (>= 1.0)", "python3-baz"]
exclude = ["test_*", "*.pyc"]
"#;
    let defaults = "[DEFAULT]\ndefault-version = python3.6\nsupported-versions = python3.5, python3.6, python3.7\n";

    c.bench_function("py3deps_toml", |b| b.iter(|| black_box(parse_py3deps_toml(toml))));
    c.bench_function("debian_defaults", |b| b.iter(|| black_box(parse_debian_defaults(defaults))));
}

/// Benchmark version range parsing in every accepted form
fn bench_vrange_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("vrange_parsing");

    for input in ["3.6", "3.5-", "-3.8", "3.5-3.8", "-", ">= 3.5, << 3.8"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| black_box(VersionRange::parse(input)))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_stats_parsing, bench_config_parsing, bench_vrange_parsing
}
criterion_main!(benches);
