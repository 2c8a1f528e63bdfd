//! Common utilities for benchmarks

use criterion::Criterion;
use indexmap::IndexMap;
use pprof::criterion::{Output, PProfProfiler};

use py3deps_core::types::{PrivateDirDetails, ScanStatistics, Shebang, Version};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Statistics for a package with `dir_count` private directories
///
/// Every directory compiles, carries an extension for one of 3.4..=3.9 and
/// a mix of versioned and unversioned shebangs.
pub fn create_scan_statistics(dir_count: usize) -> ScanStatistics {
    let mut private_dirs = IndexMap::new();
    for i in 0..dir_count {
        let minor = 4 + (i % 6) as u32;
        let shebangs = vec![
            Shebang::new("python3", None),
            Shebang::new(format!("python3.{}", minor), Some(Version::new(3, minor))),
        ];
        private_dirs.insert(
            format!("/usr/share/pkg{}", i),
            PrivateDirDetails {
                shebangs,
                compile: true,
                ext: [Version::new(3, minor)].into_iter().collect(),
            },
        );
    }

    ScanStatistics {
        ext: (4..10).map(|minor| Version::new(3, minor)).collect(),
        shebangs: vec![Shebang::new("python3", None)],
        compile: true,
        private_dirs,
        requires: Vec::new(),
    }
}
