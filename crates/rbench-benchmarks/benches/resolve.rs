//! Module resolution performance benchmarks
//!
//! Compares the caching engine against the straight-through engine over
//! the same fixture tree: the criterion view of what the rbench binary
//! measures.

use camino::{Utf8Path, Utf8PathBuf};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::fs;

use rbench_benchmarks::criterion_config;
use rbench_resolver::{CacheConfig, CachedResolver, DirectResolver, ResolveOptions};

/// Same request mix as the rbench binary
const SPECIFIERS: &[&str] = &["./entry.js", "./lib/math", "alpha", "@scope/beta", "gamma/util"];

fn write_fixture(root: &Utf8Path) {
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("entry.js"), "import './lib/math';\n").unwrap();
    fs::write(root.join("lib/math.js"), "export const add = (a, b) => a + b;\n").unwrap();

    let alpha = root.join("node_modules/alpha");
    fs::create_dir_all(alpha.join("lib")).unwrap();
    fs::write(
        alpha.join("package.json"),
        r#"{"name": "alpha", "version": "1.0.0", "main": "lib/alpha.js"}"#,
    )
    .unwrap();
    fs::write(alpha.join("lib/alpha.js"), "module.exports = 'alpha';\n").unwrap();

    let beta = root.join("node_modules/@scope/beta");
    fs::create_dir_all(beta.join("dist")).unwrap();
    fs::write(
        beta.join("package.json"),
        r#"{"name": "@scope/beta", "version": "2.1.0", "main": "./dist/beta.js"}"#,
    )
    .unwrap();
    fs::write(beta.join("dist/beta.js"), "module.exports = 'beta';\n").unwrap();

    let gamma = root.join("node_modules/gamma");
    fs::create_dir_all(&gamma).unwrap();
    fs::write(gamma.join("package.json"), r#"{"name": "gamma", "version": "0.2.0"}"#).unwrap();
    fs::write(gamma.join("index.js"), "module.exports = 'gamma';\n").unwrap();
    fs::write(gamma.join("util.js"), "module.exports = 'gamma/util';\n").unwrap();
}

fn bench_resolution(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    write_fixture(&root);

    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("module_resolution");
    group.throughput(Throughput::Elements(SPECIFIERS.len() as u64));

    let cached = CachedResolver::new(ResolveOptions::default(), CacheConfig::default());
    group.bench_function("cached", |b| {
        b.to_async(&rt).iter(|| async {
            for request in SPECIFIERS {
                black_box(cached.resolve(&root, request).await.unwrap());
            }
        });
    });

    let direct = DirectResolver::new(ResolveOptions::default());
    group.bench_function("direct", |b| {
        b.iter(|| {
            for request in SPECIFIERS {
                black_box(direct.resolve(&root, request).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_resolution
}
criterion_main!(benches);
