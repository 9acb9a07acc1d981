//! Criterion benchmarks for the confit file codecs.
//!
//! Measures dump and load latency for representative documents across all
//! three codecs.  The numbers include file I/O, which is part of the
//! operation as applications experience it; run on a tmpfs to isolate pure
//! serialization cost.
//!
//! Run with:
//! ```bash
//! cargo bench --package confit-codecs --bench codec_bench
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use confit_codecs::{BinarySerializer, JsonSerializer, TomlSerializer};
use confit_core::{ConfigMap, ConfigValue, Serializer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

// ── Document fixtures ─────────────────────────────────────────────────────────

/// A handful of top-level scalars, the shape of a small tool's settings.
fn make_flat_doc() -> ConfigMap {
    let mut doc = ConfigMap::new();
    doc.insert("name", "benchmark");
    doc.insert("port", 24800_i64);
    doc.insert("workers", 8_i64);
    doc.insert("debug", false);
    doc.insert("timeout_secs", 30.0);
    doc.insert("data_dir", "/var/lib/bench");
    doc
}

/// A few sections with arrays, the shape of a typical application config.
fn make_nested_doc() -> ConfigMap {
    let mut server = ConfigMap::new();
    server.insert("host", "0.0.0.0");
    server.insert("port", 24800_i64);
    server.insert("tls", true);

    let mut logging = ConfigMap::new();
    logging.insert("level", "info");
    logging.insert("targets", vec!["stdout", "file"]);

    let mut doc = ConfigMap::new();
    doc.insert("server", server);
    doc.insert("logging", logging);
    doc.insert(
        "thresholds",
        ConfigValue::Array(vec![
            ConfigValue::Integer(10),
            ConfigValue::Integer(50),
            ConfigValue::Integer(90),
        ]),
    );
    doc
}

/// One hundred sections of eight keys each, the shape of a config that has
/// been accreting for years.
fn make_large_doc() -> ConfigMap {
    let mut doc = ConfigMap::new();
    for section_index in 0..100 {
        let mut section = ConfigMap::new();
        for key_index in 0..8 {
            section.insert(format!("key_{key_index}"), section_index * 8 + key_index);
        }
        section.insert("label", format!("section number {section_index}"));
        doc.insert(format!("section_{section_index:03}"), section);
    }
    doc
}

fn codecs() -> Vec<(&'static str, Arc<dyn Serializer>)> {
    vec![
        ("toml", Arc::new(TomlSerializer::new()) as Arc<dyn Serializer>),
        ("json", Arc::new(JsonSerializer::new())),
        ("binary", Arc::new(BinarySerializer::new())),
    ]
}

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("confit_bench_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create bench scratch dir");
    dir
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `dump` for every codec and document shape.
fn bench_dump(c: &mut Criterion) {
    let dir = scratch_dir();
    let docs = [
        ("flat", make_flat_doc()),
        ("nested", make_nested_doc()),
        ("large", make_large_doc()),
    ];

    let mut group = c.benchmark_group("dump");
    for (codec_name, serializer) in codecs() {
        for (doc_name, doc) in &docs {
            let file = dir.join(format!("{codec_name}_{doc_name}.out"));
            group.bench_with_input(BenchmarkId::new(codec_name, doc_name), doc, |b, doc| {
                b.iter(|| {
                    serializer
                        .dump(black_box(&file), black_box(doc))
                        .expect("dump must succeed")
                })
            });
        }
    }
    group.finish();

    std::fs::remove_dir_all(&dir).ok();
}

/// Benchmarks `load` from pre-dumped files.
fn bench_load(c: &mut Criterion) {
    let dir = scratch_dir();
    let docs = [
        ("flat", make_flat_doc()),
        ("nested", make_nested_doc()),
        ("large", make_large_doc()),
    ];

    let mut group = c.benchmark_group("load");
    for (codec_name, serializer) in codecs() {
        for (doc_name, doc) in &docs {
            let file = dir.join(format!("{codec_name}_{doc_name}.out"));
            serializer.dump(&file, doc).expect("bench setup dump");

            group.bench_with_input(BenchmarkId::new(codec_name, doc_name), &file, |b, file| {
                b.iter(|| serializer.load(black_box(file)).expect("load must succeed"))
            });
        }
    }
    group.finish();

    std::fs::remove_dir_all(&dir).ok();
}

/// Benchmarks a full dump+load cycle with the everyday document shape.
fn bench_roundtrip(c: &mut Criterion) {
    let dir = scratch_dir();
    let doc = make_nested_doc();

    let mut group = c.benchmark_group("dump_load_roundtrip");
    for (codec_name, serializer) in codecs() {
        let file = dir.join(format!("{codec_name}_roundtrip.out"));
        group.bench_function(codec_name, |b| {
            b.iter(|| {
                serializer
                    .dump(black_box(&file), black_box(&doc))
                    .expect("dump must succeed");
                serializer.load(black_box(&file)).expect("load must succeed")
            })
        });
    }
    group.finish();

    std::fs::remove_dir_all(&dir).ok();
}

criterion_group!(benches, bench_dump, bench_load, bench_roundtrip);
criterion_main!(benches);
