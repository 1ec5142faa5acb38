//! Benchmarks for the scenesync pipeline.

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::RgbaImage;
use tempfile::tempdir;

use scenesync::pass::{apply, SyncPass};
use scenesync::{JsonStyle, PaddingPlan, Reach, SceneDocument};

/// Build a portrait-style document: `layers` top-level layers, each with
/// `depth` nested expression layers.
fn synthetic_document(layers: usize, depth: usize) -> String {
    fn nested(prefix: &str, depth: usize) -> String {
        if depth == 0 {
            return String::new();
        }
        format!(
            r#", "children": [{{"path": "{prefix}/d{depth}", "left": 3, "top": 4, "opacity": 1{}}}]"#,
            nested(prefix, depth - 1)
        )
    }

    let children: Vec<String> = (0..layers)
        .map(|i| {
            format!(
                r#"{{"path": "layer{i}", "left": {}, "top": {}, "width": 120, "height": 240, "blend": "normal"{}}}"#,
                i * 2,
                i * 3,
                nested(&format!("layer{i}"), depth)
            )
        })
        .collect();

    format!(r#"{{"name": "bench", "children": [{}]}}"#, children.join(", "))
}

fn write_assets(dir: &Path, layers: usize) {
    for i in 0..layers {
        RgbaImage::new(120, 240)
            .save(dir.join(format!("layer{}.png", i)))
            .unwrap();
    }
}

// -- Document benchmarks --

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("documents");

    let small = synthetic_document(4, 1);
    let large = synthetic_document(64, 6);

    group.bench_function("parse_small", |b| {
        b.iter(|| SceneDocument::from_json(black_box(&small)).unwrap())
    });

    group.bench_function("parse_large", |b| {
        b.iter(|| SceneDocument::from_json(black_box(&large)).unwrap())
    });

    let doc = SceneDocument::from_json(&large).unwrap();

    group.bench_function("serialize_compact", |b| {
        b.iter(|| black_box(&doc).to_json(JsonStyle::Compact).unwrap())
    });

    group.bench_function("serialize_pretty", |b| {
        b.iter(|| black_box(&doc).to_json(JsonStyle::Pretty).unwrap())
    });

    group.bench_function("walk_recursive", |b| {
        let mut doc = doc.clone();
        b.iter(|| {
            let mut visited = 0usize;
            doc.walk_mut(Reach::Recursive, &mut |_, _| visited += 1);
            black_box(visited)
        })
    });

    group.finish();
}

// -- Asset benchmarks --

fn bench_assets(c: &mut Criterion) {
    let mut group = c.benchmark_group("assets");

    group.bench_function("padding_plan", |b| {
        b.iter(|| PaddingPlan::compute(black_box(10), black_box(100), 200, 300, 480))
    });

    let dir = tempdir().unwrap();
    write_assets(dir.path(), 16);
    let source = synthetic_document(16, 0);
    fs::write(dir.path().join("scene.json"), &source).unwrap();

    group.bench_function("sync_16_layers", |b| {
        b.iter(|| {
            let mut doc = SceneDocument::from_json(&source).unwrap();
            apply(&SyncPass, &mut doc, dir.path())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_documents, bench_assets);
criterion_main!(benches);
