// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Two hot paths:
//   1. Head injection decision — runs on every page render
//   2. Script save — temp file write + no-clobber rename

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use lucence::assets::{AssetName, AssetStore};
use lucence::head::HeadInjector;

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_head(c: &mut Criterion) {
    let injector = HeadInjector::default();
    let mut group = c.benchmark_group("head");

    group.bench_function("decide_match", |b| {
        b.iter(|| injector.decide(black_box("post")).len())
    });

    group.bench_function("decide_miss", |b| {
        b.iter(|| injector.decide(black_box("archive")).len())
    });

    group.bench_function("render_match", |b| {
        b.iter(|| injector.render(black_box("page")))
    });

    group.finish();
}

fn bench_save(c: &mut Criterion) {
    let dir = TempDir::new().expect("create temp dir");
    let store = AssetStore::new(dir.path().join("lucence"));
    store.init().expect("init store");
    let payload = "console.log('lucence');\n".repeat(2048);
    let mut counter = 0u64;

    c.bench_function("save_48k_script", |b| {
        b.iter(|| {
            counter += 1;
            let name = AssetName::parse(&format!("bench-{counter}")).expect("valid name");
            store
                .save(&name, black_box(payload.as_bytes()))
                .expect("save script");
        })
    });
}

criterion_group!(benches, bench_head, bench_save);
criterion_main!(benches);
