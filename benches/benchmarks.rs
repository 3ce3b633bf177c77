use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

use seriate::{FieldDefinition, FieldType, FieldValue, Point, Query, Series, Store};

const DEFAULT_SEED: u64 = 0x_5345_5249_4154_4542; // fixed seed for stable benchmarks

fn generate_batches(seed: u64, batches: usize, points_per_batch: usize) -> Vec<Series> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ts = 0i64;
    (0..batches)
        .map(|_| Series {
            name: "cpu".to_string(),
            fields: vec![
                FieldDefinition::new("value", FieldType::Double),
                FieldDefinition::new("idle", FieldType::Double),
            ],
            points: (0..points_per_batch)
                .map(|_| {
                    ts += 1;
                    Point::new(
                        ts,
                        1,
                        vec![
                            Some(FieldValue::double(rng.random::<u32>() as f64 * 0.001)),
                            Some(FieldValue::double(rng.random::<u32>() as f64 * 0.001)),
                        ],
                    )
                })
                .collect(),
        })
        .collect()
}

fn bench_write_fixed_dataset(c: &mut Criterion) {
    let batches = generate_batches(DEFAULT_SEED, 100, 100);

    struct Fixture {
        _dir: TempDir,
        store: Store,
    }

    let mut group = c.benchmark_group("write");
    group.bench_function("write_10k_points_in_100_batches", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().expect("tempdir");
                let store = Store::open(dir.path()).expect("store open");
                Fixture { _dir: dir, store }
            },
            |fx| {
                for series in &batches {
                    fx.store.write_series(black_box("bench"), black_box(series)).unwrap();
                }
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_query_fixed_dataset(c: &mut Criterion) {
    let batches = generate_batches(DEFAULT_SEED, 100, 1_000);

    let dir = TempDir::new().expect("tempdir");
    let store = Store::open(dir.path()).expect("store open");
    for series in &batches {
        store.write_series("bench", series).unwrap();
    }
    store.flush().unwrap();

    let mut group = c.benchmark_group("query");

    let full = Query::new("cpu", vec!["value".to_string(), "idle".to_string()]).between(0, i64::MAX);
    group.bench_function("scan_100k_points_two_fields", |b| {
        b.iter(|| {
            let mut count = 0usize;
            store
                .query(black_box("bench"), &full, |series| {
                    count += series.points.len();
                    Ok(())
                })
                .unwrap();
            black_box(count)
        })
    });

    let narrow = Query::new("cpu", vec!["value".to_string()]).between(50_000, 51_000);
    group.bench_function("scan_1k_point_window_one_field", |b| {
        b.iter(|| {
            let mut count = 0usize;
            store
                .query(black_box("bench"), &narrow, |series| {
                    count += series.points.len();
                    Ok(())
                })
                .unwrap();
            black_box(count)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_write_fixed_dataset, bench_query_fixed_dataset);
criterion_main!(benches);
