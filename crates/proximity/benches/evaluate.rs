//! Benchmarks for proximity engine evaluation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use wombat_catalog::{Attraction, Category};
use wombat_geo::Coordinate;
use wombat_proximity::{EngineConfig, LocationSample, ProximityEngine};

fn test_catalog(count: usize) -> Vec<Attraction> {
    (0..count)
        .map(|i| {
            // grid of attractions around lower Manhattan
            let lat = 40.70 + (i as f64 * 0.001) % 0.2;
            let lng = -74.02 + (i as f64 * 0.001) % 0.2;
            Attraction {
                id: format!("a{i:05}"),
                name: format!("Attraction {i}"),
                description: String::new(),
                category: Category::Cultural,
                coordinate: Coordinate::new(lat, lng),
                rating: 4.0,
                review_count: 0,
                tags: Vec::new(),
                updated_at_ms: 0,
                reviews: Vec::new(),
            }
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for size in [10, 100, 1000, 10000].iter() {
        let catalog = test_catalog(*size);
        let sample = LocationSample {
            coordinate: Coordinate::new(40.75, -73.98),
            accuracy_m: 10.0,
            captured_at_ms: 0,
        };

        group.bench_with_input(BenchmarkId::new("catalog", size), size, |b, _| {
            let mut engine = ProximityEngine::new(EngineConfig::default()).unwrap();
            let mut at_ms = 0i64;
            b.iter(|| {
                at_ms += 1_000;
                let sample = LocationSample {
                    captured_at_ms: at_ms,
                    ..sample
                };
                engine.evaluate(black_box(&sample), black_box(&catalog))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
