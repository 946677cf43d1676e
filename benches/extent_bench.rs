use criterion::{Criterion, black_box, criterion_group, criterion_main};

use geo_layer_map::processing::extent::{compute_extent, compute_extent_parallel};
use geojson::{Feature, FeatureCollection, Geometry, Value};

// Square polygons laid out on a grid, one collection per layer.
fn synthetic_layers(num_layers: usize, features_per_layer: usize) -> Vec<FeatureCollection> {
    (0..num_layers)
        .map(|layer| {
            let features = (0..features_per_layer)
                .map(|i| {
                    let x = (i % 100) as f64 * 0.01 + layer as f64;
                    let y = (i / 100) as f64 * 0.01;
                    let ring = vec![
                        vec![x, y],
                        vec![x + 0.005, y],
                        vec![x + 0.005, y + 0.005],
                        vec![x, y + 0.005],
                        vec![x, y],
                    ];
                    Feature {
                        bbox: None,
                        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                        id: None,
                        properties: None,
                        foreign_members: None,
                    }
                })
                .collect();
            FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            }
        })
        .collect()
}

fn bench_extent_10k_features(c: &mut Criterion) {
    let layers = synthetic_layers(4, 10_000);
    let refs: Vec<&FeatureCollection> = layers.iter().collect();

    c.bench_function("compute_extent_4x10k_features", |b| {
        b.iter(|| black_box(compute_extent(refs.iter().copied(), 32)))
    });
}

fn bench_extent_parallel_10k_features(c: &mut Criterion) {
    let layers = synthetic_layers(4, 10_000);
    let refs: Vec<&FeatureCollection> = layers.iter().collect();

    c.bench_function("compute_extent_parallel_4x10k_features", |b| {
        b.iter(|| black_box(compute_extent_parallel(&refs, 32)))
    });
}

criterion_group!(
    benches,
    bench_extent_10k_features,
    bench_extent_parallel_10k_features
);
criterion_main!(benches);
