use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geobin::*;

// --- Fixtures for benchmarks ---
const SF: (f64, f64) = (-122.4194, 37.7749);
const SF_HEX_100: &str = "00000000001010010S0000000725200000096535";

// --- Benchmark Functions ---

fn bench_geoid_from_lon_lat(c: &mut Criterion) {
  let proj = UtmProjection::new().unwrap();
  let mut group = c.benchmark_group("geoid_from_lon_lat");

  for (name, bin_type) in [("square", 0), ("hexagon", 1)] {
    group.bench_function(name, |b| {
      b.iter(|| geoid_from_lon_lat(&proj, black_box(SF.0), black_box(SF.1), black_box(100), bin_type, None));
    });
  }
  group.finish();
}

fn bench_cell_geometry(c: &mut Criterion) {
  let proj = UtmProjection::new().unwrap();
  c.bench_function("cell_geometry_hexagon", |b| {
    b.iter(|| cell_geometry(&proj, black_box(SF_HEX_100)));
  });
}

fn bench_decode(c: &mut Criterion) {
  c.bench_function("decode", |b| b.iter(|| decode(black_box(SF_HEX_100))));
}

fn bench_hexagon_cell_from_projected(c: &mut Criterion) {
  let point = PlanePoint::new(543_870.0, 4_180_090.0);
  c.bench_function("hexagon_cell_from_projected", |b| {
    b.iter(|| indexing::hexagon::cell_from_projected(black_box(point), black_box(100.0)));
  });
}

criterion_group!(
  benches,
  bench_geoid_from_lon_lat,
  bench_cell_geometry,
  bench_decode,
  bench_hexagon_cell_from_projected
);
criterion_main!(benches);
