use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geobin::*;

fn sf_region() -> GeoLoop {
  GeoLoop::new(vec![
    LonLat::new(-122.51593, 37.75312),
    LonLat::new(-122.4993, 37.78031),
    LonLat::new(-122.432803, 37.795259),
    LonLat::new(-122.44142, 37.752214),
  ])
}

fn seam_region() -> GeoLoop {
  GeoLoop::new(vec![
    LonLat::new(-120.05, 37.0),
    LonLat::new(-120.05, 37.05),
    LonLat::new(-119.95, 37.05),
    LonLat::new(-119.95, 37.0),
  ])
}

fn bench_bins_in_region(c: &mut Criterion) {
  let proj = UtmProjection::new().unwrap();
  let mut group = c.benchmark_group("bins_in_region");
  group.sample_size(10);

  for (name, region, size, bin_type) in [
    ("sf_square_250", sf_region(), 250, 0),
    ("sf_hexagon_250", sf_region(), 250, 1),
    ("seam_hexagon_500", seam_region(), 500, 1),
  ] {
    group.bench_function(name, |b| {
      b.iter(|| {
        let mut records = Vec::new();
        bins_in_region(&proj, black_box(&region), size, bin_type, None, &mut records).map(|_| records.len())
      });
    });
  }
  group.finish();
}

fn bench_point_inside_geoloop(c: &mut Criterion) {
  let region = sf_region();
  let point = LonLat::new(-122.47, 37.77);
  c.bench_function("point_inside_geoloop", |b| {
    b.iter(|| point_inside_geoloop(black_box(point), black_box(&region)));
  });
}

criterion_group!(benches, bench_bins_in_region, bench_point_inside_geoloop);
criterion_main!(benches);
