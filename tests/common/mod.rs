// tests/common/mod.rs

#![allow(dead_code)]

use geobin::projection::{is_northern, lat_band, zone_number};
use geobin::{GeoLoop, LonLat, Projection, ProjectionError, UtmCoord};

/// Meters per degree of the planar test projection.
pub const METERS_PER_DEG: f64 = 100_000.0;

/// Equirectangular stand-in for UTM: easting counts meters east of the zone's
/// west meridian, so zone seams sit at easting 0 and hexagon column 0 is
/// easy to reach.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanarProjection;

fn zone_west(zone: u8) -> f64 {
  -180.0 + f64::from(zone - 1) * 6.0
}

impl Projection for PlanarProjection {
  fn forward(&self, geo: LonLat, zone: Option<u8>) -> Result<UtmCoord, ProjectionError> {
    let band = lat_band(geo.lat)?;
    let zone = zone.unwrap_or_else(|| zone_number(geo));
    let false_northing = if geo.lat < 0.0 { 10_000_000.0 } else { 0.0 };
    Ok(UtmCoord {
      easting: (geo.lon - zone_west(zone)) * METERS_PER_DEG,
      northing: geo.lat * METERS_PER_DEG + false_northing,
      zone,
      band,
    })
  }

  fn inverse(&self, coord: &UtmCoord) -> Result<LonLat, ProjectionError> {
    let false_northing = if is_northern(coord.band) { 0.0 } else { 10_000_000.0 };
    Ok(LonLat::new(
      zone_west(coord.zone) + coord.easting / METERS_PER_DEG,
      (coord.northing - false_northing) / METERS_PER_DEG,
    ))
  }
}

pub fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

pub fn ring(points: &[(f64, f64)]) -> GeoLoop {
  GeoLoop::new(points.iter().map(|&(lon, lat)| LonLat::new(lon, lat)).collect())
}

/// The San Francisco quadrilateral used across the tests.
pub fn sf_region() -> GeoLoop {
  ring(&[
    (-122.51593, 37.75312),
    (-122.4993, 37.78031),
    (-122.432803, 37.795259),
    (-122.44142, 37.752214),
  ])
}

/// Local equirectangular distance in meters, good enough at bin scale.
pub fn local_distance_m(a: LonLat, b: LonLat) -> f64 {
  let lat = ((a.lat + b.lat) / 2.0).to_radians();
  let dx = (b.lon - a.lon).to_radians() * lat.cos() * 6_371_000.0;
  let dy = (b.lat - a.lat).to_radians() * 6_371_000.0;
  dx.hypot(dy)
}

/// Distance in meters from `p` to the segment `a`-`b`, in a local tangent plane at `p`.
pub fn distance_to_segment_m(p: LonLat, a: LonLat, b: LonLat) -> f64 {
  let scale_y = 6_371_000.0_f64.to_radians();
  let scale_x = scale_y * p.lat.to_radians().cos();
  let to_xy = |q: LonLat| ((q.lon - p.lon) * scale_x, (q.lat - p.lat) * scale_y);
  let (ax, ay) = to_xy(a);
  let (bx, by) = to_xy(b);
  let (dx, dy) = (bx - ax, by - ay);
  let len2 = dx * dx + dy * dy;
  let t = if len2 == 0.0 {
    0.0
  } else {
    ((-ax * dx - ay * dy) / len2).clamp(0.0, 1.0)
  };
  (ax + t * dx).hypot(ay + t * dy)
}

/// Whether `p` lies inside `region` at least `margin_m` meters from every edge.
pub fn deep_inside(p: LonLat, region: &GeoLoop, margin_m: f64) -> bool {
  if geobin::point_inside_geoloop(p, region) != Ok(true) {
    return false;
  }
  let verts = region.active_verts();
  (0..verts.len()).all(|i| distance_to_segment_m(p, verts[i], verts[(i + 1) % verts.len()]) > margin_m)
}
