// src/polygon.rs

//! Point-in-polygon tests over implicitly closed rings.
//!
//! The ring may be given in lon/lat or in a projected frame; the test is the
//! same even-odd crossing count with a vertical ray cast south from the point.
//! Points on an edge or vertex count as inside, so neighbouring bins that
//! share an edge both match it.

use crate::error::{GeoBinError, RingErrors};
use crate::geoid::decode;
use crate::indexing::center_of;
use crate::latlng::{is_valid_lat, is_valid_lon};
use crate::projection::Projection;
use crate::types::{GeoLoop, LonLat, PlanePoint, UtmCoord};

/// Distance (in ring units) within which a point counts as lying on an edge.
const ON_EDGE_TOLERANCE: f64 = 1e-9;

/// A ring vertex with a horizontal and a vertical coordinate.
pub trait RingVertex: Copy {
  /// `(horizontal, vertical)` coordinates.
  fn xy(self) -> (f64, f64);
}

impl RingVertex for LonLat {
  #[inline]
  fn xy(self) -> (f64, f64) {
    (self.lon, self.lat)
  }
}

impl RingVertex for PlanePoint {
  #[inline]
  fn xy(self) -> (f64, f64) {
    (self.easting, self.northing)
  }
}

#[inline]
fn on_segment((px, py): (f64, f64), (ax, ay): (f64, f64), (bx, by): (f64, f64)) -> bool {
  let (dx, dy) = (bx - ax, by - ay);
  let len2 = dx * dx + dy * dy;
  if len2 == 0.0 {
    return (px - ax).hypot(py - ay) <= ON_EDGE_TOLERANCE;
  }
  let cross = dx * (py - ay) - dy * (px - ax);
  if cross * cross > ON_EDGE_TOLERANCE * ON_EDGE_TOLERANCE * len2 {
    return false;
  }
  let along = dx * (px - ax) + dy * (py - ay);
  let slack = ON_EDGE_TOLERANCE * len2.sqrt();
  (-slack..=len2 + slack).contains(&along)
}

/// Even-odd membership of `point` in `ring`, boundary inclusive. No validation.
pub(crate) fn ring_contains<T: RingVertex>(point: T, ring: &[T]) -> bool {
  let Some(&last) = ring.last() else {
    return false;
  };
  let p = point.xy();
  let (x, y) = p;

  let mut inside = false;
  let mut prev = last.xy();
  for v in ring {
    let cur = v.xy();
    if on_segment(p, prev, cur) {
      return true;
    }
    let (xi, yi) = cur;
    let (xj, yj) = prev;
    if ((xi < x && xj >= x) || (xj < x && xi >= x)) && yi + (x - xi) / (xj - xi) * (yj - yi) < y {
      inside = !inside;
    }
    prev = cur;
  }
  inside
}

fn check_ring_len(num_verts: usize, stored: usize) -> RingErrors {
  let mut errors = RingErrors::empty();
  if num_verts < 3 {
    errors |= RingErrors::VERTEX_COUNT;
  }
  if num_verts > stored {
    errors |= RingErrors::RING_LENGTH;
  }
  errors
}

/// Whether a lon/lat point lies inside (or on) the first `region.num_verts`
/// vertices of `region`.
///
/// # Returns
/// `Ok(inside)`, or every failing check: point out of range, fewer than 3
/// vertices, or more vertices requested than stored.
pub fn point_inside_geoloop(point: LonLat, region: &GeoLoop) -> Result<bool, RingErrors> {
  let mut errors = check_ring_len(region.num_verts, region.verts.len());
  if !is_valid_lon(point.lon) {
    errors |= RingErrors::LONGITUDE;
  }
  if !is_valid_lat(point.lat) {
    errors |= RingErrors::LATITUDE;
  }
  if !errors.is_empty() {
    return Err(errors);
  }
  Ok(ring_contains(point, &region.verts[..region.num_verts]))
}

/// Same test over the first `num_verts` vertices of a projected ring. No range checks on coordinates.
pub fn point_inside_projected_ring(
  point: PlanePoint,
  ring: &[PlanePoint],
  num_verts: usize,
) -> Result<bool, RingErrors> {
  let errors = check_ring_len(num_verts, ring.len());
  if !errors.is_empty() {
    return Err(errors);
  }
  Ok(ring_contains(point, &ring[..num_verts]))
}

/// Whether the center of the bin named by `geoid` lies inside `region`.
///
/// Malformed keys report [`GeoBinError::Decode`]; a bad region ring reports
/// [`GeoBinError::GeoIdRing`].
pub fn geoid_in_region<P: Projection>(proj: &P, geoid: &str, region: &GeoLoop) -> Result<bool, GeoBinError> {
  let parts = decode(geoid)?;
  let errors = check_ring_len(region.num_verts, region.verts.len());
  if !errors.is_empty() {
    return Err(GeoBinError::GeoIdRing(errors));
  }
  let center = center_of(parts.bin, parts.cell);
  let center = proj.inverse(&UtmCoord {
    easting: center.easting,
    northing: center.northing,
    zone: parts.zone,
    band: parts.band,
  })?;
  Ok(point_inside_geoloop(center, region)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::projection::UtmProjection;

  fn ring(points: &[(f64, f64)]) -> GeoLoop {
    GeoLoop::new(points.iter().map(|&(lon, lat)| LonLat::new(lon, lat)).collect())
  }

  #[test]
  fn test_point_inside_rectangle() {
    let region = ring(&[(50.0, 7.0), (50.0, 8.0), (52.0, 8.0), (52.0, 7.0)]);
    assert_eq!(point_inside_geoloop(LonLat::new(51.2, 7.5), &region), Ok(true));
  }

  #[test]
  fn test_point_outside_rectangle() {
    let region = ring(&[(50.0, 7.0), (50.0, 7.2), (51.0, 7.2), (51.0, 7.0)]);
    assert_eq!(point_inside_geoloop(LonLat::new(51.2, 7.5), &region), Ok(false));
  }

  #[test]
  fn test_boundary_counts_as_inside() {
    let region = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    for &(lon, lat) in &[(0.0, 0.5), (1.0, 0.5), (0.5, 0.0), (0.5, 1.0), (0.0, 0.0), (1.0, 1.0)] {
      assert_eq!(
        point_inside_geoloop(LonLat::new(lon, lat), &region),
        Ok(true),
        "({lon}, {lat}) is on the boundary"
      );
    }
    assert_eq!(point_inside_geoloop(LonLat::new(1.0 + 1e-6, 0.5), &region), Ok(false));
  }

  #[test]
  fn test_concave_ring() {
    // U shape opening north
    let region = ring(&[(0.0, 0.0), (0.0, 3.0), (1.0, 3.0), (1.0, 1.0), (2.0, 1.0), (2.0, 3.0), (3.0, 3.0), (3.0, 0.0)]);
    assert_eq!(point_inside_geoloop(LonLat::new(0.5, 2.0), &region), Ok(true));
    assert_eq!(point_inside_geoloop(LonLat::new(1.5, 2.0), &region), Ok(false));
    assert_eq!(point_inside_geoloop(LonLat::new(1.5, 0.5), &region), Ok(true));
  }

  #[test]
  fn test_invalid_inputs_combine() {
    let mut region = ring(&[(0.0, 0.0), (0.0, 1.0)]);
    assert_eq!(
      point_inside_geoloop(LonLat::new(200.0, 91.0), &region),
      Err(RingErrors::all() - RingErrors::RING_LENGTH)
    );
    region.num_verts = 5;
    assert_eq!(
      point_inside_geoloop(LonLat::new(0.0, 0.0), &region),
      Err(RingErrors::RING_LENGTH)
    );
    assert_eq!((RingErrors::LONGITUDE | RingErrors::RING_LENGTH).code(), -9);
  }

  #[test]
  fn test_partial_ring() {
    // only the first three vertices take part
    let mut region = ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 0.0), (2.0, 2.0)]);
    region.num_verts = 3;
    assert_eq!(point_inside_geoloop(LonLat::new(1.5, 1.5), &region), Ok(false));
    region.num_verts = 4;
    assert_eq!(point_inside_geoloop(LonLat::new(0.2, 1.0), &region), Ok(true));
  }

  #[test]
  fn test_projected_ring() {
    let square = [
      PlanePoint::new(500_000.0, 4_000_000.0),
      PlanePoint::new(500_000.0, 4_000_100.0),
      PlanePoint::new(500_100.0, 4_000_100.0),
      PlanePoint::new(500_100.0, 4_000_000.0),
    ];
    assert_eq!(point_inside_projected_ring(PlanePoint::new(500_050.0, 4_000_050.0), &square, 4), Ok(true));
    assert_eq!(point_inside_projected_ring(PlanePoint::new(500_150.0, 4_000_050.0), &square, 4), Ok(false));
    assert_eq!(
      point_inside_projected_ring(PlanePoint::new(0.0, 0.0), &square, 2),
      Err(RingErrors::VERTEX_COUNT)
    );
    assert_eq!(
      point_inside_projected_ring(PlanePoint::new(0.0, 0.0), &square, 8),
      Err(RingErrors::RING_LENGTH)
    );
  }

  #[test]
  fn test_geoid_in_region() {
    let proj = UtmProjection::new().unwrap();
    let geoid = "00000000001010032U0000000526900000131015";
    let around = ring(&[(7.0, 51.0), (7.0, 51.5), (8.0, 51.5), (8.0, 51.0)]);
    assert!(geoid_in_region(&proj, geoid, &around).unwrap());
    let elsewhere = ring(&[(50.0, 7.0), (50.0, 8.0), (52.0, 8.0), (52.0, 7.0)]);
    assert!(!geoid_in_region(&proj, geoid, &elsewhere).unwrap());

    let err = geoid_in_region(&proj, "short", &around).unwrap_err();
    assert_eq!(err.code(), Some(-1));
    let mut bad = around.clone();
    bad.num_verts = 9;
    let err = geoid_in_region(&proj, geoid, &bad).unwrap_err();
    assert_eq!(err.code(), Some(-64));
  }
}
