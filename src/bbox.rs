// src/bbox.rs

use crate::constants::{NUM_ZONES, ZONE_WIDTH_DEG};
use crate::error::ProjectionError;
use crate::latlng::great_circle_distance_m;
use crate::projection::{to_hemisphere, zone_from_lon, Projection};
use crate::types::{BBox, GeoLoop, LonLat};

/// Points sampled along each edge of a box when estimating its projected envelope.
const EDGE_SAMPLES: usize = 8;

/// Bounding box of the active vertices of a region. Empty regions give a default box.
#[must_use]
pub fn bbox_from_geoloop(region: &GeoLoop) -> BBox {
  let verts = region.active_verts();
  let Some(first) = verts.first() else {
    return BBox::default();
  };
  let mut bbox = BBox {
    west: first.lon,
    south: first.lat,
    east: first.lon,
    north: first.lat,
  };
  for v in &verts[1..] {
    bbox.west = bbox.west.min(v.lon);
    bbox.east = bbox.east.max(v.lon);
    bbox.south = bbox.south.min(v.lat);
    bbox.north = bbox.north.max(v.lat);
  }
  bbox
}

/// Zones of the west and east edges, by longitude alone.
#[must_use]
pub fn zone_span(bbox: &BBox) -> (u8, u8) {
  (zone_from_lon(bbox.west), zone_from_lon(bbox.east))
}

/// Whether the box spans more than one zone.
#[must_use]
pub fn crosses_zones(bbox: &BBox) -> bool {
  let (min, max) = zone_span(bbox);
  min != max
}

/// Splits a box into one slice per zone in `first..=last`.
///
/// Inner slice edges sit on zone meridians; the outer edges keep the box's
/// own west and east longitudes.
#[must_use]
pub fn zone_slices(bbox: &BBox, first: u8, last: u8) -> Vec<(u8, BBox)> {
  (first..=last.min(NUM_ZONES))
    .map(|zone| {
      let west = if zone == first {
        bbox.west
      } else {
        -180.0 + f64::from(zone - 1) * ZONE_WIDTH_DEG
      };
      let east = if zone == last {
        bbox.east
      } else {
        -180.0 + f64::from(zone) * ZONE_WIDTH_DEG
      };
      (zone, BBox { west, east, ..*bbox })
    })
    .collect()
}

/// Splits a box at the equator when it reaches into both hemispheres.
///
/// Returns `(northern, slice)` pairs, southern slice first.
#[must_use]
pub fn hemisphere_slices(bbox: &BBox) -> Vec<(bool, BBox)> {
  if bbox.south < 0.0 && bbox.north > 0.0 {
    vec![
      (false, BBox { north: 0.0, ..*bbox }),
      (true, BBox { south: 0.0, ..*bbox }),
    ]
  } else {
    vec![(bbox.south >= 0.0, *bbox)]
  }
}

/// Great circle width and height of a box in meters.
///
/// Width is the longer of the south and north edges, height the longer of
/// the west and east edges.
#[must_use]
pub fn geodesic_extents_m(bbox: &BBox) -> (f64, f64) {
  let sw = LonLat::new(bbox.west, bbox.south);
  let nw = LonLat::new(bbox.west, bbox.north);
  let ne = LonLat::new(bbox.east, bbox.north);
  let se = LonLat::new(bbox.east, bbox.south);
  let width = great_circle_distance_m(&sw, &se).max(great_circle_distance_m(&nw, &ne));
  let height = great_circle_distance_m(&sw, &nw).max(great_circle_distance_m(&se, &ne));
  (width, height)
}

/// Easting/northing envelope of a box's outline in one zone frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEnvelope {
  pub min_east: f64,
  pub min_north: f64,
  pub max_east: f64,
  pub max_north: f64,
}

impl ProjectedEnvelope {
  #[must_use]
  pub fn width(&self) -> f64 {
    self.max_east - self.min_east
  }

  #[must_use]
  pub fn height(&self) -> f64 {
    self.max_north - self.min_north
  }
}

/// Projects the outline of `bbox` into the northern or southern frame of
/// `zone` and returns its envelope.
///
/// Parallels and meridians bend in a transverse Mercator frame, so the edges
/// are sampled rather than just the corners.
pub fn projected_envelope<P: Projection>(
  proj: &P,
  bbox: &BBox,
  zone: u8,
  northern: bool,
) -> Result<ProjectedEnvelope, ProjectionError> {
  let mut env = ProjectedEnvelope {
    min_east: f64::INFINITY,
    min_north: f64::INFINITY,
    max_east: f64::NEG_INFINITY,
    max_north: f64::NEG_INFINITY,
  };
  for geo in outline_samples(bbox) {
    let utm = to_hemisphere(proj.forward(geo, Some(zone))?, northern);
    env.min_east = env.min_east.min(utm.easting);
    env.max_east = env.max_east.max(utm.easting);
    env.min_north = env.min_north.min(utm.northing);
    env.max_north = env.max_north.max(utm.northing);
  }
  Ok(env)
}

fn outline_samples(bbox: &BBox) -> impl Iterator<Item = LonLat> + '_ {
  (0..=EDGE_SAMPLES).flat_map(move |k| {
    let t = k as f64 / EDGE_SAMPLES as f64;
    let lon = bbox.west + (bbox.east - bbox.west) * t;
    let lat = bbox.south + (bbox.north - bbox.south) * t;
    [
      LonLat::new(lon, bbox.south),
      LonLat::new(lon, bbox.north),
      LonLat::new(bbox.west, lat),
      LonLat::new(bbox.east, lat),
    ]
  })
}
