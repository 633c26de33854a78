// src/indexing/square.rs

use crate::constants::NUM_SQUARE_VERTS;
use crate::types::{Cell, PlanePoint};

/// Square bin containing a projected point, with the bin center.
///
/// West and south edges belong to the bin; east and north edges belong to
/// the next one.
#[must_use]
pub fn cell_from_projected(point: PlanePoint, size: f64) -> (Cell, PlanePoint) {
  let cell = Cell {
    x: (point.easting / size).floor() as i64,
    y: (point.northing / size).floor() as i64,
  };
  (cell, center_of(cell, size))
}

/// Center of a square bin in its zone frame.
#[inline]
#[must_use]
pub fn center_of(cell: Cell, size: f64) -> PlanePoint {
  let half = size / 2.0;
  PlanePoint::new(cell.x as f64 * size + half, cell.y as f64 * size + half)
}

/// Corners of a square bin around its center: SW, NW, NE, SE.
#[must_use]
pub fn boundary_from_center(center: PlanePoint, size: f64) -> [PlanePoint; NUM_SQUARE_VERTS] {
  let h = size / 2.0;
  let PlanePoint { easting: e, northing: n } = center;
  [
    PlanePoint::new(e - h, n - h),
    PlanePoint::new(e - h, n + h),
    PlanePoint::new(e + h, n + h),
    PlanePoint::new(e + h, n - h),
  ]
}
