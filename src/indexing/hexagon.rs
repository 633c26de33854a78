// src/indexing/hexagon.rs

//! Flat-top hexagon grid in a zone frame.
//!
//! The plane is cut into vertical strips `size / 4` wide and horizontal
//! strips `size / 2 * sin 60` high. Each strip pair falls into one of twelve
//! classes (column strip mod 6, row strip mod 2); the class decides which of
//! at most two hexagons the point can lie in. Valid cells have `x + y` odd.

use crate::constants::{M_SQRT3_2, NUM_HEX_VERTS};
use crate::types::{Cell, PlanePoint};

/// Index adjustment applied to the tentative cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
  Keep,
  East,
  North,
  NorthEast,
}

impl Step {
  fn apply(self, cell: Cell) -> Cell {
    match self {
      Step::Keep => cell,
      Step::East => Cell { x: cell.x + 1, ..cell },
      Step::North => Cell { y: cell.y + 1, ..cell },
      Step::NorthEast => Cell {
        x: cell.x + 1,
        y: cell.y + 1,
      },
    }
  }
}

/// How one strip class resolves its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
  /// The class lies inside a single hexagon.
  Fixed(Step),
  /// The class is split by the edge `from -> to` of the tentative hexagon.
  Edge {
    from: usize,
    to: usize,
    left: Step,
    otherwise: Step,
  },
}

/// Resolution rules indexed by `[row strip mod 2][column strip mod 6]`.
pub(crate) const RULES: [[Rule; 6]; 2] = [
  [
    Rule::Edge {
      from: 0,
      to: 1,
      left: Step::North,
      otherwise: Step::East,
    },
    Rule::Fixed(Step::East),
    Rule::Fixed(Step::East),
    Rule::Edge {
      from: 5,
      to: 0,
      left: Step::Keep,
      otherwise: Step::NorthEast,
    },
    Rule::Fixed(Step::NorthEast),
    Rule::Fixed(Step::NorthEast),
  ],
  [
    Rule::Edge {
      from: 5,
      to: 0,
      left: Step::Keep,
      otherwise: Step::NorthEast,
    },
    Rule::Fixed(Step::NorthEast),
    Rule::Fixed(Step::NorthEast),
    Rule::Edge {
      from: 0,
      to: 1,
      left: Step::North,
      otherwise: Step::East,
    },
    Rule::Fixed(Step::East),
    Rule::Fixed(Step::East),
  ],
];

/// Width of one vertical strip.
#[inline]
#[must_use]
pub fn x_seg(size: f64) -> f64 {
  size / 4.0
}

/// Height of one horizontal strip (half the distance between stacked centers).
#[inline]
#[must_use]
pub fn y_seg(size: f64) -> f64 {
  size / 2.0 * M_SQRT3_2
}

/// Whether `p` lies strictly left of the directed line `a -> b`.
#[inline]
pub(crate) fn is_left(p: PlanePoint, a: PlanePoint, b: PlanePoint) -> bool {
  (b.easting - a.easting) * (p.northing - a.northing) - (b.northing - a.northing) * (p.easting - a.easting) > 0.0
}

/// Hexagon containing a projected point, with its center.
#[must_use]
pub fn cell_from_projected(point: PlanePoint, size: f64) -> (Cell, PlanePoint) {
  let xs = x_seg(size);
  let ys = y_seg(size);

  let x_seg_num = (point.easting / xs).floor() as i64;
  let y_seg_num = (point.northing / ys).floor() as i64;
  let x_rem = x_seg_num.rem_euclid(6) as usize;
  let y_rem = y_seg_num.rem_euclid(2) as usize;

  let tentative = Cell {
    x: x_seg_num.div_euclid(3),
    y: y_seg_num,
  };

  let step = match RULES[y_rem][x_rem] {
    Rule::Fixed(step) => step,
    Rule::Edge {
      from,
      to,
      left,
      otherwise,
    } => {
      let ring = boundary_from_center(tentative_center(x_seg_num, y_seg_num, xs, ys), size);
      if is_left(point, ring[from], ring[to]) {
        left
      } else {
        otherwise
      }
    }
  };

  let cell = step.apply(tentative);
  (cell, center_of(cell, size))
}

/// The real hexagon center of the strip's column, on the strip's row or the one above.
fn tentative_center(x_seg_num: i64, y_seg_num: i64, xs: f64, ys: f64) -> PlanePoint {
  let region = x_seg_num.div_euclid(6);
  let column = if x_seg_num.rem_euclid(6) < 3 { 2 * region + 1 } else { 2 * region + 2 };
  let row = if (column + y_seg_num).rem_euclid(2) == 1 { y_seg_num } else { y_seg_num + 1 };
  PlanePoint::new(column as f64 * 3.0 * xs - xs, row as f64 * ys)
}

/// Center of a hexagon cell in its zone frame.
#[inline]
#[must_use]
pub fn center_of(cell: Cell, size: f64) -> PlanePoint {
  let xs = x_seg(size);
  PlanePoint::new(cell.x as f64 * 3.0 * xs - xs, cell.y as f64 * y_seg(size))
}

/// Vertices of a hexagon around its center, clockwise from the west vertex.
#[must_use]
pub fn boundary_from_center(center: PlanePoint, size: f64) -> [PlanePoint; NUM_HEX_VERTS] {
  let xs = x_seg(size);
  let ys = y_seg(size);
  let PlanePoint { easting: e, northing: n } = center;
  [
    PlanePoint::new(e - 2.0 * xs, n),
    PlanePoint::new(e - xs, n + ys),
    PlanePoint::new(e + xs, n + ys),
    PlanePoint::new(e + 2.0 * xs, n),
    PlanePoint::new(e + xs, n - ys),
    PlanePoint::new(e - xs, n - ys),
  ]
}
