// src/indexing/mod.rs

pub mod from_geoid;
pub mod hexagon;
pub mod square;
pub mod to_geoid;

use crate::constants::MAX_BIN_BNDRY_VERTS;
use crate::error::ProjectionError;
use crate::projection::Projection;
use crate::types::{BinSpec, BinType, Cell, CellBoundary, PlanePoint, UtmCoord};

// Re-export public functions from submodules for easier access
pub use from_geoid::{cell_geometry, CellGeometry};
pub use to_geoid::{geoid_from_lon_lat, geoid_from_point, geoid_from_projected, BinnedPoint};

/// Bin containing a projected point and that bin's center, for either topology.
#[must_use]
pub fn cell_from_projected(spec: BinSpec, point: PlanePoint) -> (Cell, PlanePoint) {
  match spec.bin_type() {
    BinType::Square => square::cell_from_projected(point, spec.size()),
    BinType::Hexagon => hexagon::cell_from_projected(point, spec.size()),
  }
}

/// Center of a bin in its zone frame.
#[must_use]
pub fn center_of(spec: BinSpec, cell: Cell) -> PlanePoint {
  match spec.bin_type() {
    BinType::Square => square::center_of(cell, spec.size()),
    BinType::Hexagon => hexagon::center_of(cell, spec.size()),
  }
}

/// Boundary ring of the bin centered at `center`, converted to lon/lat through
/// the zone frame `zone` / `band`.
pub fn boundary_from_center<P: Projection>(
  proj: &P,
  spec: BinSpec,
  center: PlanePoint,
  zone: u8,
  band: char,
) -> Result<CellBoundary, ProjectionError> {
  let (plane, num_verts) = plane_boundary(spec, center);

  let mut boundary = CellBoundary::default();
  for (slot, p) in boundary.verts.iter_mut().zip(&plane[..num_verts]) {
    *slot = proj.inverse(&UtmCoord {
      easting: p.easting,
      northing: p.northing,
      zone,
      band,
    })?;
  }
  boundary.num_verts = num_verts;
  Ok(boundary)
}

/// Boundary ring in the zone frame. Entries past the returned count are unused.
#[must_use]
pub fn plane_boundary(spec: BinSpec, center: PlanePoint) -> ([PlanePoint; MAX_BIN_BNDRY_VERTS], usize) {
  let mut ring = [PlanePoint::default(); MAX_BIN_BNDRY_VERTS];
  let num_verts = match spec.bin_type() {
    BinType::Square => {
      let corners = square::boundary_from_center(center, spec.size());
      ring[..corners.len()].copy_from_slice(&corners);
      corners.len()
    }
    BinType::Hexagon => {
      ring = hexagon::boundary_from_center(center, spec.size());
      ring.len()
    }
  };
  (ring, num_verts)
}
