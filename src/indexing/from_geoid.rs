// src/indexing/from_geoid.rs

use crate::error::GeoBinError;
use crate::geoid::{decode, GeoIdParts};
use crate::projection::Projection;
use crate::types::{CellBoundary, LonLat, UtmCoord};

use super::{boundary_from_center, center_of};

/// Center and outline of the bin named by a GeoID.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGeometry {
  /// Decoded key fields.
  pub parts: GeoIdParts,
  /// Bin center.
  pub center: LonLat,
  /// Bin outline, 4 or 6 vertices.
  pub boundary: CellBoundary,
}

/// Decodes a GeoID and rebuilds the center and boundary of its bin.
///
/// # Returns
/// The geometry, or [`GeoBinError::Decode`] with every malformed field.
pub fn cell_geometry<P: Projection>(proj: &P, geoid: &str) -> Result<CellGeometry, GeoBinError> {
  let parts = decode(geoid)?;
  let center = center_of(parts.bin, parts.cell);
  let center_geo = proj.inverse(&UtmCoord {
    easting: center.easting,
    northing: center.northing,
    zone: parts.zone,
    band: parts.band,
  })?;
  let boundary = boundary_from_center(proj, parts.bin, center, parts.zone, parts.band)?;
  Ok(CellGeometry {
    parts,
    center: center_geo,
    boundary,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::geoid_from_lon_lat;
  use crate::projection::UtmProjection;

  #[test]
  fn test_cell_geometry_invalid_input() {
    let proj = UtmProjection::new().unwrap();
    let err = cell_geometry(&proj, "0000").unwrap_err();
    assert_eq!(err.code(), Some(-1));
  }

  #[test]
  fn test_cell_geometry_matches_encoding() {
    let proj = UtmProjection::new().unwrap();
    for bin_type in [0, 1] {
      let bin = geoid_from_lon_lat(&proj, 7.5, 51.2, 100, bin_type, None).unwrap();
      let geometry = cell_geometry(&proj, bin.geoid.as_str()).unwrap();
      assert_eq!(geometry.parts, bin.parts);
      assert!((geometry.center.lon - bin.center.lon).abs() < 1e-12);
      assert!((geometry.center.lat - bin.center.lat).abs() < 1e-12);
      assert_eq!(geometry.boundary.num_verts, if bin_type == 0 { 4 } else { 6 });
    }
  }
}
