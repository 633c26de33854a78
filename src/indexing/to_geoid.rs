// src/indexing/to_geoid.rs

use crate::error::{EncodeErrors, GeoBinError};
use crate::geoid::{encode, GeoId, GeoIdParts};
use crate::latlng::{is_utm_lat, is_valid_lon};
use crate::projection::Projection;
use crate::types::{BinSpec, BinType, LonLat, PlanePoint, UtmCoord};

use super::cell_from_projected;

/// A point resolved to the bin that contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedPoint {
  /// Key of the bin.
  pub geoid: GeoId,
  /// Decoded fields of `geoid`.
  pub parts: GeoIdParts,
  /// Bin center in lon/lat.
  pub center: LonLat,
}

impl BinnedPoint {
  /// Zone the GeoID was computed in.
  #[must_use]
  pub fn zone(&self) -> u8 {
    self.parts.zone
  }
}

/// GeoID of the bin containing `(lon, lat)`.
///
/// All raw inputs are validated together; a failure reports every invalid
/// input as [`GeoBinError::Encode`]. `zone` forces the projection zone; a value
/// outside 1-60 is ignored and the point's own zone is used.
///
/// # Example
/// ```no_run
/// use geobin::{geoid_from_lon_lat, UtmProjection};
///
/// let proj = UtmProjection::new().unwrap();
/// let bin = geoid_from_lon_lat(&proj, -122.51593, 37.752214, 100, 1, None).unwrap();
/// assert_eq!(bin.zone(), 10);
/// ```
pub fn geoid_from_lon_lat<P: Projection>(
  proj: &P,
  lon: f64,
  lat: f64,
  bin_size_m: u32,
  bin_type: u8,
  zone: Option<u8>,
) -> Result<BinnedPoint, GeoBinError> {
  let mut errors = EncodeErrors::empty();
  if !is_valid_lon(lon) {
    errors |= EncodeErrors::LONGITUDE;
  }
  if !is_utm_lat(lat) {
    errors |= EncodeErrors::LATITUDE;
  }
  let spec = BinSpec::new(bin_size_m, bin_type).map_err(|e| errors | e);
  match spec {
    Ok(spec) if errors.is_empty() => geoid_from_point(proj, LonLat::new(lon, lat), spec, zone),
    Ok(_) => Err(errors.into()),
    Err(errors) => Err(errors.into()),
  }
}

/// GeoID of the bin containing `geo`, for an already validated bin spec.
pub fn geoid_from_point<P: Projection>(
  proj: &P,
  geo: LonLat,
  spec: BinSpec,
  zone: Option<u8>,
) -> Result<BinnedPoint, GeoBinError> {
  let utm = proj.forward(geo, zone)?;
  geoid_from_projected(proj, &utm, spec)
}

/// GeoID of the bin containing a point already projected into `utm.zone`.
///
/// A hexagon that resolves to column 0 straddles the western edge of the zone
/// frame. Such points are nudged half a bin west, re-projected into their own
/// zone and indexed there, so both sides of a zone seam agree on the key.
pub fn geoid_from_projected<P: Projection>(
  proj: &P,
  utm: &UtmCoord,
  spec: BinSpec,
) -> Result<BinnedPoint, GeoBinError> {
  let mut frame = *utm;
  let (mut cell, mut center) = cell_from_projected(spec, PlanePoint::new(frame.easting, frame.northing));

  if spec.bin_type() == BinType::Hexagon && cell.x == 0 {
    let nudged = UtmCoord {
      easting: frame.easting - spec.size() / 2.0,
      ..frame
    };
    let geo = proj.inverse(&nudged)?;
    frame = proj.forward(geo, None)?;
    log::trace!(
      "hexagon column 0 in zone {}, re-indexing in zone {}",
      utm.zone,
      frame.zone
    );
    (cell, center) = cell_from_projected(spec, PlanePoint::new(frame.easting, frame.northing));
  }

  let center = proj.inverse(&UtmCoord {
    easting: center.easting,
    northing: center.northing,
    ..frame
  })?;
  let parts = GeoIdParts {
    bin: spec,
    zone: frame.zone,
    band: frame.band,
    cell,
  };
  let geoid = encode(&parts)?;
  Ok(BinnedPoint { geoid, parts, center })
}
