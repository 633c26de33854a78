//! Geodetic to UTM projection seam.
//!
//! The binning math only needs a forward and an inverse transform between
//! lon/lat and a 6-degree transverse Mercator zone frame. `UtmProjection` is
//! the production implementation; anything implementing [`Projection`] can be
//! plugged into the indexers and the region scanner.

mod utm;

pub use utm::UtmProjection;

use crate::constants::{LAT_BANDS, MAX_UTM_LAT, MIN_UTM_LAT, NUM_ZONES, SOUTH_FALSE_NORTHING_M, ZONE_WIDTH_DEG};
use crate::error::ProjectionError;
use crate::types::{LonLat, UtmCoord};

/// Forward and inverse transform between lon/lat and zone frames.
pub trait Projection {
  /// Projects `geo` into its own zone, or into `zone` when given.
  fn forward(&self, geo: LonLat, zone: Option<u8>) -> Result<UtmCoord, ProjectionError>;

  /// Converts a zone frame coordinate back to lon/lat.
  fn inverse(&self, coord: &UtmCoord) -> Result<LonLat, ProjectionError>;
}

impl<P: Projection + ?Sized> Projection for &P {
  fn forward(&self, geo: LonLat, zone: Option<u8>) -> Result<UtmCoord, ProjectionError> {
    (**self).forward(geo, zone)
  }

  fn inverse(&self, coord: &UtmCoord) -> Result<LonLat, ProjectionError> {
    (**self).inverse(coord)
  }
}

/// Whether `zone` is a UTM zone number.
#[inline]
#[must_use]
pub fn is_valid_zone(zone: u8) -> bool {
  (1..=NUM_ZONES).contains(&zone)
}

/// Zone number from longitude alone, `floor((lon + 180) / 6) + 1`, clamped to 1-60.
#[must_use]
pub fn zone_from_lon(lon: f64) -> u8 {
  let zone = ((lon + 180.0) / ZONE_WIDTH_DEG).floor() as i64 + 1;
  zone.clamp(1, i64::from(NUM_ZONES)) as u8
}

/// Zone number for a point, including the Norway and Svalbard exceptions.
#[must_use]
pub fn zone_number(geo: LonLat) -> u8 {
  let LonLat { lon, lat } = geo;
  if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
    return 32;
  }
  if (72.0..=84.0).contains(&lat) && lon >= 0.0 {
    if lon < 9.0 {
      return 31;
    } else if lon < 21.0 {
      return 33;
    } else if lon < 33.0 {
      return 35;
    } else if lon < 42.0 {
      return 37;
    }
  }
  zone_from_lon(lon)
}

/// Latitude band letter, 8 degrees per band from 80S; 84N still maps to X.
pub fn lat_band(lat: f64) -> Result<char, ProjectionError> {
  if !(MIN_UTM_LAT..=MAX_UTM_LAT).contains(&lat) {
    return Err(ProjectionError::NoBand(lat));
  }
  let idx = (((lat - MIN_UTM_LAT) / 8.0).floor() as usize).min(LAT_BANDS.len() - 1);
  Ok(char::from(LAT_BANDS.as_bytes()[idx]))
}

/// Whether `band` names a band letter.
#[inline]
#[must_use]
pub fn is_valid_band(band: char) -> bool {
  LAT_BANDS.contains(band)
}

/// Bands N and above lie north of the equator.
#[inline]
#[must_use]
pub fn is_northern(band: char) -> bool {
  band.to_ascii_uppercase() >= 'N'
}

/// Re-expresses a zone frame coordinate in the northern or southern frame of
/// the same zone. The band becomes the one touching the equator on that side.
#[must_use]
pub fn to_hemisphere(coord: UtmCoord, northern: bool) -> UtmCoord {
  match (is_northern(coord.band), northern) {
    (true, false) => UtmCoord {
      northing: coord.northing + SOUTH_FALSE_NORTHING_M,
      band: 'M',
      ..coord
    },
    (false, true) => UtmCoord {
      northing: coord.northing - SOUTH_FALSE_NORTHING_M,
      band: 'N',
      ..coord
    },
    _ => coord,
  }
}
