use std::fmt;

use geodesy::prelude::*;

use super::{is_northern, is_valid_zone, lat_band, zone_number, Projection};
use crate::constants::NUM_ZONES;
use crate::error::ProjectionError;
use crate::types::{LonLat, UtmCoord};

/// UTM transform backed by the `geodesy` crate's `utm` operator.
///
/// Operator handles for every zone and hemisphere are built once, so a
/// projection can be reused for any number of calls.
pub struct UtmProjection {
  context: Minimal,
  north: Vec<OpHandle>,
  south: Vec<OpHandle>,
}

impl UtmProjection {
  /// Builds the operators for all 60 zones in both hemispheres.
  pub fn new() -> Result<Self, ProjectionError> {
    let mut context = Minimal::new();
    let mut north = Vec::with_capacity(usize::from(NUM_ZONES));
    let mut south = Vec::with_capacity(usize::from(NUM_ZONES));
    for zone in 1..=NUM_ZONES {
      north.push(build_op(&mut context, &format!("utm zone={zone}"))?);
      south.push(build_op(&mut context, &format!("utm zone={zone} south"))?);
    }
    Ok(Self { context, north, south })
  }

  fn handle(&self, zone: u8, northern: bool) -> Result<OpHandle, ProjectionError> {
    if !is_valid_zone(zone) {
      return Err(ProjectionError::InvalidZone(zone));
    }
    let idx = usize::from(zone - 1);
    Ok(if northern { self.north[idx] } else { self.south[idx] })
  }
}

fn build_op(context: &mut Minimal, definition: &str) -> Result<OpHandle, ProjectionError> {
  context
    .op(definition)
    .map_err(|e| ProjectionError::Transform(format!("{definition}: {e}")))
}

impl fmt::Debug for UtmProjection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("UtmProjection").field("zones", &self.north.len()).finish()
  }
}

impl Projection for UtmProjection {
  fn forward(&self, geo: LonLat, zone: Option<u8>) -> Result<UtmCoord, ProjectionError> {
    let band = lat_band(geo.lat)?;
    let zone = match zone {
      Some(z) if is_valid_zone(z) => z,
      Some(z) => {
        log::warn!("ignoring out of range zone hint {z}");
        zone_number(geo)
      }
      None => zone_number(geo),
    };
    let op = self.handle(zone, geo.lat >= 0.0)?;

    let mut data = [Coor2D::geo(geo.lat, geo.lon)];
    self
      .context
      .apply(op, Fwd, &mut data)
      .map_err(|e| ProjectionError::Transform(e.to_string()))?;
    let [easting, northing] = data[0].0;
    if !easting.is_finite() || !northing.is_finite() {
      return Err(ProjectionError::Transform(format!(
        "non-finite projection of ({}, {}) in zone {zone}",
        geo.lon, geo.lat
      )));
    }

    Ok(UtmCoord {
      easting,
      northing,
      zone,
      band,
    })
  }

  fn inverse(&self, coord: &UtmCoord) -> Result<LonLat, ProjectionError> {
    let op = self.handle(coord.zone, is_northern(coord.band))?;

    let mut data = [Coor2D([coord.easting, coord.northing])];
    self
      .context
      .apply(op, Inv, &mut data)
      .map_err(|e| ProjectionError::Transform(e.to_string()))?;
    let [lon, lat] = data[0].0;
    if !lon.is_finite() || !lat.is_finite() {
      return Err(ProjectionError::Transform(format!(
        "non-finite inverse of ({}, {}) in zone {}{}",
        coord.easting, coord.northing, coord.zone, coord.band
      )));
    }

    Ok(LonLat::new(lon.to_degrees(), lat.to_degrees()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_forward_known_point() {
    let proj = UtmProjection::new().unwrap();
    // 7.5E 51.2N lies in 32U at roughly (395201.31, 5673135.24)
    let utm = proj.forward(LonLat::new(7.5, 51.2), None).unwrap();
    assert_eq!(utm.zone, 32);
    assert_eq!(utm.band, 'U');
    assert!((utm.easting - 395_201.31).abs() < 0.5, "easting {}", utm.easting);
    assert!((utm.northing - 5_673_135.24).abs() < 0.5, "northing {}", utm.northing);
  }

  #[test]
  fn test_southern_hemisphere_false_northing() {
    let proj = UtmProjection::new().unwrap();
    let utm = proj.forward(LonLat::new(151.2, -33.9), None).unwrap();
    assert_eq!(utm.zone, 56);
    assert_eq!(utm.band, 'H');
    assert!(utm.northing > 6_000_000.0 && utm.northing < 10_000_000.0);
    let back = proj.inverse(&utm).unwrap();
    assert!((back.lon - 151.2).abs() < 1e-7);
    assert!((back.lat + 33.9).abs() < 1e-7);
  }

  #[test]
  fn test_forced_zone() {
    let proj = UtmProjection::new().unwrap();
    let own = proj.forward(LonLat::new(-120.1, 37.0), None).unwrap();
    let forced = proj.forward(LonLat::new(-120.1, 37.0), Some(11)).unwrap();
    assert_eq!(own.zone, 10);
    assert_eq!(forced.zone, 11);
    assert!(forced.easting < own.easting);
    let ignored = proj.forward(LonLat::new(-120.1, 37.0), Some(61)).unwrap();
    assert_eq!(ignored.zone, 10, "out of range hints fall back to the own zone");
  }

  #[test]
  fn test_round_trip() {
    let proj = UtmProjection::new().unwrap();
    for &(lon, lat) in &[(-122.51593, 37.752214), (0.5, 0.5), (179.9, 83.9), (-179.9, -79.9)] {
      let utm = proj.forward(LonLat::new(lon, lat), None).unwrap();
      let back = proj.inverse(&utm).unwrap();
      assert!((back.lon - lon).abs() < 1e-7, "lon {lon} came back as {}", back.lon);
      assert!((back.lat - lat).abs() < 1e-7, "lat {lat} came back as {}", back.lat);
    }
  }

  #[test]
  fn test_rejects_unbanded_latitude() {
    let proj = UtmProjection::new().unwrap();
    assert_eq!(
      proj.forward(LonLat::new(0.0, 85.0), None),
      Err(ProjectionError::NoBand(85.0))
    );
  }
}
