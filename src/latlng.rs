// src/latlng.rs

use crate::constants::{EARTH_RADIUS_KM, MAX_UTM_LAT, MIN_UTM_LAT};
use crate::types::LonLat;

/// Whether a longitude is inside [-180, 180].
#[inline]
#[must_use]
pub fn is_valid_lon(lon: f64) -> bool {
  (-180.0..=180.0).contains(&lon)
}

/// Whether a latitude is inside [-90, 90].
#[inline]
#[must_use]
pub fn is_valid_lat(lat: f64) -> bool {
  (-90.0..=90.0).contains(&lat)
}

/// Whether a latitude is inside the banded UTM range [-80, 84].
#[inline]
#[must_use]
pub fn is_utm_lat(lat: f64) -> bool {
  (MIN_UTM_LAT..=MAX_UTM_LAT).contains(&lat)
}

/// Haversine distance between two points in kilometers.
#[must_use]
pub fn great_circle_distance_km(a: &LonLat, b: &LonLat) -> f64 {
  let d_lat = (b.lat - a.lat).to_radians();
  let d_lon = (b.lon - a.lon).to_radians();
  let h = (d_lat / 2.0).sin().powi(2) + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_KM
}

/// Haversine distance between two points in meters.
#[must_use]
pub fn great_circle_distance_m(a: &LonLat, b: &LonLat) -> f64 {
  great_circle_distance_km(a, b) * 1000.0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_great_circle_distance() {
    let a = LonLat::new(0.0, 0.0);
    let b = LonLat::new(1.0, 0.0);
    // one degree on the equator of a 6371 km sphere
    let expected = 6371.0 * 1.0_f64.to_radians();
    assert!((great_circle_distance_km(&a, &b) - expected).abs() < 1e-9);
    assert!((great_circle_distance_m(&a, &b) - expected * 1000.0).abs() < 1e-6);
    assert_eq!(great_circle_distance_m(&a, &a), 0.0);
  }

  #[test]
  fn test_ranges() {
    assert!(is_valid_lon(-180.0) && is_valid_lon(180.0));
    assert!(!is_valid_lon(180.0001));
    assert!(is_valid_lat(90.0) && !is_valid_lat(-90.5));
    assert!(is_utm_lat(84.0) && !is_utm_lat(84.5) && !is_utm_lat(-80.01));
  }
}
