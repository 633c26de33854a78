//! Validation flag sets and the crate error type.
//!
//! Every call that validates several independent inputs reports all failing
//! inputs at once as a flag set. `code()` gives the legacy negative integer
//! form (`-bits`).

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
  /// Invalid inputs when encoding a point into a GeoID.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct EncodeErrors: u8 {
    /// Longitude outside [-180, 180].
    const LONGITUDE = 0b0000_0001;
    /// Latitude outside [-80, 84].
    const LATITUDE = 0b0000_0010;
    /// Bin size outside [1, 9999].
    const BIN_SIZE = 0b0000_0100;
    /// Bin type not 0 (square) or 1 (hexagon).
    const BIN_TYPE = 0b0000_1000;
    /// Cell index negative or wider than its 11 digit field.
    const CELL_RANGE = 0b0001_0000;
    /// Zone number not in [1, 60].
    const ZONE = 0b0010_0000;
    /// Latitude band not one of the 20 band letters.
    const LAT_BAND = 0b0100_0000;
  }
}

bitflags! {
  /// Invalid fields found while decoding a GeoID.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct DecodeErrors: u8 {
    /// Length not in (25, 40].
    const LENGTH = 0b0000_0001;
    /// Bin type digit not 0 or 1.
    const BIN_TYPE = 0b0000_0010;
    /// Bin size not in [1, 9999].
    const BIN_SIZE = 0b0000_0100;
    /// Zone number not in [1, 60].
    const ZONE = 0b0000_1000;
    /// Latitude band not one of the 20 band letters.
    const LAT_BAND = 0b0001_0000;
    /// x or y field empty or not numeric.
    const CELL_INDEX = 0b0010_0000;
  }
}

bitflags! {
  /// Invalid inputs to the point-in-polygon tester.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct RingErrors: u8 {
    /// Test longitude outside [-180, 180].
    const LONGITUDE = 0b0000_0001;
    /// Test latitude outside [-90, 90].
    const LATITUDE = 0b0000_0010;
    /// Fewer than 3 vertices requested.
    const VERTEX_COUNT = 0b0000_0100;
    /// Requested vertex count exceeds the stored ring.
    const RING_LENGTH = 0b0000_1000;
  }
}

bitflags! {
  /// Invalid inputs to a region scan.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct ScanErrors: u8 {
    /// Fewer than 3 region vertices requested.
    const VERTEX_COUNT = 0b0000_0001;
    /// Region ring shorter than requested, or a vertex out of range.
    const COORDINATES = 0b0000_0010;
    /// Bin size outside [1, 9999].
    const BIN_SIZE = 0b0000_0100;
    /// Bin type not 0 or 1.
    const BIN_TYPE = 0b0000_1000;
    /// Empty destination path.
    const DESTINATION = 0b0001_0000;
    /// Destination directory cannot be created.
    const CREATE_DIR = 0b0010_0000;
    /// Output file cannot be created.
    const CREATE_FILE = 0b0100_0000;
  }
}

macro_rules! impl_legacy_code {
  ($($flags:ty),*) => {
    $(
      impl $flags {
        /// Legacy negative status code; `0` when no flag is set.
        #[must_use]
        pub fn code(self) -> i32 {
          -i32::from(self.bits())
        }
      }
    )*
  };
}

impl_legacy_code!(EncodeErrors, DecodeErrors, RingErrors, ScanErrors);

/// Failure of the geodetic to projected transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
  /// Latitude outside the banded UTM range [-80, 84].
  #[error("latitude {0} has no UTM band")]
  NoBand(f64),
  /// Zone number outside 1-60.
  #[error("zone {0} is not a UTM zone")]
  InvalidZone(u8),
  /// The transform engine rejected the operation or produced no finite result.
  #[error("transform failed: {0}")]
  Transform(String),
}

/// Crate error.
#[derive(Debug, Error)]
pub enum GeoBinError {
  /// Invalid point encoding input.
  #[error("invalid point for GeoID encoding: {0:?}")]
  Encode(EncodeErrors),
  /// Malformed GeoID.
  #[error("invalid GeoID: {0:?}")]
  Decode(DecodeErrors),
  /// Invalid point-in-polygon input.
  #[error("invalid region test: {0:?}")]
  Ring(RingErrors),
  /// Invalid region scan request.
  #[error("invalid region scan: {0:?}")]
  Scan(ScanErrors),
  /// Decoding succeeded but the region ring was rejected.
  #[error("invalid region ring for GeoID test: {0:?}")]
  GeoIdRing(RingErrors),
  /// Projection failure.
  #[error(transparent)]
  Projection(#[from] ProjectionError),
  /// Output sink I/O failure.
  #[error("output write failed: {0}")]
  Io(#[from] std::io::Error),
  /// GeoJSON serialization failure.
  #[cfg(feature = "geojson")]
  #[error("GeoJSON serialization failed: {0}")]
  Json(#[from] serde_json::Error),
}

impl GeoBinError {
  /// Legacy negative status code for validation failures.
  ///
  /// Projection and output failures have no legacy code and return `None`.
  #[must_use]
  pub fn code(&self) -> Option<i32> {
    match self {
      GeoBinError::Encode(e) => Some(e.code()),
      GeoBinError::Decode(e) => Some(e.code()),
      GeoBinError::Ring(e) => Some(e.code()),
      GeoBinError::Scan(e) => Some(e.code()),
      // decode flags use bits 0-4, ring flags move to bits 5-6
      GeoBinError::GeoIdRing(e) => {
        let mut bits = 0;
        if e.contains(RingErrors::VERTEX_COUNT) {
          bits |= 32;
        }
        if e.contains(RingErrors::RING_LENGTH) {
          bits |= 64;
        }
        Some(-bits)
      }
      _ => None,
    }
  }
}

impl From<EncodeErrors> for GeoBinError {
  fn from(value: EncodeErrors) -> Self {
    GeoBinError::Encode(value)
  }
}

impl From<DecodeErrors> for GeoBinError {
  fn from(value: DecodeErrors) -> Self {
    GeoBinError::Decode(value)
  }
}

impl From<RingErrors> for GeoBinError {
  fn from(value: RingErrors) -> Self {
    GeoBinError::Ring(value)
  }
}

impl From<ScanErrors> for GeoBinError {
  fn from(value: ScanErrors) -> Self {
    GeoBinError::Scan(value)
  }
}
